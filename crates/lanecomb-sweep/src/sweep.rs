//! Whole-project cleanup sweep.

use crate::error::{ConfigError, Result};
use crate::reduce::reduce_envelope;
use lanecomb_core::{EnvelopeOwner, PointStore, ProjectLayout};
use tracing::debug;

/// Which envelope classes a sweep visits.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Visit envelopes owned by tracks
    pub track_envelopes: bool,
    /// Visit envelopes owned by media item takes
    pub take_envelopes: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            track_envelopes: true,
            take_envelopes: true,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.track_envelopes && !self.take_envelopes {
            return Err(ConfigError::NothingSelected);
        }
        Ok(())
    }
}

/// What one sweep did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Grand total of points removed across every lane touched
    pub removed: usize,
}

impl SweepOutcome {
    /// The undo entry the caller owes the host: `Some` label when anything
    /// was removed, `None` when the sweep must leave no trace in the undo
    /// log.
    pub fn undo_label(&self) -> Option<String> {
        match self.removed {
            0 => None,
            1 => Some("Clean 1 Envelope Point".to_owned()),
            n => Some(format!("Clean {n} Envelope Points")),
        }
    }
}

/// Reduce every envelope the layout enumerates, track-owned and take-owned,
/// and accumulate the grand total.
///
/// Runs to completion on the calling thread; there is no cancellation. The
/// caller is expected to hold exclusive access to the project for the
/// duration and, afterwards, to commit exactly one undo entry labeled with
/// [`SweepOutcome::undo_label`] - or nothing at all when it returns `None`.
pub fn sweep_project<H>(host: &mut H, config: &SweepConfig) -> Result<SweepOutcome>
where
    H: PointStore + ProjectLayout + ?Sized,
{
    config.validate()?;

    let mut removed = 0;
    for env in host.envelopes() {
        let visit = match env.owner {
            EnvelopeOwner::Track => config.track_envelopes,
            EnvelopeOwner::Take => config.take_envelopes,
        };
        if !visit {
            continue;
        }
        removed += reduce_envelope(host, env.handle);
    }

    debug!(removed, "project sweep finished");
    Ok(SweepOutcome { removed })
}
