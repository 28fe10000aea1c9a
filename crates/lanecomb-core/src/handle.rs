//! Lazily re-acquired host handles.
//!
//! Hosts hand out handles that can silently die - the object behind them
//! gets deleted, the project reloads. The toolkit pattern for a
//! long-lived utility handle is: keep the last one, probe it before every
//! use, re-acquire when the probe fails. [`CachedHandle`] is that pattern as
//! an explicit object instead of a hidden static.

/// A handle that can report whether it still points at a live host object.
pub trait Revalidate {
    /// Probe the host: does this handle still resolve?
    fn is_valid(&self) -> bool;
}

/// Cache for a single revalidated handle.
#[derive(Debug)]
pub struct CachedHandle<T> {
    slot: Option<T>,
}

impl<T> Default for CachedHandle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> CachedHandle<T> {
    /// An empty cache; the first access acquires.
    pub const fn empty() -> Self {
        Self { slot: None }
    }

    /// Drop the cached handle so the next access re-acquires.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

impl<T: Revalidate> CachedHandle<T> {
    /// Return the cached handle if it still probes valid, otherwise run
    /// `acquire` and cache whatever it produces.
    ///
    /// Returns `None` only when there is no valid cached handle and
    /// `acquire` also came up empty.
    pub fn get_or_acquire<F>(&mut self, acquire: F) -> Option<&T>
    where
        F: FnOnce() -> Option<T>,
    {
        let stale = !self.slot.as_ref().is_some_and(Revalidate::is_valid);
        if stale {
            self.slot = acquire();
        }
        self.slot.as_ref()
    }
}
