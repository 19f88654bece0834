//! Run flag for poll loops and the one-time device registration guard.

use portable_atomic::{AtomicBool, Ordering};

/// Running/stopped flag shared between a poll loop and whoever stops it.
///
/// The loop checks the flag once per poll tick, so a stop takes effect at
/// the next tick boundary; a sleep already in progress is not cut short.
#[derive(Debug)]
pub struct RunFlag {
    running: AtomicBool,
}

impl RunFlag {
    /// A stopped flag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Mark the loop as running.
    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Ask the loop to stop after its current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Init-once guard for registering a HID interface with the USB stack.
///
/// Shared by every device instance; only the first registration runs no
/// matter how many sticks are constructed.
#[derive(Debug)]
pub struct Registration {
    registered: AtomicBool,
}

impl Registration {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registered: AtomicBool::new(false),
        }
    }

    /// Claim the registration. Returns `true` exactly once.
    pub fn claim(&self) -> bool {
        let claimed = self
            .registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if !claimed {
            debug!("HID interface already registered, skipping");
        }
        claimed
    }

    /// Run `register` if nobody has registered yet.
    ///
    /// Returns `None` when a previous call already performed the registration.
    pub fn register_with<T>(&self, register: impl FnOnce() -> T) -> Option<T> {
        self.claim().then(register)
    }

    /// Check whether the registration has happened.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }
}

impl Default for Registration {
    fn default() -> Self {
        Self::new()
    }
}
