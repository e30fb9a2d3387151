//! Bot session lifecycle state
//!
//! `Created → Configuring → Connecting → Ready → ShuttingDown → Closed`
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{bail, Result};
use log::debug;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    Created = 0,
    Configuring = 1,
    Connecting = 2,
    Ready = 3,
    ShuttingDown = 4,
    Closed = 5,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Created,
            1 => Self::Configuring,
            2 => Self::Connecting,
            3 => Self::Ready,
            4 => Self::ShuttingDown,
            _ => Self::Closed,
        }
    }

    /// Whether `self → next` is a legal transition
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Created, Configuring)
                | (Configuring, Connecting)
                | (Connecting, Ready)
                | (Configuring | Connecting | Ready, ShuttingDown)
                | (ShuttingDown, Closed)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Shared, lock-free lifecycle cell
#[derive(Debug)]
pub struct Lifecycle {
    state: AtomicU8,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(LifecycleState::Created as u8),
        }
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Move to `next`, failing if the transition is illegal from the current state
    pub fn advance(&self, next: LifecycleState) -> Result<()> {
        let mut current = self.state();
        loop {
            if !current.can_transition_to(next) {
                bail!("Illegal lifecycle transition {current} → {next}");
            }
            match self.state.compare_exchange(
                current as u8,
                next as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    debug!("Lifecycle {current} → {next}");
                    return Ok(());
                }
                Err(actual) => current = LifecycleState::from_u8(actual),
            }
        }
    }

    /// Move to `ShuttingDown` unless already shutting down or closed
    ///
    /// Returns `true` if this call made the transition.
    pub fn begin_shutdown(&self) -> bool {
        self.advance(LifecycleState::ShuttingDown).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    #[test]
    fn test_happy_path() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.state(), Created);
        for next in [Configuring, Connecting, Ready, ShuttingDown, Closed] {
            lifecycle.advance(next).unwrap();
            assert_eq!(lifecycle.state(), next);
        }
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.advance(Ready).is_err());
        assert!(lifecycle.advance(Closed).is_err());
        assert_eq!(lifecycle.state(), Created);

        lifecycle.advance(Configuring).unwrap();
        assert!(lifecycle.advance(Configuring).is_err());
    }

    #[test]
    fn test_shutdown_from_startup_failure() {
        let lifecycle = Lifecycle::new();
        lifecycle.advance(Configuring).unwrap();
        lifecycle.advance(Connecting).unwrap();
        assert!(lifecycle.begin_shutdown());
        lifecycle.advance(Closed).unwrap();
    }

    #[test]
    fn test_begin_shutdown_only_once() {
        let lifecycle = Lifecycle::new();
        lifecycle.advance(Configuring).unwrap();
        assert!(lifecycle.begin_shutdown());
        assert!(!lifecycle.begin_shutdown());
        assert_eq!(lifecycle.state(), ShuttingDown);
    }

    #[test]
    fn test_closed_is_terminal() {
        for next in [Created, Configuring, Connecting, Ready, ShuttingDown, Closed] {
            assert!(!Closed.can_transition_to(next));
        }
    }
}
