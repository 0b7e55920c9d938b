//! Cooperative cancellation. The growth and pruning loops poll a flag once per iteration and
//! bail out with [`PcstError::Cancelled`] when it says stop.

use crate::PcstError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag polled at loop boundaries of the long running phases.
pub trait TerminationFlag {
    /// Whether the computation may keep going.
    fn running(&self) -> bool;

    /// Fails with [`PcstError::Cancelled`] once the flag no longer allows running.
    fn assert_running(&self) -> Result<(), PcstError> {
        if self.running() {
            Ok(())
        } else {
            Err(PcstError::Cancelled)
        }
    }
}

/// A flag that never asks to stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningTrue;

impl TerminationFlag for RunningTrue {
    fn running(&self) -> bool {
        true
    }
}

/// Setting the boolean to `true` requests cancellation.
impl TerminationFlag for AtomicBool {
    fn running(&self) -> bool {
        !self.load(Ordering::Relaxed)
    }
}

impl<F: TerminationFlag + ?Sized> TerminationFlag for Arc<F> {
    fn running(&self) -> bool {
        (**self).running()
    }
}

impl<F: TerminationFlag + ?Sized> TerminationFlag for &F {
    fn running(&self) -> bool {
        (**self).running()
    }
}
