//! Cooperative interruption checked between B&B nodes.
//!
//! # Note
//! [`InterruptTerminator`] installs a global signal handler and can only be
//! constructed once per process. Constructing a second one panics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait Terminator {
    fn should_stop(&self) -> bool;
}

/// Responds to Ctrl-C (SIGINT).
pub struct InterruptTerminator {
    interrupted: Arc<AtomicBool>,
}

impl InterruptTerminator {
    pub fn new() -> Self {
        let interrupted = Arc::new(AtomicBool::new(false));
        ctrlc::set_handler({
            let interrupted = interrupted.clone();
            move || interrupted.store(true, Ordering::SeqCst)
        })
        .expect("error setting Ctrl-C handler");
        Self { interrupted }
    }
}

impl Default for InterruptTerminator {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminator for InterruptTerminator {
    fn should_stop(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

/// Never stops; used when `SolverConfig::interruptible` is `false`.
pub struct NullTerminator;

impl Terminator for NullTerminator {
    fn should_stop(&self) -> bool {
        false
    }
}
