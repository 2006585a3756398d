//! Per-pass progress reporting and cooperative cancellation.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::PassStats;

/// Receives the counters of every completed depth pass.
///
/// Returning [`ControlFlow::Break`] stops the search before the next pass.
/// A break on the pass that found a solution is ignored.
pub trait ProgressObserver {
    /// Called once after each pass.
    fn on_pass(&mut self, pass: &PassStats) -> ControlFlow<()>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&PassStats) -> ControlFlow<()>,
{
    fn on_pass(&mut self, pass: &PassStats) -> ControlFlow<()> {
        self(pass)
    }
}

/// Logs every pass at debug level through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_pass(&mut self, pass: &PassStats) -> ControlFlow<()> {
        log::debug!(
            "Depth: {}, Nodes: {} ({} inner, {} hits)",
            pass.depth,
            pass.nodes,
            pass.inner,
            pass.hits
        );
        ControlFlow::Continue(())
    }
}

/// Stops the search once a shared flag is raised, e.g. from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    flag: Arc<AtomicBool>,
}

impl CancelFlag {
    /// A lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask any search holding a clone of this flag to stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl ProgressObserver for CancelFlag {
    fn on_pass(&mut self, _pass: &PassStats) -> ControlFlow<()> {
        if self.is_cancelled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
