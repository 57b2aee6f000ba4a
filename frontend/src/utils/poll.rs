use futures::future::{abortable, AbortHandle};
use log::debug;
use std::{future::Future, time::Duration};

use super::{task, time};

/// Fixed-interval background task. Stops on `stop()` or when dropped,
/// whichever comes first; a tick in flight is dropped with it.
#[derive(Debug)]
pub struct PollHandle {
    abort: AbortHandle,
}

impl PollHandle {
    /// Runs `tick` immediately, then again `interval` after each completion.
    pub fn start<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let (task, abort) = abortable(async move {
            loop {
                tick().await;
                time::sleep(interval).await;
            }
        });
        task::spawn_local(async move {
            if task.await.is_err() {
                debug!("Polling stopped");
            }
        });
        Self { abort }
    }

    pub fn stop(&self) {
        self.abort.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.abort.is_aborted()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}
