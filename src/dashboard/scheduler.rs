//! Poll Scheduler
//!
//! One recurring timer per widget, armed after a widget's first render and
//! disarmed en masse on dashboard switch. Each tick spawns its cycle as its
//! own task, so a slow aggregation never delays or blocks the next tick —
//! overlapping cycles are permitted, and stale ones discard themselves on
//! arrival (see the loader's epoch check).

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Opaque token for one widget's recurring timer, 1:1 with its instance.
struct PollHandle {
    token: CancellationToken,
    timer: JoinHandle<()>,
}

#[derive(Default)]
pub struct PollScheduler {
    timers: HashMap<String, PollHandle>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    pub fn is_armed(&self, widget_id: &str) -> bool {
        self.timers.contains_key(widget_id)
    }

    /// Registers a recurring tick for a widget. The first tick fires one
    /// full interval after arming; the initial render cycle during
    /// construction covers t=0.
    ///
    /// Returns false without touching the existing timer if the widget is
    /// already armed: re-arming requires disarming first.
    pub fn arm<F, Fut>(&mut self, widget_id: &str, interval: Duration, tick: F) -> bool
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.timers.contains_key(widget_id) {
            return false;
        }

        let token = CancellationToken::new();
        let tick_token = token.clone();
        let timer = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                tokio::select! {
                    _ = tick_token.cancelled() => break,
                    _ = ticker.tick() => {
                        // Cycles run detached so ticks may overlap.
                        tokio::spawn(tick());
                    }
                }
            }
        });

        self.timers
            .insert(widget_id.to_string(), PollHandle { token, timer });
        true
    }

    /// Cancels every registered timer unconditionally. Cycles already
    /// spawned are not interrupted; they drop their results on arrival.
    pub fn disarm_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.token.cancel();
            handle.timer.abort();
        }
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.disarm_all();
    }
}
