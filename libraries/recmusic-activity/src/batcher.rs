//! Activity batcher
//!
//! Collects user interactions in memory and periodically delivers them to the
//! collector as one batch. One batcher exists per application; UI surfaces
//! that want periodic delivery hold an [`ActivityConsumer`].

use crate::collector::{ActivityBatch, ActivityCollector};
use crate::config::ActivityConfig;
use recmusic_core::{ActivityEntry, ActivityKind, SessionStore};
use recmusic_playback::{PlaybackEvent, PlaybackListener};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Result of one flush cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing queued, no request made
    Empty,
    /// No token or no usable user record; entries kept
    NoSession,
    /// Collector accepted this many entries, which left the queue
    Delivered(usize),
    /// Delivery failed; entries kept for the next cycle
    Failed,
}

struct Pending {
    seq: u64,
    entry: ActivityEntry,
}

#[derive(Default)]
struct PendingQueue {
    entries: VecDeque<Pending>,
    next_seq: u64,
}

struct FlushTimer {
    shutdown: oneshot::Sender<()>,
}

impl FlushTimer {
    fn stop(self) {
        // Receiver may already be gone if the batcher was dropped
        let _ = self.shutdown.send(());
    }
}

#[derive(Default)]
struct Consumers {
    count: usize,
    timer: Option<FlushTimer>,
}

struct Shared {
    config: ActivityConfig,
    collector: Arc<dyn ActivityCollector>,
    session: Arc<dyn SessionStore>,
    queue: Mutex<PendingQueue>,
    consumers: Mutex<Consumers>,
    // Serializes flush cycles; never held by `record`
    flush_lock: tokio::sync::Mutex<()>,
}

impl Shared {
    fn queue(&self) -> MutexGuard<'_, PendingQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn consumers(&self) -> MutexGuard<'_, Consumers> {
        self.consumers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory activity queue with periodic delivery
///
/// Cloning is cheap and every clone refers to the same queue.
///
/// # Example
///
/// ```ignore
/// let batcher = ActivityBatcher::new(config, collector, session);
/// let _consumer = batcher.attach(); // starts the flush timer
/// batcher.record(ActivityKind::Like, Some("TR123"));
/// ```
#[derive(Clone)]
pub struct ActivityBatcher {
    shared: Arc<Shared>,
}

impl ActivityBatcher {
    pub fn new(
        config: ActivityConfig,
        collector: Arc<dyn ActivityCollector>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                collector,
                session,
                queue: Mutex::new(PendingQueue::default()),
                consumers: Mutex::new(Consumers::default()),
                flush_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Queue an interaction stamped with the current time
    pub fn record(&self, kind: ActivityKind, track_id: Option<&str>) {
        self.record_entry(ActivityEntry::now(kind, track_id.map(str::to_string)));
    }

    /// Queue a prepared entry
    pub fn record_entry(&self, entry: ActivityEntry) {
        let mut queue = self.shared.queue();
        let seq = queue.next_seq;
        queue.next_seq += 1;

        debug!(
            kind = %entry.kind,
            track_id = ?entry.track_id,
            pending = queue.entries.len() + 1,
            "Recorded activity"
        );
        queue.entries.push_back(Pending { seq, entry });

        if let Some(max) = self.shared.config.max_queue_len {
            while queue.entries.len() > max {
                if let Some(dropped) = queue.entries.pop_front() {
                    warn!(
                        kind = %dropped.entry.kind,
                        max_queue_len = max,
                        "Activity queue full, dropping oldest entry"
                    );
                }
            }
        }
    }

    /// Snapshot of the queued entries, oldest first
    pub fn pending(&self) -> Vec<ActivityEntry> {
        self.shared
            .queue()
            .entries
            .iter()
            .map(|p| p.entry.clone())
            .collect()
    }

    pub fn pending_len(&self) -> usize {
        self.shared.queue().entries.len()
    }

    /// Register a consumer
    ///
    /// The first consumer starts the flush timer. The timer stops when the
    /// last consumer is dropped. Must be called inside a Tokio runtime for the
    /// timer to start; otherwise entries are only delivered by explicit
    /// `flush` calls.
    pub fn attach(&self) -> ActivityConsumer {
        let mut consumers = self.shared.consumers();
        consumers.count += 1;
        if consumers.timer.is_none() {
            consumers.timer = self.start_timer();
        }
        debug!(consumers = consumers.count, "Activity consumer attached");
        drop(consumers);

        ActivityConsumer {
            batcher: self.clone(),
        }
    }

    pub fn consumer_count(&self) -> usize {
        self.shared.consumers().count
    }

    pub fn is_timer_running(&self) -> bool {
        self.shared.consumers().timer.is_some()
    }

    /// Stop the flush timer regardless of attached consumers
    ///
    /// Queued entries stay in memory. A later `attach` starts a new timer.
    pub fn shutdown(&self) {
        if let Some(timer) = self.shared.consumers().timer.take() {
            timer.stop();
            info!("Activity flush timer shut down");
        }
    }

    /// Run one flush cycle
    ///
    /// Never fails: every problem is logged and reported through the
    /// outcome. Concurrent calls run one after another.
    pub async fn flush(&self) -> FlushOutcome {
        let _flushing = self.shared.flush_lock.lock().await;

        let (last_seq, entries) = {
            let queue = self.shared.queue();
            let Some(last) = queue.entries.back() else {
                return FlushOutcome::Empty;
            };
            let entries: Vec<ActivityEntry> =
                queue.entries.iter().map(|p| p.entry.clone()).collect();
            (last.seq, entries)
        };

        let Some(token) = self.shared.session.access_token() else {
            debug!(pending = entries.len(), "No access token, keeping activity queued");
            return FlushOutcome::NoSession;
        };
        let Some(user) = self.shared.session.user() else {
            debug!(pending = entries.len(), "No user record, keeping activity queued");
            return FlushOutcome::NoSession;
        };

        let count = entries.len();
        let batch = ActivityBatch {
            user_id: user.id,
            activity_logs: entries,
        };

        match self.shared.collector.submit(&token, &batch).await {
            Ok(()) => {
                let mut queue = self.shared.queue();
                while queue.entries.front().is_some_and(|p| p.seq <= last_seq) {
                    queue.entries.pop_front();
                }
                info!(
                    count,
                    user_id = user.id,
                    remaining = queue.entries.len(),
                    "Delivered activity batch"
                );
                FlushOutcome::Delivered(count)
            }
            Err(e) => {
                warn!(error = %e, count, "Failed to deliver activity batch");
                FlushOutcome::Failed
            }
        }
    }

    fn detach(&self) {
        let mut consumers = self.shared.consumers();
        consumers.count = consumers.count.saturating_sub(1);
        debug!(consumers = consumers.count, "Activity consumer detached");

        if consumers.count == 0 {
            if let Some(timer) = consumers.timer.take() {
                timer.stop();
                info!("Last activity consumer detached, flush timer stopped");
            }
        }
    }

    fn start_timer(&self) -> Option<FlushTimer> {
        let period = self.shared.config.flush_interval;
        if period.is_zero() {
            warn!("Activity flush interval is zero, timer not started");
            return None;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No Tokio runtime available, activity flush timer not started");
            return None;
        };

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        runtime.spawn(run_flush_timer(
            Arc::downgrade(&self.shared),
            period,
            shutdown_rx,
        ));
        info!(period_ms = period.as_millis() as u64, "Activity flush timer started");

        Some(FlushTimer {
            shutdown: shutdown_tx,
        })
    }
}

impl PlaybackListener for ActivityBatcher {
    fn on_playback_event(&self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::TrackStarted { track_id } => {
                self.record(ActivityKind::Play, Some(track_id.as_str()));
            }
            PlaybackEvent::TrackSkipped { track_id, .. } => {
                self.record(ActivityKind::Skip, Some(track_id.as_str()));
            }
            _ => {}
        }
    }
}

/// Handle held by a UI surface that wants periodic delivery
///
/// Dropping the last consumer stops the flush timer.
pub struct ActivityConsumer {
    batcher: ActivityBatcher,
}

impl ActivityConsumer {
    pub fn record(&self, kind: ActivityKind, track_id: Option<&str>) {
        self.batcher.record(kind, track_id);
    }

    pub fn batcher(&self) -> &ActivityBatcher {
        &self.batcher
    }
}

impl Drop for ActivityConsumer {
    fn drop(&mut self) {
        self.batcher.detach();
    }
}

/// Flush every `period` until told to stop or the batcher is gone
///
/// The first tick is one full period after start.
async fn run_flush_timer(
    shared: Weak<Shared>,
    period: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let Some(shared) = shared.upgrade() else { break };
                let outcome = ActivityBatcher { shared }.flush().await;
                debug!(?outcome, "Scheduled activity flush finished");
            }
        }
    }

    debug!("Activity flush timer exited");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use recmusic_core::{CookieSessionStore, User};

    struct Accepting;

    #[async_trait]
    impl ActivityCollector for Accepting {
        async fn submit(&self, _token: &str, _batch: &ActivityBatch) -> Result<()> {
            Ok(())
        }
    }

    fn batcher(config: ActivityConfig) -> ActivityBatcher {
        let session = CookieSessionStore::new();
        session.login("token", "refresh", &User::new(1, "alice"));
        ActivityBatcher::new(config, Arc::new(Accepting), Arc::new(session))
    }

    #[test]
    fn cap_drops_oldest() {
        let batcher = batcher(ActivityConfig::default().with_max_queue_len(2));

        batcher.record(ActivityKind::Like, Some("a"));
        batcher.record(ActivityKind::Like, Some("b"));
        batcher.record(ActivityKind::Like, Some("c"));

        let ids: Vec<_> = batcher
            .pending()
            .into_iter()
            .filter_map(|e| e.track_id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn playback_events_become_activity() {
        let batcher = batcher(ActivityConfig::default());

        batcher.on_playback_event(&PlaybackEvent::TrackStarted {
            track_id: "t1".into(),
        });
        batcher.on_playback_event(&PlaybackEvent::TrackSkipped {
            track_id: "t1".into(),
            position: Duration::from_secs(2),
        });
        batcher.on_playback_event(&PlaybackEvent::TrackFinished {
            track_id: "t1".into(),
        });

        let kinds: Vec<_> = batcher.pending().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ActivityKind::Play, ActivityKind::Skip]);
    }

    #[test]
    fn attach_outside_runtime_does_not_start_timer() {
        let batcher = batcher(ActivityConfig::default());

        let consumer = batcher.attach();
        assert_eq!(batcher.consumer_count(), 1);
        assert!(!batcher.is_timer_running());

        drop(consumer);
        assert_eq!(batcher.consumer_count(), 0);
    }

    #[tokio::test]
    async fn delivered_entries_leave_queue() {
        let batcher = batcher(ActivityConfig::default());
        batcher.record(ActivityKind::Play, Some("t1"));
        batcher.record(ActivityKind::Unlike, Some("t2"));

        assert_eq!(batcher.flush().await, FlushOutcome::Delivered(2));
        assert_eq!(batcher.pending_len(), 0);
        assert_eq!(batcher.flush().await, FlushOutcome::Empty);
    }
}
