//! Shared helpers for activity tests

use async_trait::async_trait;
use recmusic_activity::{ActivityBatch, ActivityCollector, ActivityError, Result};
use recmusic_core::{CookieSessionStore, SessionStore, User};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Notify;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn logged_in_session() -> Arc<CookieSessionStore> {
    let session = CookieSessionStore::new();
    session.login("access-123", "refresh-456", &User::new(123, "alice"));
    Arc::new(session)
}

/// Collector that remembers every submission
#[derive(Default)]
pub struct FakeCollector {
    pub submissions: Mutex<Vec<(String, ActivityBatch)>>,
    pub failing: AtomicBool,
}

impl FakeCollector {
    pub fn failing() -> Self {
        let collector = Self::default();
        collector.failing.store(true, Ordering::SeqCst);
        collector
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn submissions(&self) -> Vec<(String, ActivityBatch)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityCollector for FakeCollector {
    async fn submit(&self, token: &str, batch: &ActivityBatch) -> Result<()> {
        self.submissions
            .lock()
            .unwrap()
            .push((token.to_string(), batch.clone()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(ActivityError::Rejected {
                status: 500,
                message: "collector down".into(),
            });
        }
        Ok(())
    }
}

/// Collector that holds each submission until released
#[derive(Default)]
pub struct GatedCollector {
    pub entered: Notify,
    pub release: Notify,
    pub succeed: AtomicBool,
}

#[async_trait]
impl ActivityCollector for GatedCollector {
    async fn submit(&self, _token: &str, _batch: &ActivityBatch) -> Result<()> {
        self.entered.notify_one();
        self.release.notified().await;

        if self.succeed.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ActivityError::Rejected {
                status: 503,
                message: "unavailable".into(),
            })
        }
    }
}
