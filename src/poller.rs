use crate::errors::FetchError;
use crate::feed::FeedClient;
use crate::models::Reading;
use crate::state::FeedState;
use chrono::Utc;
use std::{future::Future, sync::Arc, time::Duration};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

/// Anything the poller can pull a fresh batch of readings from.
pub trait ReadingSource: Send + Sync + 'static {
    fn fetch_readings(&self) -> impl Future<Output = Result<Vec<Reading>, FetchError>> + Send;
}

impl ReadingSource for FeedClient {
    fn fetch_readings(&self) -> impl Future<Output = Result<Vec<Reading>, FetchError>> + Send {
        self.fetch()
    }
}

/// Handle to the background fetch loop. Fetches immediately, then every `period`.
pub struct Poller {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn<S: ReadingSource>(
        source: S,
        feed: Arc<Mutex<FeedState>>,
        period: Duration,
    ) -> Self {
        let (shutdown, signal) = watch::channel(false);
        let handle = tokio::spawn(run(source, feed, period, signal));
        Self { shutdown, handle }
    }

    /// Stops the loop and waits for it. A request still in flight is dropped
    /// and its response, if any, is never applied.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.handle.await {
            error!("poller task failed: {err}");
        }
    }
}

async fn run<S: ReadingSource>(
    source: S,
    feed: Arc<Mutex<FeedState>>,
    period: Duration,
    mut signal: watch::Receiver<bool>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("polling sensor feed every {}s", period.as_secs_f64());

    loop {
        tokio::select! {
            _ = signal.changed() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            _ = signal.changed() => break,
            result = source.fetch_readings() => result,
        };

        let mut state = feed.lock().await;
        if *signal.borrow() {
            break;
        }
        apply(&mut state, result);
    }

    info!("sensor feed poller stopped");
}

fn apply(state: &mut FeedState, result: Result<Vec<Reading>, FetchError>) {
    let now = Utc::now();
    match result {
        Ok(readings) => {
            debug!(count = readings.len(), "fetched sensor readings");
            state.record_success(readings, now);
        }
        Err(err) => {
            warn!("sensor fetch failed: {err}");
            state.record_failure(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoorStatus;
    use crate::state::FETCH_ERROR_MESSAGE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;
    use tokio::sync::Notify;
    use tokio::time::sleep;

    fn sample(temperature: f64) -> Reading {
        Reading {
            label: "now".to_string(),
            temperature,
            humidity: 50.0,
            origin_instant: Utc::now(),
            door_status: DoorStatus::Closed,
            image_reading: None,
        }
    }

    /// Fails on the first call, then returns one reading per call so far.
    struct FlakySource {
        calls: AtomicUsize,
    }

    impl ReadingSource for FlakySource {
        fn fetch_readings(&self) -> impl Future<Output = Result<Vec<Reading>, FetchError>> + Send {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY))
                } else {
                    Ok((0..call).map(|n| sample(n as f64)).collect())
                }
            }
        }
    }

    /// Never answers until released.
    struct StalledSource {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    impl ReadingSource for StalledSource {
        fn fetch_readings(&self) -> impl Future<Output = Result<Vec<Reading>, FetchError>> + Send {
            let started = Arc::clone(&self.started);
            let release = Arc::clone(&self.release);
            async move {
                started.notify_one();
                release.notified().await;
                Ok(vec![sample(99.0)])
            }
        }
    }

    async fn wait_for(feed: &Arc<Mutex<FeedState>>, check: impl Fn(&FeedState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(3);
        loop {
            if check(&*feed.lock().await) {
                return;
            }
            if Instant::now() > deadline {
                panic!("feed state never reached the expected condition");
            }
            sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn recovers_after_failed_fetch() {
        let feed = Arc::new(Mutex::new(FeedState::default()));
        let source = FlakySource { calls: AtomicUsize::new(0) };
        let poller = Poller::spawn(source, Arc::clone(&feed), Duration::from_millis(20));

        wait_for(&feed, |state| state.error.as_deref() == Some(FETCH_ERROR_MESSAGE)).await;
        wait_for(&feed, |state| state.error.is_none() && !state.readings.is_empty()).await;

        poller.shutdown().await;
        let state = feed.lock().await;
        assert!(state.last_success.is_some());
    }

    #[tokio::test]
    async fn response_after_shutdown_is_not_applied() {
        let feed = Arc::new(Mutex::new(FeedState::default()));
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = StalledSource {
            started: Arc::clone(&started),
            release: Arc::clone(&release),
        };
        let poller = Poller::spawn(source, Arc::clone(&feed), Duration::from_millis(20));

        started.notified().await;
        poller.shutdown().await;
        release.notify_waiters();
        sleep(Duration::from_millis(50)).await;

        let state = feed.lock().await;
        assert!(state.readings.is_empty());
        assert!(state.last_attempt.is_none());
    }
}
