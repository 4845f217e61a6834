use crate::domain::ports::price_source::PriceSource;
use crate::domain::values::price_map::PriceMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(10);

/// Periodically re-fetches quotes into a shared snapshot.
///
/// The refresh loop is a cancellable task owned by the calling layer; the
/// valuation engine never blocks on it and reads whatever snapshot is
/// current. Failed fetches keep the previous snapshot.
pub struct PriceRefresher {
    source: Arc<dyn PriceSource>,
    snapshot: Arc<RwLock<PriceMap>>,
    period: Duration,
}

impl PriceRefresher {
    pub fn new(source: Arc<dyn PriceSource>, period: Duration) -> Self {
        Self {
            source,
            snapshot: Arc::new(RwLock::new(PriceMap::new())),
            period,
        }
    }

    /// Non-blocking copy of the current snapshot.
    pub fn snapshot(&self) -> PriceMap {
        self.snapshot
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Start the refresh loop for the given coin ids. The first fetch
    /// happens immediately, then once per period until stopped.
    pub fn spawn(&self, coin_ids: Vec<String>) -> RefresherHandle {
        let source = self.source.clone();
        let snapshot = self.snapshot.clone();
        let period = self.period;
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match source.fetch(&coin_ids).await {
                            Ok(fresh) => {
                                if let Ok(mut guard) = snapshot.write() {
                                    guard.merge(fresh);
                                }
                            }
                            Err(e) => eprintln!("Warning: price refresh failed: {e}"),
                        }
                    }
                    _ = stop_rx.changed() => break,
                }
            }
        });

        RefresherHandle {
            task,
            stop: stop_tx,
        }
    }
}

/// Cancellation handle for a running refresh loop.
pub struct RefresherHandle {
    task: JoinHandle<()>,
    stop: watch::Sender<bool>,
}

impl RefresherHandle {
    pub fn stop(self) {
        let _ = self.stop.send(true);
        self.task.abort();
    }

    /// Signal the loop and wait for it to wind down.
    pub async fn stopped(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::prices::fixed::FixedPrices;

    #[tokio::test]
    async fn test_refresher_populates_snapshot() {
        let source = Arc::new(FixedPrices::from_pairs(&[("bitcoin", 45000.0)]));
        let refresher = PriceRefresher::new(source, Duration::from_millis(10));
        assert!(refresher.snapshot().is_empty());

        let handle = refresher.spawn(vec!["bitcoin".to_string()]);
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stopped().await;

        assert_eq!(refresher.snapshot().get("bitcoin"), Some(45000.0));
    }

    #[tokio::test]
    async fn test_stop_cancels_loop() {
        let source = Arc::new(FixedPrices::empty());
        let refresher = PriceRefresher::new(source, Duration::from_millis(10));
        let handle = refresher.spawn(vec![]);
        handle.stop();
    }
}
