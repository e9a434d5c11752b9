//! Debouncing for bursty input
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling a new value
//! replaces the pending one and restarts the quiet period, so only the last
//! value of a burst is ever released ("latest wins"). Time is passed in by the
//! caller, which keeps the debouncer deterministic under test.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use tender_forms::debounce::Debouncer;
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(300));
//! debouncer.schedule("r", Duration::from_millis(0));
//! debouncer.schedule("ro", Duration::from_millis(40));
//! debouncer.schedule("road", Duration::from_millis(80));
//!
//! assert_eq!(debouncer.poll(Duration::from_millis(300)), None);
//! assert_eq!(debouncer.poll(Duration::from_millis(380)), Some("road"));
//! assert_eq!(debouncer.poll(Duration::from_millis(900)), None);
//! ```

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Duration,
}

/// Single-slot, last-write-wins delay line
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet period from `now`
    ///
    /// Returns true when a not-yet-released value was superseded.
    pub fn schedule(&mut self, value: T, now: Duration) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
        superseded
    }

    /// Release the pending value once its quiet period has elapsed
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| p.due <= now) {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// When the pending value becomes due, if there is one
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Run a debouncer over a channel until the sender side closes
///
/// `on_settled` is called with each value that survived a full quiet period.
/// A value still pending when the channel closes is discarded.
#[cfg(feature = "runtime")]
pub async fn drive<T, F>(mut rx: tokio::sync::mpsc::Receiver<T>, delay: Duration, mut on_settled: F)
where
    F: FnMut(T),
{
    let origin = tokio::time::Instant::now();
    let mut debouncer = Debouncer::new(delay);

    loop {
        let deadline = debouncer.deadline().map(|due| origin + due);
        tokio::select! {
            next = rx.recv() => match next {
                Some(value) => {
                    debouncer.schedule(value, origin.elapsed());
                }
                None => break,
            },
            _ = tokio::time::sleep_until(deadline.unwrap_or(origin)), if deadline.is_some() => {
                if let Some(value) = debouncer.poll(origin.elapsed()) {
                    on_settled(value);
                }
            }
        }
    }

    if debouncer.cancel().is_some() {
        tracing::debug!("debounce channel closed with a pending value; discarded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_burst_releases_only_last_value() {
        let mut debouncer = Debouncer::new(ms(300));
        assert!(!debouncer.schedule("r", ms(0)));
        assert!(debouncer.schedule("ro", ms(50)));
        assert!(debouncer.schedule("road", ms(100)));

        assert_eq!(debouncer.deadline(), Some(ms(400)));
        assert_eq!(debouncer.poll(ms(399)), None);
        assert_eq!(debouncer.poll(ms(400)), Some("road"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_values_separated_by_quiet_period_each_fire() {
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule(1, ms(0));
        assert_eq!(debouncer.poll(ms(300)), Some(1));
        debouncer.schedule(2, ms(500));
        assert_eq!(debouncer.poll(ms(800)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new(ms(250));
        debouncer.schedule(1024u32, ms(0));
        assert_eq!(debouncer.cancel(), Some(1024));
        assert_eq!(debouncer.poll(ms(1000)), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_drive_fires_once_per_burst() {
        use std::sync::{Arc, Mutex};
        use tokio::sync::mpsc;

        let (tx, rx) = mpsc::channel(8);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let task = tokio::spawn(drive(rx, ms(300), move |q: String| {
            sink.lock().unwrap().push(q);
        }));

        for q in ["r", "ro", "road"] {
            tx.send(q.to_string()).await.unwrap();
            tokio::time::sleep(ms(40)).await;
        }
        tokio::time::sleep(ms(400)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["road".to_string()]);

        tx.send("bridge".to_string()).await.unwrap();
        drop(tx);
        task.await.unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
