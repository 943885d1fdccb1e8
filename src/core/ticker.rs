use std::sync::{Arc, Condvar, Mutex, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::feed::Feed;

/// Sleep interval for a tick rate in hertz.
///
/// Non-positive, non-finite, or absurdly small rates disable the ticker
/// (`None`). The interval is what the loop waits between ticks.
pub fn interval_for(freq_hz: f64) -> Option<Duration> {
    if !freq_hz.is_finite() || freq_hz <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / freq_hz).ok()
}

struct Shared {
    stop: Mutex<bool>,
    wake: Condvar,
}

/// Owned handle for the background tick loop.
///
/// The loop fires `Feed::tick` once per interval; one tick is in flight at a
/// time, and the next interval starts only after the previous tick returned.
/// `stop` (or dropping the handle) signals the loop and joins the thread, so
/// once it returns no further tick can land. The thread is released exactly
/// once; stop-then-drop is safe.
pub struct Ticker {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking `feed` at `freq_hz`.
    ///
    /// A disabled rate (see `interval_for`) yields an inert handle that owns
    /// no thread: `is_running` is false and `stop` is a no-op.
    pub fn start(feed: Arc<RwLock<Feed>>, freq_hz: f64) -> Ticker {
        let shared = Arc::new(Shared {
            stop: Mutex::new(false),
            wake: Condvar::new(),
        });

        let Some(period) = interval_for(freq_hz) else {
            info!(freq_hz, "ticker disabled");
            return Ticker {
                shared,
                thread: None,
            };
        };

        debug!(freq_hz, ?period, "ticker starting");
        let thread = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run_loop(&shared, &feed, period))
        };

        Ticker {
            shared,
            thread: Some(thread),
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Signal the loop and wait for it to exit. Any in-flight tick completes;
    /// nothing fires after this returns.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.thread.take() else {
            return;
        };
        if let Ok(mut stop) = self.shared.stop.lock() {
            *stop = true;
        }
        self.shared.wake.notify_all();
        let _ = handle.join();
        debug!("ticker stopped");
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(shared: &Shared, feed: &RwLock<Feed>, period: Duration) {
    let mut stop = match shared.stop.lock() {
        Ok(guard) => guard,
        Err(_) => return,
    };

    loop {
        let (guard, timeout) = match shared.wake.wait_timeout(stop, period) {
            Ok(woken) => woken,
            Err(_) => return,
        };
        stop = guard;

        if *stop {
            return;
        }
        if !timeout.timed_out() {
            // Spurious wakeup: re-arm the wait.
            continue;
        }

        // The stop flag is not held across the tick.
        drop(stop);
        match feed.write() {
            Ok(mut feed) => {
                feed.tick();
            }
            // Poisoned feed lock: a reader panicked. Shut the loop down.
            Err(_) => return,
        }

        stop = match shared.stop.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };
    }
}
