use std::time::{Duration, Instant};

/// Rolling estimate of the achieved update rate.
///
/// Feed it the instant of each observed tick; it averages the gaps between
/// the most recent `window` ticks and reports them as ticks per second,
/// FPS-meter style. Displaying the number is the consumer's business.
#[derive(Debug, Clone)]
pub struct RateMeter {
    window: usize,
    gaps: Vec<Duration>,
    last: Option<Instant>,
}

impl RateMeter {
    /// Enough samples to smooth a per-second readout.
    pub const DEFAULT_WINDOW: usize = 60;

    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            gaps: Vec::new(),
            last: None,
        }
    }

    pub fn record(&mut self, now: Instant) {
        if let Some(prev) = self.last {
            self.gaps.push(now.saturating_duration_since(prev));
            if self.gaps.len() > self.window {
                self.gaps.remove(0);
            }
        }
        self.last = Some(now);
    }

    /// Number of gap samples currently in the window.
    pub fn samples(&self) -> usize {
        self.gaps.len()
    }

    /// 0.0 until at least two ticks have been recorded.
    pub fn ticks_per_sec(&self) -> f64 {
        if self.gaps.is_empty() {
            return 0.0;
        }
        let total: Duration = self.gaps.iter().sum();
        let avg = total.as_secs_f64() / self.gaps.len() as f64;
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.gaps.clear();
        self.last = None;
    }
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}
