use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};

/// Percentage tokens printed by progress bars, e.g. `42%`, `42.5%` or `42,5%`.
static PERCENTAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?%").unwrap());

/// The last percentage in `text` as a fraction, if any.
pub fn last_percentage(text: &str) -> Option<f64> {
    let token = PERCENTAGE.find_iter(text).last()?.as_str();
    let number = token.trim_end_matches('%').replace(',', ".");
    number.parse::<f64>().ok().map(|p| p / 100.0)
}

/// Where to resume scanning `seen` for tokens after its first `scanned` bytes.
///
/// Backs up over a number cut off by the previous read, so a token is only
/// ever matched whole and never by a suffix.
pub fn rescan_start(seen: &[u8], scanned: usize) -> usize {
    let scanned = scanned.min(seen.len());
    let cut = seen[..scanned]
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'.' | b','))
        .count();
    scanned - cut
}

/// In-flight progress is strictly between 0 and 1; the ends belong to the caller.
pub fn is_reportable(fraction: f64) -> bool {
    fraction > 0.0 && fraction < 1.0
}

/// Forwards only reportable values that move progress forward.
#[derive(Debug, Clone, Default)]
pub struct ProgressFilter {
    last: f64,
}

impl ProgressFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(&mut self, fraction: f64, sink: &mut dyn FnMut(f64)) {
        if is_reportable(fraction) && fraction > self.last {
            self.last = fraction;
            sink(fraction);
        }
    }
}

/// Lets an event through at most once per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Instant,
}

impl Throttle {
    /// The first event is let through once `interval` has passed since `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last: start,
        }
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
