use once_cell::sync::Lazy;
use regex::Regex;

/// Shown in place of diagnostics when a program printed nothing useful.
pub const EMPTY_STDERR: &str = "(empty stderr)";

/// Remnants of curl's progress bar at the start of its stderr.
static PROGRESS_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s#O=-]+").unwrap());

pub fn trim_progress_noise(stderr: &str) -> String {
    let trimmed = PROGRESS_NOISE.replace(stderr.trim(), "");
    if trimmed.is_empty() {
        EMPTY_STDERR.to_string()
    } else {
        trimmed.into_owned()
    }
}
