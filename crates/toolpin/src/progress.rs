use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str = "{prefix:.bold} {wide_bar:.cyan/blue} {pos:>3}%";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.progress_chars(PB_CHARS))
});

/// Percentage bar on stderr for one tool download.
#[derive(Debug)]
pub struct PercentBar {
    pb: ProgressBar,
}

impl PercentBar {
    pub fn new(prefix: String) -> Self {
        let pb = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stderr());
        let pb = match PB_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        Self {
            pb: pb.with_prefix(prefix),
        }
    }

    /// `fraction` in `0..=1`.
    pub fn set(&self, fraction: f64) {
        self.pb.set_position(percent(fraction));
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

fn percent(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u64
}
