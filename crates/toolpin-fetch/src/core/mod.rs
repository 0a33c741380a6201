//! Pure transformations: progress recovery, diagnostics cleanup and
//! redirect resolution.

mod diagnostics;
mod progress;
mod redirect;

pub use diagnostics::{EMPTY_STDERR, trim_progress_noise};
pub use progress::{ProgressFilter, Throttle, is_reportable, last_percentage, rescan_start};
pub use redirect::{is_redirect, next_hop};
