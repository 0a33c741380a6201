//! Per-tool status lines.

use crate::output::Output;
use crate::pipeline::Stage;
use std::collections::HashMap;
use toolpin_resource::Tool;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Pending,
    Downloading(f64),
    Verifying,
    Extracting,
    Linked,
    Failed,
}

impl Status {
    /// Four characters wide: `  0%`, ` 42%`, `100%` or `ERR!`.
    pub fn label(self) -> String {
        match self {
            Self::Pending => "  0%".to_string(),
            Self::Downloading(fraction) => format!("{:>3}%", (fraction * 100.0).round() as u32),
            Self::Verifying | Self::Extracting | Self::Linked => "100%".to_string(),
            Self::Failed => "ERR!".to_string(),
        }
    }

    pub fn line(self, tool: &Tool) -> String {
        format!("{} {} {}", self.label(), tool.name, tool.version)
    }
}

impl From<Stage> for Status {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Downloading(fraction) => Self::Downloading(fraction),
            Stage::Verifying => Self::Verifying,
            Stage::Extracting => Self::Extracting,
        }
    }
}

/// One line per tool, printed in index order and updated in place.
///
/// Updates that would not change a line are dropped. Without cursor
/// control a changed line is appended instead.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    count: usize,
    last: HashMap<usize, String>,
}

impl StatusBoard {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            last: HashMap::new(),
        }
    }

    pub fn render(&mut self, index: usize, text: String, output: &mut dyn Output) {
        let previous = self.last.get(&index);
        if previous == Some(&text) {
            return;
        }
        if previous.is_some() && output.is_interactive() {
            output.rewrite(self.count - index, &text);
        } else {
            output.line(&text);
        }
        self.last.insert(index, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryOutput;

    #[test]
    fn test_labels() {
        assert_eq!(Status::Pending.label(), "  0%");
        assert_eq!(Status::Downloading(0.05).label(), "  5%");
        assert_eq!(Status::Downloading(0.426).label(), " 43%");
        assert_eq!(Status::Verifying.label(), "100%");
        assert_eq!(Status::Extracting.label(), "100%");
        assert_eq!(Status::Linked.label(), "100%");
        assert_eq!(Status::Failed.label(), "ERR!");
    }

    #[test]
    fn test_identical_render_skipped() {
        let mut out = MemoryOutput::new(false);
        let mut board = StatusBoard::new(1);
        board.render(0, "  0% elm 0.19.1".into(), &mut out);
        board.render(0, "  0% elm 0.19.1".into(), &mut out);
        board.render(0, " 10% elm 0.19.1".into(), &mut out);
        board.render(0, " 10% elm 0.19.1".into(), &mut out);
        assert_eq!(out.lines(), ["  0% elm 0.19.1", " 10% elm 0.19.1"]);
    }

    #[test]
    fn test_interactive_updates_in_place() {
        let mut out = MemoryOutput::new(true);
        let mut board = StatusBoard::new(3);
        for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
            board.render(i, format!("  0% {name}"), &mut out);
        }
        assert_eq!(out.rewrites(), 0);

        board.render(1, " 50% b".into(), &mut out);
        board.render(0, "100% a".into(), &mut out);
        board.render(2, "ERR! c".into(), &mut out);
        assert_eq!(out.lines(), ["100% a", " 50% b", "ERR! c"]);
        assert_eq!(out.rewrites(), 3);
    }

    #[test]
    fn test_non_interactive_appends() {
        let mut out = MemoryOutput::new(false);
        let mut board = StatusBoard::new(2);
        board.render(0, "  0% a".into(), &mut out);
        board.render(1, "  0% b".into(), &mut out);
        board.render(0, "100% a".into(), &mut out);
        assert_eq!(out.lines(), ["  0% a", "  0% b", "100% a"]);
        assert_eq!(out.rewrites(), 0);
    }
}
