//! Where status lines and reports go.

use console::Term;

/// Line-oriented output with optional cursor control.
pub trait Output {
    /// Whether lines already written can be rewritten in place.
    fn is_interactive(&self) -> bool;

    /// Write a line to standard output.
    fn line(&mut self, text: &str);

    /// Write a line to the diagnostic stream.
    fn error_line(&mut self, text: &str);

    /// Replace the line `up` rows above the cursor, then return to where the
    /// cursor was.
    fn rewrite(&mut self, up: usize, text: &str);
}

/// The process's terminal.
#[derive(Debug, Clone)]
pub struct TermOutput {
    stdout: Term,
    stderr: Term,
}

impl TermOutput {
    pub fn new() -> Self {
        Self {
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }
}

impl Default for TermOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TermOutput {
    fn is_interactive(&self) -> bool {
        self.stdout.is_term()
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = self.stdout.write_line(text) {
            tracing::warn!(error = %e, "failed to write to stdout");
        }
    }

    fn error_line(&mut self, text: &str) {
        if let Err(e) = self.stderr.write_line(text) {
            tracing::warn!(error = %e, "failed to write to stderr");
        }
    }

    fn rewrite(&mut self, up: usize, text: &str) {
        let result = self
            .stdout
            .move_cursor_up(up)
            .and_then(|()| self.stdout.clear_line())
            .and_then(|()| self.stdout.write_line(text))
            .and_then(|()| self.stdout.move_cursor_down(up.saturating_sub(1)));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to update status line");
        }
    }
}

/// Records output in memory, simulating a terminal screen when interactive.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    interactive: bool,
    screen: Vec<String>,
    cursor: usize,
    errors: Vec<String>,
    rewrites: usize,
}

impl MemoryOutput {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            ..Self::default()
        }
    }

    /// Standard output as it would appear on screen.
    pub fn lines(&self) -> &[String] {
        &self.screen
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn stdout(&self) -> String {
        self.screen.join("\n")
    }

    pub fn stderr(&self) -> String {
        self.errors.join("\n")
    }

    /// How many times a line was rewritten in place.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }
}

impl Output for MemoryOutput {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn line(&mut self, text: &str) {
        for line in text.split('\n') {
            if self.cursor < self.screen.len() {
                self.screen[self.cursor] = line.to_string();
            } else {
                self.screen.push(line.to_string());
            }
            self.cursor += 1;
        }
    }

    fn error_line(&mut self, text: &str) {
        self.errors.extend(text.split('\n').map(str::to_string));
    }

    fn rewrite(&mut self, up: usize, text: &str) {
        let saved = self.cursor;
        self.cursor = self.cursor.saturating_sub(up);
        self.line(text);
        self.cursor = saved;
        self.rewrites += 1;
    }
}
