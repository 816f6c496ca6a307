use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::constant::COLUMN_PADDING;
use crate::parser::ParseError;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// The width of the attached terminal, if any.
pub(crate) fn terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(width), _)| width as usize)
}

/// Renders a left column (argument patterns) beside a wrapped middle column (help text).
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    left: usize,
    middle: usize,
}

impl ColumnRenderer {
    /// Produce a renderer based off the left width.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(left: usize, total_width: usize) -> Self {
        let non_middle = left + COLUMN_PADDING;
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;

        if non_middle + MINIMUM_MIDDLE_WIDTH <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Left column {non_middle} fits within the target total {target_total_width}.");
            }

            Self::new(left, target_total_width - non_middle)
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Left column {non_middle} does not fit within the target total {target_total_width}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.");
            }

            Self::new(left, MINIMUM_MIDDLE_WIDTH)
        }
    }

    pub(crate) fn new(left: usize, middle: usize) -> Self {
        assert!(middle >= 2, "internal error - middle must fit a hyphenation");
        Self { left, middle }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let left = format!("{:indent$}{left}", "");
        let left_width = self.left;
        let padding = format!("{:COLUMN_PADDING$}", "");
        let middle_parts = chunk(middle, self.middle);
        let mut out = Vec::default();

        if middle_parts.is_empty() {
            out.push(left);
            return out;
        }

        let mut parts = middle_parts.into_iter();

        if left.chars().count() <= left_width {
            if let Some(part) = parts.next() {
                out.push(format!("{left:left_width$}{padding}{part}"));
            }
        } else {
            // Too wide for the column; the help starts on the next line.
            out.push(left);
        }

        for part in parts {
            out.push(format!("{:left_width$}{padding}{part}", ""));
        }

        out
    }
}

pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    assert!(width >= 2, "internal error - width must fit a hyphenation");
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(characters[left..].iter());
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }
}
