pub(crate) const DEFAULT_PREFIX_CHARS: &str = "-/";

// Exit code when parsing fails.
pub(crate) const EXIT_FAILURE: i32 = 1;

// Used when the terminal width cannot be determined.
pub(crate) const DEFAULT_TOTAL_WIDTH: usize = 100;

pub(crate) const COLUMN_PADDING: usize = 2;
pub(crate) const HELP_INDENT: usize = 2;

// Wider argument patterns push their help onto the next line.
pub(crate) const MAXIMUM_LEFT_WIDTH: usize = 32;
// Bounded cardinalities with more optional values than this collapse to an ellipsis.
pub(crate) const MAXIMUM_LISTED_EXTRAS: usize = 2;
// Larger minimums render as a count, ex: `M{8}`.
pub(crate) const MAXIMUM_LISTED_VALUES: usize = 4;

pub(crate) const USAGE_PREFIX: &str = "usage:";
pub(crate) const POSITIONAL_SECTION: &str = "positional arguments:";
pub(crate) const OPTIONAL_SECTION: &str = "options:";
