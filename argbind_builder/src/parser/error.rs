use thiserror::Error;

use crate::model::{ArgumentKind, Cardinality};

/// An owned snapshot of the argument a [`ParseError`] refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentInfo {
    /// The identifiers joined with `/` (ex: `-o/--opt`), or the positional name.
    pub name: String,
    /// The identifiers as registered.
    pub identifiers: Vec<String>,
    /// The permitted number of values.
    pub cardinality: Cardinality,
    /// The display name of the value type (ex: `i32`, `string`).
    pub type_name: &'static str,
    /// The argument kind.
    pub kind: ArgumentKind,
}

/// The failures of a parse.
///
/// Parsing stops at the first failure; each variant carries enough context to render its own message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The number of values available to an argument falls outside its cardinality.
    #[error("argument '{}': expected values count: {}", .argument.name, .argument.cardinality)]
    CardinalityMismatch {
        /// The argument.
        argument: ArgumentInfo,
        /// The number of values actually available.
        actual: usize,
    },

    /// A numeric value falls outside the configured range.
    #[error("argument '{}' value: '{token}' out of range [{lo}..{hi}]", .argument.name)]
    OutOfRange {
        /// The argument.
        argument: ArgumentInfo,
        /// The raw token.
        token: String,
        /// The configured lower bound (inclusive).
        lo: String,
        /// The configured upper bound (inclusive).
        hi: String,
    },

    /// A string value has a length outside the configured range.
    #[error("argument '{}' value: '{token}' string length out of range [{lo}..{hi}]", .argument.name)]
    LengthError {
        /// The argument.
        argument: ArgumentInfo,
        /// The raw token.
        token: String,
        /// The configured minimum length (inclusive).
        lo: String,
        /// The configured maximum length (inclusive).
        hi: String,
    },

    /// A token cannot be converted to the argument's type.
    #[error("argument '{}': invalid {type_name} value: '{token}'", .argument.name)]
    InvalidArgument {
        /// The argument.
        argument: ArgumentInfo,
        /// The raw token.
        token: String,
        /// The display name of the target type.
        type_name: &'static str,
    },

    /// Tokens that matched no argument and no sub-command.
    #[error("unrecognized arguments: {}", quote_all(.tokens))]
    UnrecognizedArguments {
        /// The leftover tokens, in Cli order.
        tokens: Vec<String>,
    },

    /// A required optional never appeared.
    #[error("the following argument is required: '{}'", .argument.name)]
    ArgumentRequired {
        /// The argument.
        argument: ArgumentInfo,
    },

    /// A token in sub-command position matched no registered sub-command.
    #[error("invalid choice: '{given}' (choose from {})", quote_all(.valid))]
    InvalidChoice {
        /// The offending token.
        given: String,
        /// The registered sub-command names, in registration order.
        valid: Vec<String>,
    },
}

fn quote_all(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<String>>()
        .join(", ")
}

/// A contract violation in the registration of the parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A cardinality whose `min` exceeds its `max`.
    #[error("Config error: invalid cardinality, min {min} exceeds max {max}.")]
    InvalidCardinality {
        /// The requested minimum.
        min: usize,
        /// The requested maximum.
        max: usize,
    },

    /// An identifier unsuitable for its position.
    #[error("Config error: invalid identifier '{0}'.")]
    InvalidIdentifier(String),

    /// An optional registered without any identifiers.
    #[error("Config error: an optional argument requires at least one identifier.")]
    MissingIdentifier,

    /// An identifier already in use within the same command.
    #[error("Config error: cannot duplicate the identifier '{0}'.")]
    DuplicateIdentifier(String),

    /// A sub-command name already in use within the same command.
    #[error("Config error: cannot duplicate the sub-command '{0}'.")]
    DuplicateSubCommand(String),

    /// A constraint whose lower bound exceeds its upper bound.
    #[error("Config error: invalid range [{lo}..{hi}].")]
    InvalidRange {
        /// The requested lower bound.
        lo: String,
        /// The requested upper bound.
        hi: String,
    },

    /// An empty prefix character set, or one including digits.
    #[error("Config error: invalid prefix characters '{0}'.")]
    InvalidPrefixChars(String),

    /// A character that is not one of the `?`, `*`, `+` quantifiers.
    #[error("Config error: invalid nargs quantifier '{0}'.")]
    InvalidNargs(char),
}
