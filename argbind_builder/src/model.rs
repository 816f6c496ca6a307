use crate::parser::ConfigError;

/// Sentinel `max` for a [`Cardinality`] without an upper bound.
pub const UNBOUNDED: usize = usize::MAX;

/// The cardinality of inputs to match for an argument.
///
/// Inspired by argparse: <https://docs.python.org/3/library/argparse.html#nargs>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// `N`: Precisely `N` values.
    Precisely(usize),
    /// `?`: Zero or one value.
    Optional,
    /// `*`: May be any number of values, including `0`.
    Any,
    /// `+`: At least one value must be specified.
    AtLeastOne,
    /// `min..max`: Between `min` and `max` values (inclusive).
    Range(usize, usize),
}

impl std::fmt::Display for Nargs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nargs::Precisely(n) => write!(f, "{n}"),
            Nargs::Optional => write!(f, "?"),
            Nargs::Any => write!(f, "*"),
            Nargs::AtLeastOne => write!(f, "+"),
            Nargs::Range(min, max) => write!(f, "{min}..{max}"),
        }
    }
}

impl TryFrom<char> for Nargs {
    type Error = ConfigError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '?' => Ok(Nargs::Optional),
            '*' => Ok(Nargs::Any),
            '+' => Ok(Nargs::AtLeastOne),
            _ => Err(ConfigError::InvalidNargs(value)),
        }
    }
}

/// The closed interval `[min, max]` of values an argument may bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    min: usize,
    max: usize,
}

impl Cardinality {
    /// Create a cardinality, enforcing `min <= max`.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{Cardinality, UNBOUNDED};
    ///
    /// assert!(Cardinality::new(2, 3).is_ok());
    /// assert!(Cardinality::new(1, UNBOUNDED).is_ok());
    /// assert!(Cardinality::new(3, 2).is_err());
    /// ```
    pub fn new(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min <= max {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::InvalidCardinality { min, max })
        }
    }

    /// The minimum number of values.
    pub fn min(&self) -> usize {
        self.min
    }

    /// The maximum number of values ([`UNBOUNDED`] when there is none).
    pub fn max(&self) -> usize {
        self.max
    }

    /// Whether the cardinality has no upper bound.
    pub fn is_unbounded(&self) -> bool {
        self.max == UNBOUNDED
    }

    /// Whether `count` values satisfy this cardinality.
    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }

    /// Scalar when at most one value may be bound, sequence otherwise.
    pub fn value_kind(&self) -> ValueKind {
        if self.max > 1 {
            ValueKind::Sequence
        } else {
            ValueKind::Scalar
        }
    }
}

impl TryFrom<Nargs> for Cardinality {
    type Error = ConfigError;

    fn try_from(value: Nargs) -> Result<Self, Self::Error> {
        match value {
            Nargs::Precisely(n) => Cardinality::new(n, n),
            Nargs::Optional => Cardinality::new(0, 1),
            Nargs::Any => Cardinality::new(0, UNBOUNDED),
            Nargs::AtLeastOne => Cardinality::new(1, UNBOUNDED),
            Nargs::Range(min, max) => Cardinality::new(min, max),
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else if self.is_unbounded() {
            write!(f, "{}..∞", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// Whether an argument stores one value or an ordered list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// At most one value.
    Scalar,
    /// Any number of values, in Cli order.
    Sequence,
}

/// The family of conversion & constraint rules a type follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeGroup {
    /// Constrained by an inclusive value range.
    Numeric,
    /// Constrained by an inclusive length range.
    Text,
}

/// The closed set of argument kinds: type group crossed with value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// A single numeric (or boolean) value.
    Number,
    /// A sequence of numeric (or boolean) values.
    Numbers,
    /// A single string value.
    String,
    /// A sequence of string values.
    Strings,
}

impl ArgumentKind {
    pub(crate) fn new(group: TypeGroup, value_kind: ValueKind) -> Self {
        match (group, value_kind) {
            (TypeGroup::Numeric, ValueKind::Scalar) => ArgumentKind::Number,
            (TypeGroup::Numeric, ValueKind::Sequence) => ArgumentKind::Numbers,
            (TypeGroup::Text, ValueKind::Scalar) => ArgumentKind::String,
            (TypeGroup::Text, ValueKind::Sequence) => ArgumentKind::Strings,
        }
    }
}
