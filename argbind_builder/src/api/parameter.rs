use std::marker::PhantomData;

use crate::api::capture::*;
use crate::api::field::*;
use crate::model::{ArgumentKind, Cardinality};
use crate::parser::{ArgKey, ArgumentSpec, ConfigError, ParameterClass, ParserTree};

/// A typed handle to a registered argument.
///
/// Handles are cheap indices into the [`ArgumentParser`](crate::ArgumentParser); resolve them with
/// [`get`](crate::ArgumentParser::get) and [`arg_mut`](crate::ArgumentParser::arg_mut).
/// A handle becomes stale once the arguments of its command are removed; resolving a stale handle panics.
pub struct Arg<T> {
    pub(crate) key: ArgKey,
    // fn() -> T keeps the handle Copy, Send and Sync regardless of T.
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Arg<T> {
    pub(crate) fn new(key: ArgKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }
}

impl<T> Clone for Arg<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Arg<T> {}

impl<T> std::fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arg").field("key", &self.key).finish()
    }
}

/// A read-only view of a registered argument and its bound values.
pub struct ArgRef<'p, T: Convertible> {
    spec: &'p ArgumentSpec,
    binding: &'p TypedBinding<T>,
}

impl<'p, T: Convertible> ArgRef<'p, T> {
    pub(crate) fn new(tree: &'p ParserTree, arg: &Arg<T>) -> Self {
        Self {
            spec: tree.spec(&arg.key),
            binding: tree.binding::<T>(&arg.key),
        }
    }

    /// Whether the argument was matched during the last parse.
    ///
    /// Positionals exist once their command is parsed; optionals exist once their identifier appears, even without values.
    pub fn exists(&self) -> bool {
        self.spec.exists
    }

    /// Whether at least one value is bound.
    pub fn has_value(&self) -> bool {
        self.binding.has_value()
    }

    /// The first bound value, if any.
    pub fn value(&self) -> Option<&'p T> {
        self.binding.values().first()
    }

    /// All bound values, in Cli order.
    pub fn values(&self) -> &'p [T] {
        self.binding.values()
    }

    /// The identifiers joined with `/` (ex: `-o/--opt`), or the positional name.
    pub fn name(&self) -> String {
        self.spec.name()
    }

    /// The identifiers as registered.
    pub fn identifiers(&self) -> &'p [String] {
        &self.spec.identifiers
    }

    /// The permitted number of values.
    pub fn cardinality(&self) -> Cardinality {
        self.spec.cardinality
    }

    /// The argument kind.
    pub fn kind(&self) -> ArgumentKind {
        self.spec.kind()
    }

    /// Whether the argument must be present.
    /// Positionals are required when their minimum cardinality is non-zero.
    pub fn is_required(&self) -> bool {
        self.spec.is_required()
    }

    /// The help message, if any.
    pub fn help(&self) -> Option<&'p str> {
        self.spec.help.as_deref()
    }
}

impl<'p, T: Convertible> std::fmt::Debug for ArgRef<'p, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = match &self.spec.class {
            ParameterClass::Opt => "Opt",
            ParameterClass::Arg => "Arg",
        };

        write!(
            f,
            "{class}[{t}, {cardinality}, {name}, {values:?}]",
            t = T::TYPE_NAME,
            cardinality = self.spec.cardinality,
            name = self.spec.name(),
            values = self.binding.values(),
        )
    }
}

/// A mutable view of a registered argument, for further configuration.
pub struct ArgMut<'p, T: Convertible> {
    tree: &'p mut ParserTree,
    key: ArgKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<'p, T: Convertible> ArgMut<'p, T> {
    pub(crate) fn new(tree: &'p mut ParserTree, arg: &Arg<T>) -> Self {
        // Resolve once, so stale handles fail here.
        tree.binding::<T>(&arg.key);
        Self {
            tree,
            key: arg.key,
            _phantom: PhantomData,
        }
    }

    /// Require the optional to appear on the Cli.
    /// Positionals are required by their cardinality alone.
    pub fn set_required(self, required: bool) -> Self {
        self.tree.spec_mut(&self.key).required = required;
        self
    }

    /// Document the argument in the help message.
    pub fn help(self, description: impl Into<String>) -> Self {
        self.tree.spec_mut(&self.key).help = Some(description.into());
        self
    }

    fn constrain(self, lo: T::Bound, hi: T::Bound) -> Result<Self, ConfigError> {
        let constraint = Constraint::new(lo, hi)?;
        self.tree.binding_mut::<T>(&self.key).constrain(constraint);
        Ok(self)
    }
}

impl<'p, T: Convertible> std::fmt::Debug for ArgMut<'p, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgMut").field("key", &self.key).finish()
    }
}

impl<'p, T: Numeric> ArgMut<'p, T> {
    /// Restrict values to the inclusive range `[lo, hi]`.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{ArgumentParser, Nargs, ParseError};
    ///
    /// let mut ap = ArgumentParser::new("program");
    /// let level = ap.add_optional::<i32>(&["-l", "--level"], Nargs::Precisely(1)).unwrap();
    /// ap.arg_mut(level).set_range(1, 5).unwrap();
    ///
    /// assert!(matches!(
    ///     ap.parse_tokens(&["-l", "7"]),
    ///     Err(ParseError::OutOfRange { .. })
    /// ));
    /// ```
    pub fn set_range(self, lo: T, hi: T) -> Result<Self, ConfigError> {
        self.constrain(lo, hi)
    }
}

impl<'p> ArgMut<'p, String> {
    /// Restrict values to a length (in characters) within the inclusive range `[lo, hi]`.
    pub fn set_length_range(self, lo: usize, hi: usize) -> Result<Self, ConfigError> {
        self.constrain(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Nargs;
    use crate::parser::ROOT;

    fn register<T: Convertible>(tree: &mut ParserTree, class: ParameterClass, identifiers: &[&str], nargs: Nargs) -> Arg<T> {
        let key = tree
            .add_argument::<T>(ROOT, class, identifiers, Cardinality::try_from(nargs).unwrap())
            .unwrap();
        Arg::new(key)
    }

    #[test]
    fn arg_ref() {
        // Setup
        let mut tree = ParserTree::new("program", "-").unwrap();
        let arg: Arg<u16> = register(&mut tree, ParameterClass::Arg, &["p"], Nargs::AtLeastOne);
        tree.parse(&["3", "1", "2"]).unwrap();

        // Execute
        let view = ArgRef::new(&tree, &arg);

        // Verify
        assert!(view.exists());
        assert!(view.has_value());
        assert_eq!(view.value(), Some(&3));
        assert_eq!(view.values(), &[3, 1, 2]);
        assert_eq!(view.name(), "p");
        assert_eq!(view.kind(), ArgumentKind::Numbers);
        assert!(view.is_required());
        assert_eq!(view.help(), None);
    }

    #[test]
    fn arg_ref_empty() {
        let mut tree = ParserTree::new("program", "-").unwrap();
        let arg: Arg<String> = register(&mut tree, ParameterClass::Opt, &["-o", "--opt"], Nargs::Optional);

        let view = ArgRef::new(&tree, &arg);

        assert!(!view.exists());
        assert!(!view.has_value());
        assert_eq!(view.value(), None);
        assert_eq!(view.name(), "-o/--opt");
        assert_eq!(view.kind(), ArgumentKind::String);
        assert!(!view.is_required());
    }

    #[test]
    fn arg_ref_debug() {
        let mut tree = ParserTree::new("program", "-").unwrap();
        let arg: Arg<i32> = register(&mut tree, ParameterClass::Opt, &["--opt"], Nargs::Precisely(1));
        tree.parse(&["--opt", "5"]).unwrap();

        assert_eq!(format!("{:?}", ArgRef::new(&tree, &arg)), "Opt[i32, 1, --opt, [5]]");
    }

    #[test]
    fn arg_mut() {
        // Setup
        let mut tree = ParserTree::new("program", "-").unwrap();
        let arg: Arg<i32> = register(&mut tree, ParameterClass::Opt, &["--opt"], Nargs::Precisely(1));

        // Execute
        ArgMut::new(&mut tree, &arg)
            .set_required(true)
            .help("the opt")
            .set_range(5, 15)
            .unwrap();

        // Verify
        let view = ArgRef::new(&tree, &arg);
        assert!(view.is_required());
        assert_eq!(view.help(), Some("the opt"));
        assert_matches!(
            tree.parse(&["--opt", "4"]),
            Err(crate::ParseError::OutOfRange { lo, hi, .. }) if lo == "5" && hi == "15"
        );
    }

    #[test]
    fn set_range_invalid() {
        let mut tree = ParserTree::new("program", "-").unwrap();
        let arg: Arg<f64> = register(&mut tree, ParameterClass::Arg, &["p"], Nargs::Precisely(1));

        assert_matches!(
            ArgMut::new(&mut tree, &arg).set_range(1.5, 0.5),
            Err(ConfigError::InvalidRange { .. })
        );
    }

    #[test]
    fn set_length_range() {
        let mut tree = ParserTree::new("program", "-").unwrap();
        let arg: Arg<String> = register(&mut tree, ParameterClass::Arg, &["p"], Nargs::Precisely(1));
        ArgMut::new(&mut tree, &arg).set_length_range(1, 2).unwrap();

        assert_matches!(
            tree.parse(&["abc"]),
            Err(crate::ParseError::LengthError { token, .. }) if token == "abc"
        );
    }
}
