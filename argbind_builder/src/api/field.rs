use std::any::Any;

use crate::api::capture::*;
use crate::model::{TypeGroup, ValueKind};
use crate::parser::ConfigError;

/// An inclusive `[lo, hi]` restriction on the bound of a converted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Constraint<B> {
    lo: B,
    hi: B,
}

impl<B> Constraint<B>
where
    B: Copy + PartialOrd + std::fmt::Display,
{
    pub(crate) fn new(lo: B, hi: B) -> Result<Self, ConfigError> {
        if lo > hi {
            Err(ConfigError::InvalidRange {
                lo: lo.to_string(),
                hi: hi.to_string(),
            })
        } else {
            Ok(Self { lo, hi })
        }
    }

    pub(crate) fn admits(&self, value: B) -> bool {
        !(value < self.lo || value > self.hi)
    }

    pub(crate) fn rendered(&self) -> (String, String) {
        (self.lo.to_string(), self.hi.to_string())
    }
}

/// The failure of binding a single token, without any argument context.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BindError {
    InvalidArgument,
    OutOfRange { lo: String, hi: String },
    LengthError { lo: String, hi: String },
}

/// Behaviour to bind a token into an implicit generic type T.
///
/// We use this at the middle/top of the parser object graph so that arguments of different types may all live in a single node.
pub(crate) trait AnonymousBindable {
    /// Convert, validate and store the `token`.
    fn bind(&mut self, token: &str) -> Result<(), BindError>;

    /// Drop all stored values.
    fn clear(&mut self);

    fn has_value(&self) -> bool;

    fn type_name(&self) -> &'static str;

    fn group(&self) -> TypeGroup;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The storage for one argument of type T.
#[derive(Debug)]
pub(crate) struct TypedBinding<T: Convertible> {
    values: Vec<T>,
    value_kind: ValueKind,
    constraint: Constraint<T::Bound>,
}

impl<T: Convertible> TypedBinding<T> {
    pub(crate) fn new(value_kind: ValueKind) -> Self {
        let (lo, hi) = T::limits();
        Self {
            values: Vec::default(),
            value_kind,
            constraint: Constraint::new(lo, hi)
                .expect("internal error - type limits must form a valid range"),
        }
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn constrain(&mut self, constraint: Constraint<T::Bound>) {
        self.constraint = constraint;
    }

    fn violation(&self) -> BindError {
        let (lo, hi) = self.constraint.rendered();

        match T::GROUP {
            TypeGroup::Numeric => BindError::OutOfRange { lo, hi },
            TypeGroup::Text => BindError::LengthError { lo, hi },
        }
    }
}

impl<T: Convertible> AnonymousBindable for TypedBinding<T> {
    fn bind(&mut self, token: &str) -> Result<(), BindError> {
        let value = match T::convert(token) {
            Ok(value) => value,
            Err(ConversionError::InvalidArgument) => return Err(BindError::InvalidArgument),
            Err(ConversionError::OutOfRange) => return Err(self.violation()),
        };

        if !self.constraint.admits(value.measure()) {
            return Err(self.violation());
        }

        if self.value_kind == ValueKind::Scalar {
            self.values.clear();
        }

        self.values.push(value);
        Ok(())
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn has_value(&self) -> bool {
        !self.values.is_empty()
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn group(&self) -> TypeGroup {
        T::GROUP
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, true)]
    #[case(10, true)]
    #[case(15, true)]
    #[case(4, false)]
    #[case(16, false)]
    fn constraint_admits(#[case] value: i32, #[case] expected: bool) {
        let constraint = Constraint::new(5, 15).unwrap();
        assert_eq!(constraint.admits(value), expected);
    }

    #[test]
    fn constraint_inverted() {
        assert_matches!(
            Constraint::new(15, 5),
            Err(ConfigError::InvalidRange { lo, hi }) if lo == "15" && hi == "5"
        );
    }

    #[test]
    fn constraint_nan() {
        let constraint = Constraint::new(0.0, 1.0).unwrap();
        assert!(constraint.admits(f64::NAN));
    }

    #[test]
    fn bind_scalar() {
        // Setup
        let mut binding: TypedBinding<i32> = TypedBinding::new(ValueKind::Scalar);

        // Execute
        binding.bind("1").unwrap();
        binding.bind("2").unwrap();

        // Verify
        assert_eq!(binding.values(), &[2]);
        assert!(binding.has_value());
    }

    #[test]
    fn bind_sequence() {
        // Setup
        let mut binding: TypedBinding<u8> = TypedBinding::new(ValueKind::Sequence);

        // Execute
        binding.bind("1").unwrap();
        binding.bind("2").unwrap();
        binding.bind("3").unwrap();

        // Verify
        assert_eq!(binding.values(), &[1, 2, 3]);
    }

    #[test]
    fn bind_clear() {
        let mut binding: TypedBinding<String> = TypedBinding::new(ValueKind::Sequence);
        binding.bind("a").unwrap();
        binding.clear();
        assert!(!binding.has_value());
        assert!(binding.values().is_empty());
    }

    #[test]
    fn bind_invalid() {
        let mut binding: TypedBinding<i32> = TypedBinding::new(ValueKind::Scalar);
        assert_eq!(binding.bind("x").unwrap_err(), BindError::InvalidArgument);
        assert!(!binding.has_value());
    }

    #[test]
    fn bind_out_of_range() {
        // Setup
        let mut binding: TypedBinding<i32> = TypedBinding::new(ValueKind::Scalar);
        binding.constrain(Constraint::new(5, 15).unwrap());

        // Execute
        let error = binding.bind("20").unwrap_err();

        // Verify
        assert_eq!(
            error,
            BindError::OutOfRange {
                lo: "5".to_string(),
                hi: "15".to_string()
            }
        );
        assert!(!binding.has_value());
    }

    #[test]
    fn bind_overflow() {
        let mut binding: TypedBinding<u8> = TypedBinding::new(ValueKind::Scalar);
        assert_eq!(
            binding.bind("256").unwrap_err(),
            BindError::OutOfRange {
                lo: "0".to_string(),
                hi: "255".to_string()
            }
        );
    }

    #[rstest]
    #[case("a", true)]
    #[case("ab", true)]
    #[case("", false)]
    #[case("abc", false)]
    fn bind_length(#[case] token: &str, #[case] admitted: bool) {
        // Setup
        let mut binding: TypedBinding<String> = TypedBinding::new(ValueKind::Scalar);
        binding.constrain(Constraint::new(1, 2).unwrap());

        // Execute
        let result = binding.bind(token);

        // Verify
        if admitted {
            assert_eq!(binding.values(), &[token.to_string()]);
        } else {
            assert_matches!(result, Err(BindError::LengthError { .. }));
        }
    }

    #[test]
    fn anonymous_downcast() {
        let mut binding: Box<dyn AnonymousBindable> =
            Box::new(TypedBinding::<f64>::new(ValueKind::Scalar));
        binding.bind("1.5").unwrap();

        assert_eq!(binding.type_name(), "f64");
        assert_eq!(binding.group(), TypeGroup::Numeric);
        let typed = binding
            .as_any()
            .downcast_ref::<TypedBinding<f64>>()
            .unwrap();
        assert_eq!(typed.values(), &[1.5]);
    }
}
