use std::num::IntErrorKind;
use thiserror::Error;

use crate::model::TypeGroup;

/// The ways a single token fails to convert.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The token is malformed for the target type.
    #[error("invalid argument")]
    InvalidArgument,
    /// The token is well formed, but its magnitude is not representable by the target type.
    #[error("out of range")]
    OutOfRange,
}

/// Behaviour to convert a token into a typed value, and measure it against a constraint.
///
/// Conversion is deterministic and side-effect free; the caller supplies the diagnostic context.
pub trait Convertible: Sized + Clone + std::fmt::Debug + 'static {
    /// The quantity constrained by [`set_range`](crate::ArgMut::set_range) or
    /// [`set_length_range`](crate::ArgMut::set_length_range).
    type Bound: Copy + PartialOrd + std::fmt::Display + std::fmt::Debug + 'static;

    /// The display name of the type, used in error messages.
    const TYPE_NAME: &'static str;

    /// The conversion & constraint rules this type follows.
    const GROUP: TypeGroup;

    /// Convert the full `token` into a value.
    fn convert(token: &str) -> Result<Self, ConversionError>;

    /// The full representable range of the bound (the default constraint).
    fn limits() -> (Self::Bound, Self::Bound);

    /// The quantity of this value checked against a constraint.
    fn measure(&self) -> Self::Bound;
}

/// Marker trait for convertible types constrained by their own value.
pub trait Numeric: Convertible<Bound = Self> + Copy {}

fn integer_error(kind: &IntErrorKind) -> ConversionError {
    match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConversionError::OutOfRange,
        _ => ConversionError::InvalidArgument,
    }
}

macro_rules! numeric_identity {
    ($t:ty) => {
        const GROUP: TypeGroup = TypeGroup::Numeric;

        fn limits() -> (Self, Self) {
            (<$t>::MIN, <$t>::MAX)
        }

        fn measure(&self) -> Self {
            *self
        }
    };
}

macro_rules! convertible_signed {
    ($($t:ty),*) => {
        $(
            impl Convertible for $t {
                type Bound = $t;
                const TYPE_NAME: &'static str = stringify!($t);
                numeric_identity!($t);

                fn convert(token: &str) -> Result<Self, ConversionError> {
                    token
                        .parse::<$t>()
                        .map_err(|error| integer_error(error.kind()))
                }
            }

            impl Numeric for $t {}
        )*
    };
}

macro_rules! convertible_unsigned {
    ($($t:ty),*) => {
        $(
            impl Convertible for $t {
                type Bound = $t;
                const TYPE_NAME: &'static str = stringify!($t);
                numeric_identity!($t);

                fn convert(token: &str) -> Result<Self, ConversionError> {
                    match token.strip_prefix('-') {
                        // A negative magnitude is never representable, but it must still be a number.
                        Some(magnitude) => match magnitude.parse::<$t>() {
                            Ok(_) => Err(ConversionError::OutOfRange),
                            Err(error) => Err(integer_error(error.kind())),
                        },
                        None => token
                            .parse::<$t>()
                            .map_err(|error| integer_error(error.kind())),
                    }
                }
            }

            impl Numeric for $t {}
        )*
    };
}

macro_rules! convertible_float {
    ($($t:ty),*) => {
        $(
            impl Convertible for $t {
                type Bound = $t;
                const TYPE_NAME: &'static str = stringify!($t);
                numeric_identity!($t);

                fn convert(token: &str) -> Result<Self, ConversionError> {
                    let value = token
                        .parse::<$t>()
                        .map_err(|_| ConversionError::InvalidArgument)?;

                    if value.is_infinite() {
                        Err(ConversionError::OutOfRange)
                    } else {
                        Ok(value)
                    }
                }
            }

            impl Numeric for $t {}
        )*
    };
}

convertible_signed!(i8, i16, i32, i64, isize);
convertible_unsigned!(u8, u16, u32, u64, usize);
convertible_float!(f32, f64);

impl Convertible for bool {
    type Bound = bool;
    const TYPE_NAME: &'static str = "bool";
    const GROUP: TypeGroup = TypeGroup::Numeric;

    fn convert(token: &str) -> Result<Self, ConversionError> {
        match token {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConversionError::InvalidArgument),
        }
    }

    fn limits() -> (Self, Self) {
        (false, true)
    }

    fn measure(&self) -> Self {
        *self
    }
}

impl Numeric for bool {}

impl Convertible for String {
    type Bound = usize;
    const TYPE_NAME: &'static str = "string";
    const GROUP: TypeGroup = TypeGroup::Text;

    fn convert(token: &str) -> Result<Self, ConversionError> {
        Ok(token.to_string())
    }

    fn limits() -> (usize, usize) {
        (0, usize::MAX)
    }

    fn measure(&self) -> usize {
        self.chars().count()
    }
}
