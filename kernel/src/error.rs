//! Definitions of errors that the expression kernel can encounter

use std::backtrace::{Backtrace, BacktraceStatus};

use crate::schema::DataType;

/// A [`std::result::Result`] that has the kernel [`Error`] as the error variant
pub type KernelResult<T, E = Error> = std::result::Result<T, E>;

/// All the types of errors that the kernel can run into
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    // This is an error that includes a backtrace. To have a particular type of error include such
    // backtrace (when RUST_BACKTRACE=1), annotate the error with `#[error(transparent)]` and then
    // add the error type and enum variant to the `from_with_backtrace!` macro invocation below. See
    // MalformedJson for an example.
    #[error("{source}\n{backtrace}")]
    Backtraced {
        source: Box<Self>,
        backtrace: Box<Backtrace>,
    },

    /// An error performing operations on arrow data types
    #[cfg(feature = "arrow-conversion")]
    #[error(transparent)]
    Arrow(arrow_schema::ArrowError),

    /// A generic error with a message
    #[error("Generic expression kernel error: {0}")]
    Generic(String),

    /// The raw value cannot be represented exactly by the requested scalar kind
    #[error("Invalid value '{value}' for literal of type '{data_type}'")]
    InvalidValue { value: String, data_type: DataType },

    /// The value of a null literal was requested
    #[error("Cannot access the value of a null literal of type '{0}'")]
    NullValueAccess(DataType),

    /// A scalar was extracted as a native type that does not match its kind
    #[error("Expected a scalar of type '{expected}' but found '{actual}'")]
    ScalarTypeMismatch { expected: String, actual: DataType },

    /// Precision or scale of a decimal type are out of range
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// A required field is missing from a host value
    #[error("Field '{0}' not found")]
    MissingField(String),

    /// A field of a host value has the wrong json type
    #[error("Field '{field}' was not {expected}")]
    UnexpectedFieldType { field: String, expected: &'static str },

    /// The conversion options map could not be parsed
    #[error("Invalid conversion options: {0}")]
    InvalidConversionOptions(String),

    #[error(transparent)]
    MalformedJson(serde_json::Error),
}

// Convenience constructors for Error types that take a String argument
impl Error {
    pub fn generic(msg: impl ToString) -> Self {
        Self::Generic(msg.to_string())
    }
    pub fn invalid_value(value: impl ToString, data_type: &DataType) -> Self {
        Self::InvalidValue {
            value: value.to_string(),
            data_type: data_type.clone(),
        }
    }
    pub fn null_value_access(data_type: &DataType) -> Self {
        Self::NullValueAccess(data_type.clone())
    }
    pub fn scalar_type_mismatch(expected: impl ToString, actual: DataType) -> Self {
        Self::ScalarTypeMismatch {
            expected: expected.to_string(),
            actual,
        }
    }
    pub fn invalid_decimal(msg: impl ToString) -> Self {
        Self::InvalidDecimal(msg.to_string())
    }
    pub fn missing_field(field: impl ToString) -> Self {
        Self::MissingField(field.to_string())
    }
    pub fn unexpected_field_type(field: impl ToString, expected: &'static str) -> Self {
        Self::UnexpectedFieldType {
            field: field.to_string(),
            expected,
        }
    }
    pub fn invalid_conversion_options(err: impl ToString) -> Self {
        Self::InvalidConversionOptions(err.to_string())
    }

    // Capture a backtrace when the error is constructed.
    #[must_use]
    pub fn with_backtrace(self) -> Self {
        let backtrace = Backtrace::capture();
        match backtrace.status() {
            BacktraceStatus::Captured => Self::Backtraced {
                source: Box::new(self),
                backtrace: Box::new(backtrace),
            },
            _ => self,
        }
    }
}

macro_rules! from_with_backtrace(
    ( $(($error_type: ty, $error_variant: ident)), * ) => {
        $(
            impl From<$error_type> for Error {
                fn from(value: $error_type) -> Self {
                    Self::$error_variant(value).with_backtrace()
                }
            }
        )*
    };
);

from_with_backtrace!((serde_json::Error, MalformedJson));

#[cfg(feature = "arrow-conversion")]
impl From<arrow_schema::ArrowError> for Error {
    fn from(value: arrow_schema::ArrowError) -> Self {
        Self::Arrow(value).with_backtrace()
    }
}
