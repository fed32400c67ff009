//! Type descriptors for the scalar kinds a literal can carry

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::utils::require;
use crate::{Error, KernelResult};

/// The largest precision a [`DataType::Decimal`] can have (fits in an `i128`).
pub const DECIMAL_MAX_PRECISION: u8 = 38;

/// The logical type of a scalar value.
///
/// Every [`Scalar`](crate::expressions::Scalar) kind maps to exactly one `DataType`, and the type
/// of a literal is derived from the constructor used to build it. The serialized form is the
/// lowercase name of the type, e.g. `"double"`, `"decimal(10,2)"` or `"fixed_size_binary(16)"`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    /// UTF-8 encoded string of characters
    String,
    /// i64: 8-byte signed integer. Range: -9223372036854775808 to 9223372036854775807
    Long,
    /// i32: 4-byte signed integer. Range: -2147483648 to 2147483647
    Integer,
    /// i16: 2-byte signed integer numbers. Range: -32768 to 32767
    Short,
    /// i8: 1-byte signed integer number. Range: -128 to 127
    Byte,
    /// f32: 4-byte single-precision floating-point numbers
    Float,
    /// f64: 8-byte double-precision floating-point numbers
    Double,
    /// bool: boolean values
    Boolean,
    Binary,
    /// i32: days since 1970-01-01
    Date,
    /// Microsecond precision timestamp, adjusted to UTC.
    Timestamp,
    /// Microsecond precision timestamp with no timezone.
    #[serde(rename = "timestamp_ntz")]
    TimestampNtz,
    // untagged variants must come last
    /// Binary values that are always exactly `width` bytes long
    #[serde(
        serialize_with = "serialize_fixed_size_binary",
        deserialize_with = "deserialize_fixed_size_binary",
        untagged
    )]
    FixedSizeBinary(i32),
    #[serde(
        serialize_with = "serialize_decimal",
        deserialize_with = "deserialize_decimal",
        untagged
    )]
    Decimal(u8, u8),
}

fn serialize_decimal<S: serde::Serializer>(
    precision: &u8,
    scale: &u8,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("decimal({},{})", precision, scale))
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<(u8, u8), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let str_value = String::deserialize(deserializer)?;
    let inner = parenthesized(&str_value, "decimal")
        .ok_or_else(|| serde::de::Error::custom(format!("Invalid decimal: {}", str_value)))?;

    let mut parts = inner.split(',');
    let precision = parts
        .next()
        .and_then(|part| part.trim().parse::<u8>().ok())
        .ok_or_else(|| {
            serde::de::Error::custom(format!("Invalid precision in decimal: {}", str_value))
        })?;
    let scale = parts
        .next()
        .and_then(|part| part.trim().parse::<u8>().ok())
        .ok_or_else(|| {
            serde::de::Error::custom(format!("Invalid scale in decimal: {}", str_value))
        })?;
    require!(
        parts.next().is_none(),
        serde::de::Error::custom(format!("Invalid decimal: {}", str_value))
    );
    DataType::check_decimal(precision, scale).map_err(serde::de::Error::custom)?;
    Ok((precision, scale))
}

fn serialize_fixed_size_binary<S: serde::Serializer>(
    width: &i32,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("fixed_size_binary({})", width))
}

fn deserialize_fixed_size_binary<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let str_value = String::deserialize(deserializer)?;
    let width = parenthesized(&str_value, "fixed_size_binary")
        .and_then(|inner| inner.trim().parse::<i32>().ok())
        .ok_or_else(|| {
            serde::de::Error::custom(format!("Invalid fixed_size_binary: {}", str_value))
        })?;
    DataType::check_fixed_size_binary(width).map_err(serde::de::Error::custom)?;
    Ok(width)
}

/// Returns the text between the parentheses of `name(...)`.
fn parenthesized<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .strip_prefix('(')?
        .strip_suffix(')')
}

impl DataType {
    /// Create a decimal type, validating precision and scale
    pub fn decimal(precision: u8, scale: u8) -> KernelResult<Self> {
        Self::check_decimal(precision, scale)?;
        Ok(DataType::Decimal(precision, scale))
    }

    /// Create a fixed size binary type, validating the width
    pub fn fixed_size_binary(width: i32) -> KernelResult<Self> {
        Self::check_fixed_size_binary(width)?;
        Ok(DataType::FixedSizeBinary(width))
    }

    pub(crate) fn check_decimal(precision: u8, scale: u8) -> KernelResult<()> {
        require!(
            0 < precision && precision <= DECIMAL_MAX_PRECISION,
            Error::invalid_decimal(format!(
                "precision must be in range 1..={DECIMAL_MAX_PRECISION}, found {precision}"
            ))
        );
        require!(
            scale <= precision,
            Error::invalid_decimal(format!(
                "scale must be in range 0..={precision}, found {scale}"
            ))
        );
        Ok(())
    }

    pub(crate) fn check_fixed_size_binary(width: i32) -> KernelResult<()> {
        require!(
            width > 0,
            Error::generic(format!("fixed_size_binary width must be positive, found {width}"))
        );
        Ok(())
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::String => write!(f, "string"),
            DataType::Long => write!(f, "long"),
            DataType::Integer => write!(f, "integer"),
            DataType::Short => write!(f, "short"),
            DataType::Byte => write!(f, "byte"),
            DataType::Float => write!(f, "float"),
            DataType::Double => write!(f, "double"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Binary => write!(f, "binary"),
            DataType::FixedSizeBinary(width) => write!(f, "fixed_size_binary({})", width),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::TimestampNtz => write!(f, "timestamp_ntz"),
            DataType::Decimal(precision, scale) => {
                write!(f, "decimal({},{})", precision, scale)
            }
        }
    }
}
