//! Adaptation layer between dynamically typed host values and typed literals.
//!
//! A host (a scripting language binding, a JSON request, a test fixture) hands the kernel untyped
//! values together with the type it wants. Conversion is exact: a value that the requested type
//! cannot represent is rejected with [`Error::InvalidValue`] instead of being rounded, wrapped or
//! truncated. The only relaxation is `literal.float.allowPrecisionLoss` (see
//! [`ConversionOptions`]).
//!
//! Literals travel as json objects `{"type": "<data type>", "value": <value>}`. A missing or
//! `null` value denotes the null literal of that type. Values that json numbers cannot carry are
//! written as strings: non-finite floats (`"NaN"`, `"inf"`, `"-inf"`), decimals (`"123.45"`) and
//! binary data (hex). Dates are days since the epoch, timestamps microseconds since the epoch.

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::config::ConversionOptions;
use crate::expressions::{LiteralNode, Scalar};
use crate::schema::{DataType, DECIMAL_MAX_PRECISION};
use crate::utils::require;
use crate::{Error, KernelResult};

const TYPE_FIELD: &str = "type";
const VALUE_FIELD: &str = "value";

/// Convert a json value into a scalar of `data_type`.
pub fn scalar_from_json(
    value: &Value,
    data_type: &DataType,
    options: &ConversionOptions,
) -> KernelResult<Scalar> {
    let reject = || {
        debug!("Rejected host value {value} for literal of type {data_type}");
        Error::invalid_value(value, data_type)
    };
    let scalar = match (value, data_type) {
        (Value::Null, _) => Scalar::Null(data_type.clone()),
        (Value::Bool(b), DataType::Boolean) => Scalar::Boolean(*b),
        (Value::String(s), DataType::String) => {
            check_length(s.len(), options.max_string_length, value, data_type)?;
            Scalar::String(s.clone())
        }
        (Value::String(s), _) => {
            let scalar = data_type.parse_scalar(s)?;
            if let Scalar::Binary(bytes) | Scalar::FixedSizeBinary(bytes) = &scalar {
                check_length(bytes.len(), options.max_binary_length, value, data_type)?;
            }
            scalar
        }
        (Value::Number(n), DataType::Byte) => {
            Scalar::Byte(json_to_i64(n).and_then(|i| i.try_into().ok()).ok_or_else(reject)?)
        }
        (Value::Number(n), DataType::Short) => {
            Scalar::Short(json_to_i64(n).and_then(|i| i.try_into().ok()).ok_or_else(reject)?)
        }
        (Value::Number(n), DataType::Integer) => {
            Scalar::Integer(json_to_i64(n).and_then(|i| i.try_into().ok()).ok_or_else(reject)?)
        }
        (Value::Number(n), DataType::Long) => Scalar::Long(json_to_i64(n).ok_or_else(reject)?),
        (Value::Number(n), DataType::Date) => {
            Scalar::Date(json_to_i64(n).and_then(|i| i.try_into().ok()).ok_or_else(reject)?)
        }
        (Value::Number(n), DataType::Timestamp) => {
            Scalar::Timestamp(json_to_i64(n).ok_or_else(reject)?)
        }
        (Value::Number(n), DataType::TimestampNtz) => {
            Scalar::TimestampNtz(json_to_i64(n).ok_or_else(reject)?)
        }
        (Value::Number(n), DataType::Double) => Scalar::Double(json_to_f64(n).ok_or_else(reject)?),
        (Value::Number(n), DataType::Float) => {
            let wide = json_to_f64(n).ok_or_else(reject)?;
            let narrow = wide as f32;
            if f64::from(narrow) != wide {
                require!(options.allows_float_precision_loss(), reject());
                debug!("Narrowing {wide} to float {narrow}");
            }
            Scalar::Float(narrow)
        }
        // json numbers keep their textual form, so decimals go through the text parser
        (Value::Number(n), DataType::Decimal(..)) => {
            let text = expand_exponent(&n.to_string()).ok_or_else(reject)?;
            data_type.parse_scalar(&text)?
        }
        _ => return Err(reject()),
    };
    Ok(scalar)
}

/// Convert a scalar into its json representation. The inverse of [`scalar_from_json`].
pub fn scalar_to_json(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Integer(v) | Scalar::Date(v) => Value::from(*v),
        Scalar::Long(v) | Scalar::Timestamp(v) | Scalar::TimestampNtz(v) => Value::from(*v),
        Scalar::Short(v) => Value::from(*v),
        Scalar::Byte(v) => Value::from(*v),
        Scalar::Float(v) => float_to_json(f64::from(*v)),
        Scalar::Double(v) => float_to_json(*v),
        Scalar::String(s) => Value::String(s.clone()),
        Scalar::Boolean(b) => Value::Bool(*b),
        Scalar::Binary(bytes) | Scalar::FixedSizeBinary(bytes) => {
            Value::String(hex::encode(bytes))
        }
        Scalar::Decimal(..) => Value::String(scalar.to_string()),
        Scalar::Null(_) => Value::Null,
    }
}

fn float_to_json(v: f64) -> Value {
    match Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None => Value::String(v.to_string()),
    }
}

/// The value of a json number as an i64, if it is integral and in range.
fn json_to_i64(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    // 2^63 is exactly representable as f64, so the upper bound is exclusive
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// The value of a json number as an f64, if it has an exact f64 representation.
fn json_to_f64(n: &Number) -> Option<f64> {
    if let Some(i) = n.as_i64() {
        let f = i as f64;
        return (f as i128 == i128::from(i)).then_some(f);
    }
    if let Some(u) = n.as_u64() {
        let f = u as f64;
        return (f as i128 == i128::from(u)).then_some(f);
    }
    n.as_f64()
}

/// Rewrites exponent notation (`1e+20`, `1.5e-5`) as plain digits so the decimal parser reads the
/// number exactly. Text without an exponent is returned unchanged.
fn expand_exponent(text: &str) -> Option<String> {
    let Some((mantissa, exponent)) = text.split_once(['e', 'E']) else {
        return Some(text.to_string());
    };
    let exponent: i32 = exponent.parse().ok()?;
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{int_part}{frac_part}");
    // position of the decimal point within `digits`
    let point = i32::try_from(int_part.len()).ok()? + exponent;
    // anything further out cannot fit a decimal's 38 digits
    if point.unsigned_abs() > 2 * u32::from(DECIMAL_MAX_PRECISION) {
        return None;
    }
    let expanded = if point <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= digits.len() {
        format!("{sign}{digits}{}", "0".repeat(point as usize - digits.len()))
    } else {
        let (int_digits, frac_digits) = digits.split_at(point as usize);
        format!("{sign}{int_digits}.{frac_digits}")
    };
    Some(expanded)
}

fn check_length(
    len: usize,
    limit: Option<usize>,
    value: &Value,
    data_type: &DataType,
) -> KernelResult<()> {
    match limit {
        Some(limit) if len > limit => {
            debug!("Rejected {len} byte {data_type} literal, limit is {limit}");
            Err(Error::invalid_value(value, data_type))
        }
        _ => Ok(()),
    }
}

impl LiteralNode {
    /// Read a literal from its json object form `{"type": ..., "value": ...}`.
    pub fn from_json(value: &Value, options: &ConversionOptions) -> KernelResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::unexpected_field_type("literal", "an object"))?;
        let type_value = object
            .get(TYPE_FIELD)
            .ok_or_else(|| Error::missing_field(TYPE_FIELD))?;
        require!(
            type_value.is_string(),
            Error::unexpected_field_type(TYPE_FIELD, "a string")
        );
        let data_type: DataType = serde_json::from_value(type_value.clone()).map_err(|err| {
            debug!("Unknown literal type {type_value}: {err}");
            Error::unexpected_field_type(TYPE_FIELD, "a data type name")
        })?;
        let scalar = scalar_from_json(
            object.get(VALUE_FIELD).unwrap_or(&Value::Null),
            &data_type,
            options,
        )?;
        Self::try_new(&data_type, scalar)
    }

    /// Parse json text and read the literal it contains.
    pub fn from_json_str(json: &str, options: &ConversionOptions) -> KernelResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value, options)
    }

    /// Write this literal in its json object form.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            TYPE_FIELD.to_string(),
            Value::String(self.data_type().to_string()),
        );
        object.insert(VALUE_FIELD.to_string(), scalar_to_json(self.scalar()));
        Value::Object(object)
    }
}
