use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::schema::DataType;
use crate::utils::require;
use crate::{Error, KernelResult};

/// A single value of one of the kernel's scalar kinds.
///
/// Floating point scalars compare by bit pattern: `NaN` equals itself (for the same payload) and
/// `0.0` does not equal `-0.0`.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// 32bit integer
    Integer(i32),
    /// 64bit integer
    Long(i64),
    /// 16bit integer
    Short(i16),
    /// 8bit integer
    Byte(i8),
    /// 32bit floating point
    Float(f32),
    /// 64bit floating point
    Double(f64),
    /// utf-8 encoded string.
    String(String),
    /// true or false value
    Boolean(bool),
    /// Microsecond precision timestamp, adjusted to UTC.
    Timestamp(i64),
    /// Microsecond precision timestamp, with no timezone.
    TimestampNtz(i64),
    /// Date stored as a signed 32bit int days since UNIX epoch 1970-01-01
    Date(i32),
    /// Binary data
    Binary(Vec<u8>),
    /// Binary data whose length is part of its type
    FixedSizeBinary(Vec<u8>),
    /// Decimal value with a given precision and scale.
    Decimal(i128, u8, u8),
    /// Null value with a given data type.
    Null(DataType),
}

impl Scalar {
    /// Returns the data type of this scalar.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Long(_) => DataType::Long,
            Self::Short(_) => DataType::Short,
            Self::Byte(_) => DataType::Byte,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
            Self::String(_) => DataType::String,
            Self::Boolean(_) => DataType::Boolean,
            Self::Timestamp(_) => DataType::Timestamp,
            Self::TimestampNtz(_) => DataType::TimestampNtz,
            Self::Date(_) => DataType::Date,
            Self::Binary(_) => DataType::Binary,
            // constructors bound the length by a positive i32 width
            Self::FixedSizeBinary(bytes) => DataType::FixedSizeBinary(bytes.len() as i32),
            Self::Decimal(_, precision, scale) => DataType::Decimal(*precision, *scale),
            Self::Null(data_type) => data_type.clone(),
        }
    }

    /// Returns true if this scalar is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Create a decimal scalar, checking that `value` fits in `precision` digits.
    pub fn decimal(value: i128, precision: u8, scale: u8) -> KernelResult<Self> {
        let data_type = DataType::decimal(precision, scale)?;
        require!(
            fits_precision(value, precision),
            Error::invalid_value(format_decimal(value, scale), &data_type)
        );
        Ok(Self::Decimal(value, precision, scale))
    }

    /// Create a fixed size binary scalar, checking that `bytes` is exactly `width` long.
    pub fn fixed_size_binary(bytes: impl Into<Vec<u8>>, width: i32) -> KernelResult<Self> {
        let data_type = DataType::fixed_size_binary(width)?;
        let bytes = bytes.into();
        require!(
            i32::try_from(bytes.len()) == Ok(width),
            Error::invalid_value(hex::encode(&bytes), &data_type)
        );
        Ok(Self::FixedSizeBinary(bytes))
    }

    /// Re-checks the constraints a scalar's kind imposes on its value. Scalars built through the
    /// checked constructors always pass; this catches hand-assembled variants.
    pub(crate) fn validate(&self) -> KernelResult<()> {
        match self {
            Self::Decimal(value, precision, scale) => {
                Self::decimal(*value, *precision, *scale).map(|_| ())
            }
            Self::FixedSizeBinary(bytes) => {
                let width = i32::try_from(bytes.len()).map_err(|_| {
                    Error::generic(format!("fixed size binary of {} bytes", bytes.len()))
                })?;
                DataType::check_fixed_size_binary(width)
            }
            Self::Null(DataType::Decimal(precision, scale)) => {
                DataType::check_decimal(*precision, *scale)
            }
            Self::Null(DataType::FixedSizeBinary(width)) => {
                DataType::check_fixed_size_binary(*width)
            }
            _ => Ok(()),
        }
    }
}

fn fits_precision(value: i128, precision: u8) -> bool {
    10u128
        .checked_pow(u32::from(precision))
        .map_or(true, |limit| value.unsigned_abs() < limit)
}

fn format_decimal(value: i128, scale: u8) -> String {
    if scale == 0 {
        return value.to_string();
    }
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    // a scale above 38 only reaches here through a hand-assembled scalar
    let (int_part, frac_part) = match 10u128.checked_pow(u32::from(scale)) {
        Some(divisor) => (abs / divisor, abs % divisor),
        None => (0, abs),
    };
    format!(
        "{sign}{int_part}.{frac_part:0width$}",
        width = scale as usize
    )
}

// NaiveDate defaults to 1970-01-01
fn unix_epoch() -> NaiveDate {
    NaiveDate::default()
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Long(i) => write!(f, "{}", i),
            Self::Short(i) => write!(f, "{}", i),
            Self::Byte(i) => write!(f, "{}", i),
            Self::Float(fl) => write!(f, "{}", fl),
            Self::Double(fl) => write!(f, "{}", fl),
            Self::String(s) => write!(f, "'{}'", s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Timestamp(ts) => match DateTime::<Utc>::from_timestamp_micros(*ts) {
                Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Micros, true)),
                None => write!(f, "{}", ts),
            },
            Self::TimestampNtz(ts) => match DateTime::<Utc>::from_timestamp_micros(*ts) {
                Some(dt) => write!(f, "{}", dt.naive_utc().format("%Y-%m-%d %H:%M:%S%.6f")),
                None => write!(f, "{}", ts),
            },
            Self::Date(days) => {
                match unix_epoch().checked_add_signed(Duration::days(i64::from(*days))) {
                    Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
                    None => write!(f, "{}", days),
                }
            }
            Self::Binary(b) | Self::FixedSizeBinary(b) => write!(f, "{}", hex::encode(b)),
            Self::Decimal(value, _, scale) => write!(f, "{}", format_decimal(*value, *scale)),
            Self::Null(_) => write!(f, "null"),
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        use Scalar::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Byte(a), Byte(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            (TimestampNtz(a), TimestampNtz(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (Binary(a), Binary(b)) => a == b,
            (FixedSizeBinary(a), FixedSizeBinary(b)) => a == b,
            (Decimal(a, a_precision, a_scale), Decimal(b, b_precision, b_scale)) => {
                a == b && a_precision == b_precision && a_scale == b_scale
            }
            (Null(a), Null(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(v) | Self::Date(v) => v.hash(state),
            Self::Long(v) | Self::Timestamp(v) | Self::TimestampNtz(v) => v.hash(state),
            Self::Short(v) => v.hash(state),
            Self::Byte(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Binary(v) | Self::FixedSizeBinary(v) => v.hash(state),
            Self::Decimal(v, precision, scale) => (v, precision, scale).hash(state),
            Self::Null(data_type) => data_type.hash(state),
        }
    }
}

/// Scalars are only ordered against non-null scalars of the same type. Floating point values use
/// the IEEE 754 total order so that ordering agrees with bitwise equality.
impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Scalar::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a.partial_cmp(b),
            (Long(a), Long(b)) => a.partial_cmp(b),
            (Short(a), Short(b)) => a.partial_cmp(b),
            (Byte(a), Byte(b)) => a.partial_cmp(b),
            (Float(a), Float(b)) => Some(a.total_cmp(b)),
            (Double(a), Double(b)) => Some(a.total_cmp(b)),
            (String(a), String(b)) => a.partial_cmp(b),
            (Boolean(a), Boolean(b)) => a.partial_cmp(b),
            (Timestamp(a), Timestamp(b)) => a.partial_cmp(b),
            (TimestampNtz(a), TimestampNtz(b)) => a.partial_cmp(b),
            (Date(a), Date(b)) => a.partial_cmp(b),
            (Binary(a), Binary(b)) => a.partial_cmp(b),
            (FixedSizeBinary(a), FixedSizeBinary(b)) if a.len() == b.len() => a.partial_cmp(b),
            (Decimal(a, a_precision, a_scale), Decimal(b, b_precision, b_scale))
                if a_precision == b_precision && a_scale == b_scale =>
            {
                a.partial_cmp(b)
            }
            _ => None,
        }
    }
}

impl From<i8> for Scalar {
    fn from(i: i8) -> Self {
        Self::Byte(i)
    }
}

impl From<i16> for Scalar {
    fn from(i: i16) -> Self {
        Self::Short(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Self::Integer(i)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Long(i)
    }
}

impl From<f32> for Scalar {
    fn from(i: f32) -> Self {
        Self::Float(i)
    }
}

impl From<f64> for Scalar {
    fn from(i: f64) -> Self {
        Self::Double(i)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Self::Binary(value)
    }
}

impl From<&[u8]> for Scalar {
    fn from(b: &[u8]) -> Self {
        Self::Binary(b.into())
    }
}

impl From<NaiveDate> for Scalar {
    fn from(date: NaiveDate) -> Self {
        // every NaiveDate is within i32 days of the epoch
        Self::Date(date.signed_duration_since(unix_epoch()).num_days() as i32)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts.timestamp_micros())
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(ts: NaiveDateTime) -> Self {
        Self::TimestampNtz(ts.and_utc().timestamp_micros())
    }
}

// Extracting a native value checks the kind, and refuses to hand out a value for null.
macro_rules! impl_try_from_scalar(
    ( $(($native: ty, $variant: ident)), * ) => {
        $(
            impl TryFrom<Scalar> for $native {
                type Error = Error;

                fn try_from(scalar: Scalar) -> KernelResult<Self> {
                    match scalar {
                        Scalar::$variant(value) => Ok(value),
                        Scalar::Null(data_type) => Err(Error::NullValueAccess(data_type)),
                        other => Err(Error::scalar_type_mismatch(
                            DataType::$variant,
                            other.data_type(),
                        )),
                    }
                }
            }
        )*
    };
);

impl_try_from_scalar!(
    (i8, Byte),
    (i16, Short),
    (i32, Integer),
    (i64, Long),
    (f32, Float),
    (f64, Double),
    (bool, Boolean),
    (String, String)
);

impl TryFrom<Scalar> for Vec<u8> {
    type Error = Error;

    fn try_from(scalar: Scalar) -> KernelResult<Self> {
        match scalar {
            Scalar::Binary(bytes) | Scalar::FixedSizeBinary(bytes) => Ok(bytes),
            Scalar::Null(data_type) => Err(Error::NullValueAccess(data_type)),
            other => Err(Error::scalar_type_mismatch("binary", other.data_type())),
        }
    }
}

impl DataType {
    /// Parses a textual raw value into a [`Scalar`] of this type.
    ///
    /// Integers must fit the target width, floats accept `NaN` and `inf`/`infinity`, dates use
    /// `%Y-%m-%d`, timestamps accept RFC 3339 or `%Y-%m-%d %H:%M:%S%.f` (the latter is read as
    /// UTC), binary values are hex encoded, and decimals are plain `[-+]digits[.digits]` text that
    /// must fit the type's precision and scale.
    pub fn parse_scalar(&self, raw: &str) -> KernelResult<Scalar> {
        use DataType::*;

        match self {
            String => Ok(Scalar::String(raw.to_string())),
            Byte => self.str_parse_scalar(raw, Scalar::Byte),
            Short => self.str_parse_scalar(raw, Scalar::Short),
            Integer => self.str_parse_scalar(raw, Scalar::Integer),
            Long => self.str_parse_scalar(raw, Scalar::Long),
            Float => self.str_parse_scalar(raw, Scalar::Float),
            Double => self.str_parse_scalar(raw, Scalar::Double),
            Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(Scalar::Boolean(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(Scalar::Boolean(false))
                } else {
                    Err(self.parse_error(raw))
                }
            }
            Binary => hex::decode(raw)
                .map(Scalar::Binary)
                .map_err(|_| self.parse_error(raw)),
            FixedSizeBinary(width) => {
                let bytes = hex::decode(raw).map_err(|_| self.parse_error(raw))?;
                Scalar::fixed_size_binary(bytes, *width)
            }
            Date => {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| self.parse_error(raw))?;
                Ok(date.into())
            }
            Timestamp => {
                let micros = match DateTime::parse_from_rfc3339(raw) {
                    Ok(ts) => ts.timestamp_micros(),
                    Err(_) => parse_naive_timestamp(raw)
                        .ok_or_else(|| self.parse_error(raw))?
                        .and_utc()
                        .timestamp_micros(),
                };
                Ok(Scalar::Timestamp(micros))
            }
            TimestampNtz => {
                let ts = parse_naive_timestamp(raw).ok_or_else(|| self.parse_error(raw))?;
                Ok(ts.into())
            }
            Decimal(precision, scale) => {
                DataType::check_decimal(*precision, *scale)?;
                let value =
                    parse_decimal(raw, *precision, *scale).ok_or_else(|| self.parse_error(raw))?;
                Ok(Scalar::Decimal(value, *precision, *scale))
            }
        }
    }

    fn parse_error(&self, raw: &str) -> Error {
        debug!("Rejected raw value '{raw}' for literal of type {self}");
        Error::invalid_value(raw, self)
    }

    fn str_parse_scalar<T: std::str::FromStr>(
        &self,
        raw: &str,
        f: impl FnOnce(T) -> Scalar,
    ) -> KernelResult<Scalar> {
        match raw.parse() {
            Ok(val) => Ok(f(val)),
            Err(..) => Err(self.parse_error(raw)),
        }
    }
}

fn parse_naive_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Parses `[-+]digits[.digits]` into an unscaled decimal value. Fractional digits beyond `scale`
/// and integral digits beyond `precision - scale` are rejected rather than rounded.
fn parse_decimal(raw: &str, precision: u8, scale: u8) -> Option<i128> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) || frac_part.len() > scale as usize {
        return None;
    }
    let int_part = int_part.trim_start_matches('0');
    if int_part.len() + scale as usize > precision as usize {
        return None;
    }
    let unscaled = format!("{int_part}{frac_part:0<width$}", width = scale as usize);
    let value: i128 = if unscaled.is_empty() {
        0
    } else {
        unscaled.parse().ok()?
    };
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_data_type_per_kind() {
        let cases = [
            (Scalar::Integer(1), DataType::Integer),
            (Scalar::Long(1), DataType::Long),
            (Scalar::Short(1), DataType::Short),
            (Scalar::Byte(1), DataType::Byte),
            (Scalar::Float(1.0), DataType::Float),
            (Scalar::Double(1.5), DataType::Double),
            (Scalar::String("a".into()), DataType::String),
            (Scalar::Boolean(true), DataType::Boolean),
            (Scalar::Timestamp(0), DataType::Timestamp),
            (Scalar::TimestampNtz(0), DataType::TimestampNtz),
            (Scalar::Date(0), DataType::Date),
            (Scalar::Binary(vec![1]), DataType::Binary),
            (
                Scalar::FixedSizeBinary(vec![1, 2]),
                DataType::FixedSizeBinary(2),
            ),
            (Scalar::Decimal(123, 5, 2), DataType::Decimal(5, 2)),
            (Scalar::Null(DataType::Double), DataType::Double),
        ];
        for (scalar, expected) in cases {
            assert_eq!(scalar.data_type(), expected);
        }
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        assert_eq!(Scalar::Double(f64::NAN), Scalar::Double(f64::NAN));
        assert_ne!(Scalar::Double(0.0), Scalar::Double(-0.0));
        assert_ne!(Scalar::Float(0.0), Scalar::Float(-0.0));
        assert_eq!(Scalar::Double(1.5), Scalar::Double(1.5));
        assert_ne!(Scalar::Double(1.5), Scalar::Double(2.5));
        // same value, different kind
        assert_ne!(Scalar::Double(1.0), Scalar::Float(1.0));
        assert_ne!(Scalar::Integer(1), Scalar::Long(1));
    }

    #[test]
    fn test_null_equality() {
        assert_eq!(Scalar::Null(DataType::Double), Scalar::Null(DataType::Double));
        assert_ne!(Scalar::Null(DataType::Double), Scalar::Null(DataType::Float));
        assert_ne!(Scalar::Null(DataType::Double), Scalar::Double(0.0));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let set: HashSet<Scalar> = [
            Scalar::Double(f64::NAN),
            Scalar::Double(f64::NAN),
            Scalar::Double(0.0),
            Scalar::Double(-0.0),
            Scalar::Integer(7),
            Scalar::Date(7),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_partial_cmp() {
        assert!(Scalar::Integer(1) < Scalar::Integer(2));
        assert!(Scalar::Double(-0.0) < Scalar::Double(0.0));
        assert_eq!(
            Scalar::Double(f64::NAN).partial_cmp(&Scalar::Double(f64::NAN)),
            Some(Ordering::Equal)
        );
        assert_eq!(Scalar::Integer(1).partial_cmp(&Scalar::Long(1)), None);
        assert_eq!(
            Scalar::Null(DataType::Integer).partial_cmp(&Scalar::Integer(1)),
            None
        );
        assert_eq!(
            Scalar::Decimal(1, 5, 2).partial_cmp(&Scalar::Decimal(1, 5, 3)),
            None
        );
        assert!(Scalar::Decimal(1, 5, 2) < Scalar::Decimal(2, 5, 2));
    }

    #[test]
    fn test_display() {
        let cases = [
            (Scalar::Double(1.5), "1.5"),
            (Scalar::Integer(-3), "-3"),
            (Scalar::String("foo".into()), "'foo'"),
            (Scalar::Boolean(false), "false"),
            (Scalar::Date(0), "1970-01-01"),
            (Scalar::Date(19723), "2024-01-01"),
            (Scalar::Timestamp(0), "1970-01-01T00:00:00.000000Z"),
            (Scalar::TimestampNtz(1_500_000), "1970-01-01 00:00:01.500000"),
            (Scalar::Binary(vec![0xde, 0xad]), "dead"),
            (Scalar::Decimal(12345, 7, 2), "123.45"),
            (Scalar::Decimal(-5, 3, 2), "-0.05"),
            (Scalar::Decimal(42, 2, 0), "42"),
            (Scalar::Null(DataType::Double), "null"),
        ];
        for (scalar, expected) in cases {
            assert_eq!(scalar.to_string(), expected);
        }
    }

    #[test]
    fn test_decimal_constructor() {
        assert_eq!(
            Scalar::decimal(99999, 5, 2).unwrap(),
            Scalar::Decimal(99999, 5, 2)
        );
        assert!(matches!(
            Scalar::decimal(100000, 5, 2),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            Scalar::decimal(-100000, 5, 2),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            Scalar::decimal(1, 39, 2),
            Err(Error::InvalidDecimal(_))
        ));
    }

    #[test]
    fn test_fixed_size_binary_constructor() {
        assert_eq!(
            Scalar::fixed_size_binary(vec![1, 2, 3], 3).unwrap(),
            Scalar::FixedSizeBinary(vec![1, 2, 3])
        );
        assert!(matches!(
            Scalar::fixed_size_binary(vec![1, 2], 3),
            Err(Error::InvalidValue { .. })
        ));
        assert!(Scalar::fixed_size_binary(vec![], 0).is_err());
    }

    #[test]
    fn test_parse_scalar() {
        let cases = [
            (DataType::Double, "1.5", Scalar::Double(1.5)),
            (DataType::Double, "-inf", Scalar::Double(f64::NEG_INFINITY)),
            (DataType::Double, "Infinity", Scalar::Double(f64::INFINITY)),
            (DataType::Float, "0.25", Scalar::Float(0.25)),
            (DataType::Integer, "-42", Scalar::Integer(-42)),
            (DataType::Long, "9223372036854775807", Scalar::Long(i64::MAX)),
            (DataType::Short, "300", Scalar::Short(300)),
            (DataType::Byte, "-128", Scalar::Byte(i8::MIN)),
            (DataType::Boolean, "TRUE", Scalar::Boolean(true)),
            (DataType::String, "hello", Scalar::String("hello".into())),
            (DataType::Binary, "00ff", Scalar::Binary(vec![0x00, 0xff])),
            (
                DataType::FixedSizeBinary(2),
                "00ff",
                Scalar::FixedSizeBinary(vec![0x00, 0xff]),
            ),
            (DataType::Date, "2024-01-01", Scalar::Date(19723)),
            (
                DataType::Timestamp,
                "1970-01-01T00:00:01+00:00",
                Scalar::Timestamp(1_000_000),
            ),
            (
                DataType::Timestamp,
                "1970-01-01T01:00:00+01:00",
                Scalar::Timestamp(0),
            ),
            (
                DataType::Timestamp,
                "1970-01-01 00:00:00.000001",
                Scalar::Timestamp(1),
            ),
            (
                DataType::TimestampNtz,
                "1970-01-01 00:00:02",
                Scalar::TimestampNtz(2_000_000),
            ),
            (DataType::Decimal(5, 2), "123.4", Scalar::Decimal(12340, 5, 2)),
            (DataType::Decimal(5, 2), "-0.05", Scalar::Decimal(-5, 5, 2)),
            (DataType::Decimal(5, 2), "+007", Scalar::Decimal(700, 5, 2)),
            (DataType::Decimal(5, 2), ".5", Scalar::Decimal(50, 5, 2)),
        ];
        for (data_type, raw, expected) in cases {
            assert_eq!(data_type.parse_scalar(raw).unwrap(), expected, "{raw}");
        }
        assert!(matches!(
            DataType::Double.parse_scalar("NaN").unwrap(),
            Scalar::Double(v) if v.is_nan()
        ));
    }

    #[test]
    fn test_parse_scalar_rejects() {
        let cases = [
            (DataType::Integer, "1.5"),
            (DataType::Integer, "2147483648"),
            (DataType::Byte, "128"),
            (DataType::Short, "abc"),
            (DataType::Double, "one"),
            (DataType::Boolean, "yes"),
            (DataType::Binary, "xyz"),
            (DataType::FixedSizeBinary(3), "00ff"),
            (DataType::Date, "2024-13-01"),
            (DataType::Timestamp, "yesterday"),
            (DataType::TimestampNtz, "1970-01-01T00:00:00+00:00"),
            (DataType::Decimal(5, 2), "1234"),
            (DataType::Decimal(5, 2), "1.234"),
            (DataType::Decimal(5, 2), "1.2.3"),
            (DataType::Decimal(5, 2), "-"),
            (DataType::Decimal(5, 2), "1e3"),
        ];
        for (data_type, raw) in cases {
            assert!(
                matches!(
                    data_type.parse_scalar(raw),
                    Err(Error::InvalidValue { .. })
                ),
                "'{raw}' should not parse as {data_type}"
            );
        }
    }

    #[test]
    fn test_try_from_scalar() {
        assert_eq!(f64::try_from(Scalar::Double(1.5)).unwrap(), 1.5);
        assert_eq!(i32::try_from(Scalar::Integer(7)).unwrap(), 7);
        assert_eq!(
            String::try_from(Scalar::String("s".into())).unwrap(),
            "s".to_string()
        );
        assert_eq!(
            Vec::<u8>::try_from(Scalar::FixedSizeBinary(vec![1])).unwrap(),
            vec![1]
        );
        assert!(matches!(
            f64::try_from(Scalar::Float(1.5)),
            Err(Error::ScalarTypeMismatch { .. })
        ));
        assert!(matches!(
            i32::try_from(Scalar::Date(3)),
            Err(Error::ScalarTypeMismatch { .. })
        ));
        assert!(matches!(
            f64::try_from(Scalar::Null(DataType::Double)),
            Err(Error::NullValueAccess(DataType::Double))
        ));
    }

    #[test]
    fn test_chrono_conversions() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(Scalar::from(date), Scalar::Date(19723));
        let ts = DateTime::<Utc>::from_timestamp_micros(42).unwrap();
        assert_eq!(Scalar::from(ts), Scalar::Timestamp(42));
        assert_eq!(Scalar::from(ts.naive_utc()), Scalar::TimestampNtz(42));
    }

    #[test]
    fn test_parse_scalar_checks_type() {
        assert!(matches!(
            DataType::Decimal(39, 39).parse_scalar("0.1"),
            Err(Error::InvalidDecimal(_))
        ));
        assert!(matches!(
            DataType::Decimal(3, 4).parse_scalar("0"),
            Err(Error::InvalidDecimal(_))
        ));
    }

    #[test]
    fn test_display_oversized_decimal() {
        let scalar = Scalar::Decimal(1, 40, 40);
        assert_eq!(scalar.to_string(), format!("0.{}1", "0".repeat(39)));
    }

    #[test]
    fn test_validate() {
        assert!(Scalar::Decimal(100, 2, 0).validate().is_err());
        assert!(Scalar::Decimal(99, 2, 0).validate().is_ok());
        assert!(Scalar::FixedSizeBinary(vec![]).validate().is_err());
        assert!(Scalar::Null(DataType::Decimal(40, 0)).validate().is_err());
        assert!(Scalar::Double(f64::NAN).validate().is_ok());
    }
}
