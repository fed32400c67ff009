//! Conversions between kernel data types and arrow data types

use arrow_schema::{ArrowError, DataType as ArrowDataType, TimeUnit};

use crate::schema::DataType;

impl TryFrom<&DataType> for ArrowDataType {
    type Error = ArrowError;

    fn try_from(t: &DataType) -> Result<Self, ArrowError> {
        match t {
            DataType::String => Ok(ArrowDataType::Utf8),
            DataType::Long => Ok(ArrowDataType::Int64),
            DataType::Integer => Ok(ArrowDataType::Int32),
            DataType::Short => Ok(ArrowDataType::Int16),
            DataType::Byte => Ok(ArrowDataType::Int8),
            DataType::Float => Ok(ArrowDataType::Float32),
            DataType::Double => Ok(ArrowDataType::Float64),
            DataType::Boolean => Ok(ArrowDataType::Boolean),
            DataType::Binary => Ok(ArrowDataType::Binary),
            DataType::FixedSizeBinary(width) => {
                DataType::check_fixed_size_binary(*width)
                    .map_err(|e| ArrowError::from_external_error(e.into()))?;
                Ok(ArrowDataType::FixedSizeBinary(*width))
            }
            DataType::Decimal(precision, scale) => {
                DataType::check_decimal(*precision, *scale)
                    .map_err(|e| ArrowError::from_external_error(e.into()))?;
                Ok(ArrowDataType::Decimal128(*precision, *scale as i8))
            }
            // days since 1970-01-01 stored in 4 bytes
            DataType::Date => Ok(ArrowDataType::Date32),
            DataType::Timestamp => Ok(ArrowDataType::Timestamp(
                TimeUnit::Microsecond,
                Some("UTC".into()),
            )),
            DataType::TimestampNtz => Ok(ArrowDataType::Timestamp(TimeUnit::Microsecond, None)),
        }
    }
}

impl TryFrom<&ArrowDataType> for DataType {
    type Error = ArrowError;

    fn try_from(arrow_datatype: &ArrowDataType) -> Result<Self, ArrowError> {
        match arrow_datatype {
            ArrowDataType::Utf8 | ArrowDataType::LargeUtf8 => Ok(DataType::String),
            ArrowDataType::Int64 => Ok(DataType::Long),
            ArrowDataType::Int32 => Ok(DataType::Integer),
            ArrowDataType::Int16 => Ok(DataType::Short),
            ArrowDataType::Int8 => Ok(DataType::Byte),
            ArrowDataType::Float32 => Ok(DataType::Float),
            ArrowDataType::Float64 => Ok(DataType::Double),
            ArrowDataType::Boolean => Ok(DataType::Boolean),
            ArrowDataType::Binary | ArrowDataType::LargeBinary => Ok(DataType::Binary),
            ArrowDataType::FixedSizeBinary(width) => DataType::fixed_size_binary(*width)
                .map_err(|e| ArrowError::from_external_error(e.into())),
            ArrowDataType::Decimal128(p, s) => {
                if *s < 0 {
                    return Err(ArrowError::from_external_error(
                        crate::Error::invalid_decimal("Negative scales are not supported").into(),
                    ));
                };
                DataType::decimal(*p, *s as u8)
                    .map_err(|e| ArrowError::from_external_error(e.into()))
            }
            ArrowDataType::Date32 => Ok(DataType::Date),
            ArrowDataType::Timestamp(TimeUnit::Microsecond, None) => Ok(DataType::TimestampNtz),
            ArrowDataType::Timestamp(TimeUnit::Microsecond, Some(tz))
                if tz.eq_ignore_ascii_case("utc") =>
            {
                Ok(DataType::Timestamp)
            }
            unsupported => Err(ArrowError::SchemaError(format!(
                "Invalid data type for literal: {:?}",
                unsupported
            ))),
        }
    }
}
