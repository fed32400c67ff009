//! The literal expression node: an immutable leaf that holds a single typed constant.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use super::{ExpressionNode, ExpressionNodeRef, Scalar};
use crate::schema::DataType;
use crate::utils::require;
use crate::{Error, KernelResult};

/// A constant operand in an expression tree.
///
/// The node's [`DataType`] is a pure function of the constructor used to build it and never
/// changes. A literal is a value object: it is never mutated after construction, so it can be
/// shared freely between threads or referenced from any number of parent expressions.
///
/// Reading the value of a null literal is an error ([`Error::NullValueAccess`]); callers that want
/// to handle null themselves can inspect [`LiteralNode::scalar`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralNode {
    scalar: Scalar,
}

impl LiteralNode {
    /// Create a literal of the requested type from an already typed scalar.
    ///
    /// Fails with [`Error::InvalidValue`] if the scalar's kind differs from `data_type`, or if the
    /// scalar violates a constraint of its kind (decimal digits, fixed binary width).
    pub fn try_new(data_type: &DataType, value: impl Into<Scalar>) -> KernelResult<Self> {
        let scalar = value.into();
        if let Err(err) = scalar.validate() {
            debug!("Rejected {scalar:?} for literal of type {data_type}: {err}");
            return Err(err);
        }
        require!(
            scalar.data_type() == *data_type,
            Error::invalid_value(&scalar, data_type)
        );
        Ok(Self { scalar })
    }

    /// Create a literal of the requested type by parsing a textual raw value.
    /// See [`DataType::parse_scalar`] for the accepted formats.
    pub fn parse(data_type: &DataType, raw: &str) -> KernelResult<Self> {
        Self::try_new(data_type, data_type.parse_scalar(raw)?)
    }

    /// Create the null literal of `data_type`. Fails if the type itself is invalid, e.g. a
    /// decimal with a precision above 38.
    pub fn null(data_type: DataType) -> KernelResult<Self> {
        let scalar = Scalar::Null(data_type);
        scalar.validate()?;
        Ok(Self { scalar })
    }

    /// A `double` literal. Every f64, including any `NaN`, is kept bit for bit.
    pub fn double(value: f64) -> Self {
        Self {
            scalar: Scalar::Double(value),
        }
    }

    /// A `float` literal. Every f32, including any `NaN`, is kept bit for bit.
    pub fn float(value: f32) -> Self {
        Self {
            scalar: Scalar::Float(value),
        }
    }

    /// A `long` literal.
    pub fn long(value: i64) -> Self {
        Self {
            scalar: Scalar::Long(value),
        }
    }

    /// An `integer` literal.
    pub fn integer(value: i32) -> Self {
        Self {
            scalar: Scalar::Integer(value),
        }
    }

    /// A `short` literal.
    pub fn short(value: i16) -> Self {
        Self {
            scalar: Scalar::Short(value),
        }
    }

    /// A `byte` literal.
    pub fn byte(value: i8) -> Self {
        Self {
            scalar: Scalar::Byte(value),
        }
    }

    /// A `boolean` literal.
    pub fn boolean(value: bool) -> Self {
        Self {
            scalar: Scalar::Boolean(value),
        }
    }

    /// A `string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            scalar: Scalar::String(value.into()),
        }
    }

    /// A variable length `binary` literal.
    pub fn binary(value: impl Into<Vec<u8>>) -> Self {
        Self {
            scalar: Scalar::Binary(value.into()),
        }
    }

    /// A `fixed_size_binary(width)` literal; `value` must be exactly `width` bytes.
    pub fn fixed_size_binary(value: impl Into<Vec<u8>>, width: i32) -> KernelResult<Self> {
        Ok(Self {
            scalar: Scalar::fixed_size_binary(value, width)?,
        })
    }

    /// A `decimal(precision, scale)` literal from its unscaled value.
    pub fn decimal(value: i128, precision: u8, scale: u8) -> KernelResult<Self> {
        Ok(Self {
            scalar: Scalar::decimal(value, precision, scale)?,
        })
    }

    /// A `date` literal, stored as days since 1970-01-01.
    pub fn date(value: NaiveDate) -> Self {
        Self {
            scalar: value.into(),
        }
    }

    /// A `timestamp` literal, stored as microseconds since the epoch in UTC.
    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Self {
            scalar: value.into(),
        }
    }

    /// A `timestamp_ntz` literal, stored as microseconds since the epoch with no timezone.
    pub fn timestamp_ntz(value: NaiveDateTime) -> Self {
        Self {
            scalar: value.into(),
        }
    }

    /// The literal's value, or [`Error::NullValueAccess`] for a null literal.
    pub fn value(&self) -> KernelResult<&Scalar> {
        match &self.scalar {
            Scalar::Null(data_type) => Err(Error::null_value_access(data_type)),
            scalar => Ok(scalar),
        }
    }

    /// The literal's value as a native rust type, e.g. `node.value_as::<f64>()`.
    pub fn value_as<T>(&self) -> KernelResult<T>
    where
        T: TryFrom<Scalar, Error = Error>,
    {
        T::try_from(self.scalar.clone())
    }

    /// The type of this literal. Never fails.
    pub fn data_type(&self) -> DataType {
        self.scalar.data_type()
    }

    pub fn is_null(&self) -> bool {
        self.scalar.is_null()
    }

    /// The underlying scalar, including the null variant.
    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    pub fn into_scalar(self) -> Scalar {
        self.scalar
    }

    /// Wrap this literal so it can be shared as an operand of several expressions.
    pub fn into_node_ref(self) -> ExpressionNodeRef {
        Arc::new(self)
    }
}

impl ExpressionNode for LiteralNode {
    fn return_type(&self) -> DataType {
        self.data_type()
    }

    fn as_literal(&self) -> Option<&LiteralNode> {
        Some(self)
    }
}

impl Display for LiteralNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scalar)
    }
}

// Only native values convert infallibly; a raw `Scalar` has to go through `try_new`.
macro_rules! impl_from_native {
    ( $( $native:ty ),+ $(,)? ) => {
        $(
            impl From<$native> for LiteralNode {
                fn from(value: $native) -> Self {
                    Self {
                        scalar: value.into(),
                    }
                }
            }
        )+
    };
}

impl_from_native!(
    i8,
    i16,
    i32,
    i64,
    f32,
    f64,
    bool,
    &str,
    String,
    Vec<u8>,
    &[u8],
    NaiveDate,
    DateTime<Utc>,
    NaiveDateTime,
);
