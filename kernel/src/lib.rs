//! # Expression kernel
//!
//! Typed building blocks for expression trees that an external, vectorized expression engine
//! compiles and evaluates. The kernel owns the leaves of such trees: constant operands, modeled as
//! [`LiteralNode`]s over a closed set of [`Scalar`] kinds, each with a fixed [`DataType`].
//!
//! ## Literals
//!
//! A literal is built once through a typed constructor and never changes afterwards:
//!
//! ```
//! use expr_kernel::expressions::LiteralNode;
//! use expr_kernel::schema::DataType;
//!
//! let node = LiteralNode::double(1.5);
//! assert_eq!(node.value_as::<f64>().unwrap(), 1.5);
//! assert_eq!(node.data_type(), DataType::Double);
//! ```
//!
//! Values that arrive untyped (text, or json from a host binding) go through checked
//! conversions that fail with [`Error::InvalidValue`] instead of rounding; see
//! [`LiteralNode::parse`] and the [`host`] module.
//!
//! ## Expression engines
//!
//! Engines consume literals through the [`ExpressionNode`] trait, which reports each node's
//! return type for static type checking. With the `arrow-conversion` feature, data types convert
//! to and from `arrow_schema::DataType`.
//!
//! [`LiteralNode`]: expressions::LiteralNode
//! [`Scalar`]: expressions::Scalar
//! [`DataType`]: schema::DataType
//! [`LiteralNode::parse`]: expressions::LiteralNode::parse
//! [`ExpressionNode`]: expressions::ExpressionNode

#![warn(
    unreachable_pub,
    trivial_numeric_casts,
    unused_extern_crates,
    rust_2018_idioms,
    rust_2021_compatibility
)]

pub mod config;
pub mod error;
pub mod expressions;
pub mod host;
pub mod schema;

pub(crate) mod utils;

#[cfg(feature = "arrow-conversion")]
pub mod arrow_conversion;

pub use config::ConversionOptions;
pub use error::{Error, KernelResult};
pub use expressions::{ExpressionNode, ExpressionNodeRef, LiteralNode, Scalar};
pub use schema::DataType;
