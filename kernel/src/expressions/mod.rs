//! Expression tree building blocks.
//!
//! The kernel only defines the leaves it owns: typed constants ([`LiteralNode`]) over the closed
//! set of [`Scalar`] kinds. Composite nodes, compilation and evaluation belong to the expression
//! engine that consumes these nodes through the [`ExpressionNode`] trait.

use std::fmt::Debug;
use std::sync::Arc;

use crate::schema::DataType;

pub use self::literal::LiteralNode;
pub use self::scalars::Scalar;

mod literal;
mod scalars;

/// A node of an expression tree, as seen by an expression engine.
///
/// Engines call [`ExpressionNode::return_type`] to type-check a tree before compiling it. Nodes
/// are immutable, so they are shared between parents as [`ExpressionNodeRef`]s.
pub trait ExpressionNode: Debug + Send + Sync {
    /// The type of the value this node produces.
    fn return_type(&self) -> DataType;

    /// Downcast to a literal, for engines that fold constants.
    fn as_literal(&self) -> Option<&LiteralNode> {
        None
    }
}

/// A shared, immutable expression node.
pub type ExpressionNodeRef = Arc<dyn ExpressionNode>;
