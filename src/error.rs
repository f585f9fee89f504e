//! Failure kinds of a floorplanning run.
//!
//! Every variant is fatal for the run. Library functions return them wrapped
//! in [`whereat::At`] so the site that detected the failure is kept.

use core::fmt;

use crate::tree::NodeId;

/// Why a token sequence does not describe exactly one binary tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpressionFault {
    /// No tokens at all.
    Empty,
    /// At token `position` (0-based) the operator count reached the operand count.
    Unbalanced { position: usize },
    /// The operator at `position` found fewer than two subtrees to combine.
    MissingOperands { position: usize },
    /// The stream ended with more than one subtree left.
    Disconnected { subtrees: usize },
}

impl fmt::Display for ExpressionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("expression is empty"),
            Self::Unbalanced { position } => write!(
                f,
                "operator at token {position} is not preceded by more operands than operators"
            ),
            Self::MissingOperands { position } => {
                write!(f, "operator at token {position} has fewer than two operands")
            }
            Self::Disconnected { subtrees } => {
                write!(f, "expression leaves {subtrees} disconnected subtrees")
            }
        }
    }
}

/// Floorplanning error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloorplanError {
    /// The expression cannot be turned into a single slicing tree.
    MalformedExpression(ExpressionFault),
    /// An operand names a module that does not exist.
    OutOfRangeReference { index: usize, modules: usize },
    /// An operand names a module that another operand already placed.
    DuplicateReference { index: usize },
    /// A module never appears in the expression.
    UnreferencedModule { index: usize },
    /// A module has zero width or height.
    ZeroDimension { module: usize },
    /// Combined width or height of a subtree does not fit in `u32`.
    DimensionOverflow { node: NodeId },
    /// A node ended up with no frontier point. Indicates a bug, not bad input.
    EmptyFrontier { node: NodeId },
    /// Shape curves or a root choice do not belong to the tree being resolved.
    InconsistentCurves { node: NodeId },
}

impl fmt::Display for FloorplanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedExpression(fault) => write!(f, "malformed expression: {fault}"),
            Self::OutOfRangeReference { index, modules } => {
                write!(f, "operand {index} is out of range for {modules} modules")
            }
            Self::DuplicateReference { index } => {
                write!(f, "module {index} appears more than once in the expression")
            }
            Self::UnreferencedModule { index } => {
                write!(f, "module {index} does not appear in the expression")
            }
            Self::ZeroDimension { module } => {
                write!(f, "module {module} has a zero width or height")
            }
            Self::DimensionOverflow { node } => {
                write!(f, "combined dimensions at node {node} overflow u32")
            }
            Self::EmptyFrontier { node } => write!(f, "node {node} has an empty shape curve"),
            Self::InconsistentCurves { node } => {
                write!(f, "shape curves do not match the tree at node {node}")
            }
        }
    }
}

impl core::error::Error for FloorplanError {}

impl From<ExpressionFault> for FloorplanError {
    fn from(fault: ExpressionFault) -> Self {
        Self::MalformedExpression(fault)
    }
}
