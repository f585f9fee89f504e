//! Slicing tree stored as an arena.
//!
//! Nodes are appended in token order, so a child always has a smaller
//! [`NodeId`] than its parent and the root is the last node. Per-pass data
//! (shape curves, chosen indices) live in vectors indexed by `NodeId`.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use whereat::{At, at};

use crate::error::{ExpressionFault, FloorplanError};
use crate::expression::{Cut, Expression, Token};

/// Index of a node in a [`SlicingTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A slicing tree node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A single module, by index into the module list.
    Leaf { module: usize },
    /// A cut combining two subtrees.
    Cut { cut: Cut, left: NodeId, right: NodeId },
}

/// Binary slicing tree built from a postfix expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlicingTree {
    nodes: Vec<Node>,
    /// Leaf node of each module.
    leaves: Vec<NodeId>,
}

impl SlicingTree {
    /// Build from a validated expression over `modules` modules.
    pub fn from_expression(
        expression: &Expression,
        modules: usize,
    ) -> Result<Self, At<FloorplanError>> {
        Self::build(expression.tokens(), modules)
    }

    /// Build from raw postfix tokens.
    ///
    /// Each operator pops its right child first, then its left child.
    /// Every module in `0..modules` must appear exactly once.
    pub fn build(tokens: &[Token], modules: usize) -> Result<Self, At<FloorplanError>> {
        if tokens.is_empty() {
            return Err(at!(FloorplanError::from(ExpressionFault::Empty)));
        }

        let mut nodes = Vec::with_capacity(tokens.len());
        let mut leaves: Vec<Option<NodeId>> = vec![None; modules];
        let mut pending: Vec<NodeId> = Vec::new();

        for (position, &token) in tokens.iter().enumerate() {
            let id = NodeId(nodes.len());
            match token {
                Token::Operand(index) => {
                    let slot = leaves.get_mut(index).ok_or_else(|| {
                        at!(FloorplanError::OutOfRangeReference { index, modules })
                    })?;
                    if slot.is_some() {
                        return Err(at!(FloorplanError::DuplicateReference { index }));
                    }
                    *slot = Some(id);
                    nodes.push(Node::Leaf { module: index });
                }
                Token::Cut(cut) => {
                    let missing =
                        || at!(FloorplanError::from(ExpressionFault::MissingOperands { position }));
                    let right = pending.pop().ok_or_else(missing)?;
                    let left = pending.pop().ok_or_else(missing)?;
                    nodes.push(Node::Cut { cut, left, right });
                }
            }
            pending.push(id);
        }

        if pending.len() != 1 {
            return Err(at!(FloorplanError::from(ExpressionFault::Disconnected {
                subtrees: pending.len(),
            })));
        }

        let leaves = leaves
            .into_iter()
            .enumerate()
            .map(|(index, leaf)| {
                leaf.ok_or_else(|| at!(FloorplanError::UnreferencedModule { index }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(nodes = nodes.len(), modules, "slicing tree built");
        Ok(Self { nodes, leaves })
    }

    /// The root, which is always the last node.
    pub fn root(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of modules (leaves).
    pub fn module_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf node holding `module`.
    pub fn leaf_of(&self, module: usize) -> NodeId {
        self.leaves[module]
    }

    /// Children before parents. Arena order already has this property.
    pub fn post_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Parents before children, left subtree before right, root first.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Length of the longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        let mut depth = vec![0usize; self.nodes.len()];
        for id in self.pre_order() {
            if let Node::Cut { left, right, .. } = self.nodes[id.0] {
                depth[left.0] = depth[id.0] + 1;
                depth[right.0] = depth[id.0] + 1;
            }
        }
        depth.into_iter().max().unwrap_or(0)
    }
}

/// Explicit work-stack pre-order traversal of a [`SlicingTree`].
pub struct PreOrder<'a> {
    tree: &'a SlicingTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Node::Cut { left, right, .. } = *self.tree.node(id) {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(id)
    }
}
