//! Root selection and top-down shape resolution.
//!
//! A node's own minimum-area point is generally not the one consistent with
//! the global optimum. The choice is made once at the root and pushed down
//! through the decomposition links, fixing every node's chosen point and
//! every module's orientation.

use alloc::vec;
use alloc::vec::Vec;

use whereat::{At, at};

use crate::curve::{PointOrigin, ShapeCurves};
use crate::error::FloorplanError;
use crate::geometry::Size;
use crate::orientation::Orientation;
use crate::tree::{Node, NodeId, SlicingTree};

/// The root point with minimum area.
///
/// Only [`select_root`] creates one, so the index always refers to a point
/// of the curve it was selected from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RootChoice {
    index: usize,
    size: Size,
    area: u64,
}

impl RootChoice {
    /// Index into the root's shape curve.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bounding box of the whole floorplan.
    pub fn size(&self) -> Size {
        self.size
    }

    /// `size.width * size.height`.
    pub fn area(&self) -> u64 {
        self.area
    }
}

/// Pick the first minimum-area point of the root curve.
pub fn select_root(
    tree: &SlicingTree,
    curves: &ShapeCurves,
) -> Result<RootChoice, At<FloorplanError>> {
    let root = tree.root();
    let curve = curves.curve(root);
    let index = curve
        .min_area_index()
        .ok_or_else(|| at!(FloorplanError::EmptyFrontier { node: root }))?;
    let size = curve.point(index).size;
    Ok(RootChoice {
        index,
        size,
        area: size.area(),
    })
}

/// Chosen curve index per node and orientation per module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    chosen: Vec<usize>,
    orientations: Vec<Orientation>,
}

impl Resolution {
    /// Push the root choice down to every node.
    ///
    /// Each work item carries the index its parent picked, so a node's
    /// choice is always known before the node is visited. Fails with
    /// [`FloorplanError::InconsistentCurves`] when `curves` or `root` were
    /// computed for a different tree.
    pub fn resolve(
        tree: &SlicingTree,
        curves: &ShapeCurves,
        root: RootChoice,
    ) -> Result<Self, At<FloorplanError>> {
        if curves.len() != tree.len() {
            return Err(at!(FloorplanError::InconsistentCurves { node: tree.root() }));
        }
        let mut chosen = vec![0usize; tree.len()];
        let mut orientations = vec![Orientation::Original; tree.module_count()];
        let mut pending = vec![(tree.root(), root.index)];

        while let Some((id, index)) = pending.pop() {
            let point = curves
                .curve(id)
                .points()
                .get(index)
                .ok_or_else(|| at!(FloorplanError::InconsistentCurves { node: id }))?;
            chosen[id.index()] = index;
            match (*tree.node(id), point.origin) {
                (Node::Cut { left, right, .. }, PointOrigin::Cut(link)) => {
                    pending.push((right, link.right));
                    pending.push((left, link.left));
                }
                (Node::Leaf { module }, PointOrigin::Leaf(orientation)) => {
                    orientations[module] = orientation;
                }
                _ => return Err(at!(FloorplanError::InconsistentCurves { node: id })),
            }
        }

        tracing::debug!(root_index = root.index, area = root.area, "shapes resolved");
        Ok(Self {
            chosen,
            orientations,
        })
    }

    /// Chosen index into `id`'s shape curve.
    pub fn chosen(&self, id: NodeId) -> usize {
        self.chosen[id.index()]
    }

    /// Final orientation of `module`.
    pub fn orientation(&self, module: usize) -> Orientation {
        self.orientations[module]
    }

    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Cut::{Abut, Stack};
    use crate::expression::Token::{self, Cut as C, Operand as O};
    use crate::orientation::Module;

    type Run = (SlicingTree, ShapeCurves, RootChoice, Resolution);

    fn run(tokens: &[Token], modules: &[Module]) -> Run {
        let tree = SlicingTree::build(tokens, modules.len()).unwrap();
        let curves = ShapeCurves::compute(&tree, modules).unwrap();
        let root = select_root(&tree, &curves).unwrap();
        let resolution = Resolution::resolve(&tree, &curves, root).unwrap();
        (tree, curves, root, resolution)
    }

    #[test]
    fn single_leaf_keeps_original() {
        let (_, _, root, res) = run(&[O(0)], &[Module::new(5, 10)]);
        assert_eq!(root.index(), 0);
        assert_eq!(root.area(), 50);
        assert_eq!(res.orientation(0), Orientation::Original);
    }

    #[test]
    fn abut_pair_rotates_second_module() {
        let modules = [Module::new(2, 3), Module::new(4, 1)];
        let (tree, _, root, res) = run(&[O(0), O(1), C(Abut)], &modules);
        assert_eq!(root.size(), Size::new(3, 4));
        assert_eq!(root.area(), 12);
        assert_eq!(res.orientations(), &[Orientation::Original, Orientation::Rotated]);
        assert_eq!(res.chosen(tree.root()), 0);
        assert_eq!(res.chosen(tree.leaf_of(1)), 1);
    }

    #[test]
    fn every_node_gets_a_consistent_choice() {
        let tokens = [O(0), O(1), C(Stack), O(2), C(Abut), O(3), C(Stack)];
        let modules = [
            Module::new(3, 1),
            Module::new(2, 5),
            Module::new(4, 4),
            Module::new(1, 6),
        ];
        let (tree, curves, _, res) = run(&tokens, &modules);
        for id in tree.post_order() {
            let point = curves.curve(id).point(res.chosen(id));
            if let (Node::Cut { left, right, .. }, PointOrigin::Cut(link)) =
                (*tree.node(id), point.origin)
            {
                assert_eq!(res.chosen(left), link.left);
                assert_eq!(res.chosen(right), link.right);
            }
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let modules = [Module::new(2, 3), Module::new(3, 2), Module::new(1, 6)];
        let tokens = [O(0), O(1), C(Abut), O(2), C(Stack)];
        let (tree, curves, first, _) = run(&tokens, &modules);
        for _ in 0..4 {
            assert_eq!(select_root(&tree, &curves).unwrap(), first);
        }
    }

    #[test]
    fn choice_out_of_curve_range_is_rejected() {
        let modules = [Module::new(2, 3), Module::new(4, 1)];
        let (tree, curves, root, _) = run(&[O(0), O(1), C(Abut)], &modules);
        let stale = RootChoice {
            index: curves.curve(tree.root()).len(),
            ..root
        };
        let err = Resolution::resolve(&tree, &curves, stale).unwrap_err();
        assert_eq!(
            *err.error(),
            FloorplanError::InconsistentCurves { node: tree.root() }
        );
    }

    #[test]
    fn curves_of_another_tree_are_rejected() {
        let modules = [Module::new(2, 3), Module::new(4, 1), Module::new(1, 5)];
        // Same node count, different shape: node 2 is a cut in one and a leaf
        // in the other.
        let (skewed, _, _, _) = run(&[O(0), O(1), C(Abut), O(2), C(Stack)], &modules);
        let (_, other_curves, other_root, _) =
            run(&[O(0), O(1), O(2), C(Abut), C(Stack)], &modules);
        let err = Resolution::resolve(&skewed, &other_curves, other_root).unwrap_err();
        assert!(matches!(err.error(), FloorplanError::InconsistentCurves { .. }));

        let (_, leaf_curves, leaf_root, _) = run(&[O(0)], &modules[..1]);
        let err = Resolution::resolve(&skewed, &leaf_curves, leaf_root).unwrap_err();
        assert_eq!(
            *err.error(),
            FloorplanError::InconsistentCurves { node: skewed.root() }
        );
    }
}
