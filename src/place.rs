//! Top-down placement of resolved shapes.
//!
//! The left child of every cut sits at the cut's origin. Under `Abut` the
//! right child starts where the left child's chosen width ends; under
//! `Stack` it starts on top of the left child's chosen height.

use alloc::vec;
use alloc::vec::Vec;

use crate::curve::ShapeCurves;
use crate::expression::Cut;
use crate::geometry::{Corners, Point, Rect};
use crate::orientation::{Module, Orientation};
use crate::resolve::Resolution;
use crate::tree::{Node, SlicingTree};

/// Final orientation and rectangle of one module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Orientation the module is laid down in.
    pub orientation: Orientation,
    /// Absolute rectangle, sized by `orientation`.
    pub rect: Rect,
}

impl Placement {
    pub const fn corners(&self) -> Corners {
        self.rect.corners()
    }
}

/// Assign every module its absolute rectangle, root at `(0, 0)`.
///
/// Returns one placement per module, in module order.
pub fn place(
    tree: &SlicingTree,
    curves: &ShapeCurves,
    resolution: &Resolution,
    modules: &[Module],
) -> Vec<Placement> {
    let mut placements = vec![
        Placement {
            orientation: Orientation::Original,
            rect: Rect::new(0, 0, 0, 0),
        };
        tree.module_count()
    ];
    let mut pending = vec![(tree.root(), Point::default())];

    while let Some((id, origin)) = pending.pop() {
        match *tree.node(id) {
            Node::Leaf { module } => {
                let orientation = resolution.orientation(module);
                let rect = Rect::at(origin, modules[module].shape(orientation));
                tracing::trace!(
                    module,
                    x = rect.x,
                    y = rect.y,
                    w = rect.width,
                    h = rect.height,
                    "placed"
                );
                placements[module] = Placement { orientation, rect };
            }
            Node::Cut { cut, left, right } => {
                // The left child's resolved point, never its own minimum.
                let left_size = curves.curve(left).point(resolution.chosen(left)).size;
                let right_origin = match cut {
                    Cut::Abut => Point::new(origin.x + left_size.width, origin.y),
                    Cut::Stack => Point::new(origin.x, origin.y + left_size.height),
                };
                pending.push((right, right_origin));
                pending.push((left, origin));
            }
        }
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Cut::{Abut, Stack};
    use crate::expression::Token::{self, Cut as C, Operand as O};
    use crate::resolve::select_root;

    fn run(tokens: &[Token], modules: &[Module]) -> Vec<Placement> {
        let tree = SlicingTree::build(tokens, modules.len()).unwrap();
        let curves = ShapeCurves::compute(&tree, modules).unwrap();
        let root = select_root(&tree, &curves).unwrap();
        let resolution = Resolution::resolve(&tree, &curves, root).unwrap();
        place(&tree, &curves, &resolution, modules)
    }

    #[test]
    fn abut_places_right_child_after_left_width() {
        let modules = [Module::new(2, 3), Module::new(4, 1)];
        let p = run(&[O(0), O(1), C(Abut)], &modules);
        assert_eq!(p[0].rect, Rect::new(0, 0, 2, 3));
        assert_eq!(p[1].rect, Rect::new(2, 0, 1, 4));
        assert_eq!(p[1].orientation, Orientation::Rotated);
    }

    #[test]
    fn stack_places_right_child_above_left_height() {
        // Stack curve {(2,7) (3,6) (4,3)}; areas 14, 18, 12 → (4,3):
        // module 0 rotated to 3×2, module 1 kept at 4×1 on top.
        let modules = [Module::new(2, 3), Module::new(4, 1)];
        let p = run(&[O(0), O(1), C(Stack)], &modules);
        assert_eq!(p[0].rect, Rect::new(0, 0, 3, 2));
        assert_eq!(p[1].rect, Rect::new(0, 2, 4, 1));
    }

    #[test]
    fn nested_cuts_accumulate_offsets() {
        // Three unit squares side by side, a 3×1 bar stacked on top.
        let modules = [
            Module::new(1, 1),
            Module::new(1, 1),
            Module::new(1, 1),
            Module::new(3, 1),
        ];
        let tokens = [O(0), O(1), C(Abut), O(2), C(Abut), O(3), C(Stack)];
        let p = run(&tokens, &modules);
        assert_eq!(p[0].rect, Rect::new(0, 0, 1, 1));
        assert_eq!(p[1].rect, Rect::new(1, 0, 1, 1));
        assert_eq!(p[2].rect, Rect::new(2, 0, 1, 1));
        assert_eq!(p[3].rect, Rect::new(0, 1, 3, 1));
    }

    #[test]
    fn operand_order_not_module_order_decides_position() {
        let p = run(&[O(1), O(0), C(Abut)], &[Module::new(1, 1), Module::new(2, 1)]);
        assert_eq!(p[1].rect.x, 0);
        assert_eq!(p[0].rect.x, 2);
    }
}
