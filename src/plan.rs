//! The full floorplanning pipeline.
//!
//! Two phases, mirroring how the work splits naturally:
//!
//! 1. [`Planner::new`] builds the slicing tree and computes every shape
//!    curve bottom-up. The curves can be inspected before committing.
//! 2. [`Planner::finish`] selects the minimum-area root point, resolves
//!    shapes top-down and places every module.
//!
//! [`plan`] runs both phases in one call.
//!
//! # Example
//!
//! ```
//! use slicefloor::{Expression, Module, Orientation, Token, Cut, plan};
//!
//! let modules = [Module::new(2, 3), Module::new(4, 1)];
//! let npe = Expression::new(vec![Token::Operand(0), Token::Operand(1), Token::Cut(Cut::Abut)])
//!     .unwrap();
//!
//! let floorplan = plan(&modules, &npe).unwrap();
//! assert_eq!(floorplan.area, 12);
//! assert_eq!(floorplan.placements[1].orientation, Orientation::Rotated);
//! ```

use alloc::vec::Vec;

use whereat::At;

use crate::curve::ShapeCurves;
use crate::error::FloorplanError;
use crate::expression::Expression;
use crate::geometry::{Rect, Size};
use crate::orientation::Module;
use crate::place::{Placement, place};
use crate::resolve::{Resolution, RootChoice, select_root};
use crate::tree::SlicingTree;

/// Result of a floorplanning run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Floorplan {
    /// One placement per module, in input order.
    pub placements: Vec<Placement>,
    /// Bounding box of the whole layout, anchored at `(0, 0)`.
    pub bounding: Size,
    /// Minimum area, `bounding.width * bounding.height`.
    pub area: u64,
}

impl Floorplan {
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(0, 0, self.bounding.width, self.bounding.height)
    }

    /// Smallest box spanned by the placed modules' corners.
    pub fn spanned(&self) -> Size {
        let width = self.placements.iter().map(|p| p.rect.right()).max().unwrap_or(0);
        let height = self.placements.iter().map(|p| p.rect.top()).max().unwrap_or(0);
        Size::new(width, height)
    }

    /// Whether any two modules overlap.
    pub fn has_overlap(&self) -> bool {
        self.placements.iter().enumerate().any(|(i, a)| {
            self.placements[i + 1..]
                .iter()
                .any(|b| a.rect.overlaps(&b.rect))
        })
    }

    /// Sum of module areas divided by the bounding area.
    pub fn utilization(&self) -> f64 {
        if self.area == 0 {
            return 0.0;
        }
        let used: u64 = self.placements.iter().map(|p| p.rect.size().area()).sum();
        used as f64 / self.area as f64
    }
}

/// Phase-one state: tree and shape curves, ready for selection.
#[derive(Clone, Debug)]
pub struct Planner<'a> {
    modules: &'a [Module],
    tree: SlicingTree,
    curves: ShapeCurves,
}

impl<'a> Planner<'a> {
    /// Build the tree and run the bottom-up shape-curve pass.
    pub fn new(
        modules: &'a [Module],
        expression: &Expression,
    ) -> Result<Self, At<FloorplanError>> {
        let tree = SlicingTree::from_expression(expression, modules.len())?;
        let curves = ShapeCurves::compute(&tree, modules)?;
        Ok(Self {
            modules,
            tree,
            curves,
        })
    }

    pub fn tree(&self) -> &SlicingTree {
        &self.tree
    }

    pub fn curves(&self) -> &ShapeCurves {
        &self.curves
    }

    /// Minimum-area root point.
    pub fn root_choice(&self) -> Result<RootChoice, At<FloorplanError>> {
        select_root(&self.tree, &self.curves)
    }

    /// Select, resolve and place.
    pub fn finish(&self) -> Result<Floorplan, At<FloorplanError>> {
        let root = self.root_choice()?;
        let resolution = Resolution::resolve(&self.tree, &self.curves, root)?;
        let placements = place(&self.tree, &self.curves, &resolution, self.modules);
        tracing::info!(
            modules = self.modules.len(),
            width = root.size().width,
            height = root.size().height,
            area = root.area(),
            "floorplan complete"
        );
        Ok(Floorplan {
            placements,
            bounding: root.size(),
            area: root.area(),
        })
    }
}

/// Compute the minimum-area floorplan of `modules` under `expression`.
pub fn plan(
    modules: &[Module],
    expression: &Expression,
) -> Result<Floorplan, At<FloorplanError>> {
    Planner::new(modules, expression)?.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpressionFault;
    use crate::expression::Cut::{Abut, Stack};
    use crate::expression::Token::{Cut as C, Operand as O};
    use crate::orientation::Orientation;
    use alloc::vec;

    #[test]
    fn single_module() {
        let fp = plan(&[Module::new(5, 10)], &Expression::leaf(0)).unwrap();
        assert_eq!(fp.area, 50);
        assert_eq!(fp.bounding, Size::new(5, 10));
        assert_eq!(fp.placements[0].orientation, Orientation::Original);
        assert_eq!(fp.placements[0].rect, Rect::new(0, 0, 5, 10));
    }

    #[test]
    fn spanned_box_matches_bounding() {
        let modules = [
            Module::new(4, 2),
            Module::new(1, 3),
            Module::new(2, 2),
            Module::new(5, 1),
        ];
        let tokens = vec![O(0), O(1), C(Abut), O(2), O(3), C(Abut), C(Stack)];
        let npe = Expression::new(tokens).unwrap();
        let fp = plan(&modules, &npe).unwrap();
        assert_eq!(fp.spanned(), fp.bounding);
        assert_eq!(fp.area, fp.bounding.area());
        assert!(!fp.has_overlap());
        assert!(fp.utilization() > 0.0 && fp.utilization() <= 1.0);
    }

    #[test]
    fn unreferenced_module_fails_before_curves() {
        let npe = Expression::leaf(0);
        let err = Planner::new(&[Module::new(1, 1), Module::new(1, 1)], &npe).unwrap_err();
        assert_eq!(*err.error(), FloorplanError::UnreferencedModule { index: 1 });
    }

    #[test]
    fn planner_exposes_curves_before_finishing() {
        let modules = [Module::new(2, 3), Module::new(4, 1)];
        let npe = Expression::new(vec![O(0), O(1), C(Abut)]).unwrap();
        let planner = Planner::new(&modules, &npe).unwrap();
        let root = planner.curves().curve(planner.tree().root());
        assert_eq!(root.len(), 3);
        assert_eq!(planner.root_choice().unwrap().area(), 12);
    }

    #[test]
    fn malformed_error_is_displayable() {
        let err = FloorplanError::MalformedExpression(ExpressionFault::Unbalanced { position: 3 });
        assert_eq!(
            alloc::format!("{err}"),
            "malformed expression: operator at token 3 is not preceded by more operands than operators"
        );
    }
}
