//! Shape curves: the Pareto frontier of sizes each subtree can realize.
//!
//! Computed bottom-up over the slicing tree. A leaf contributes its two
//! orientations; a cut node combines every pair of child points with the
//! cut's rule and keeps only the non-dominated results, each remembering
//! which child points produced it so a chosen root shape can later be
//! decomposed top-down.
//!
//! ```text
//!   height
//!     │ ●
//!     │   ●            ● kept (width ↑, height ↓)
//!     │     ○ ●        ○ dominated, dropped
//!     │          ●
//!     └──────────── width
//! ```

use alloc::vec::Vec;

use whereat::{At, at};

use crate::error::FloorplanError;
use crate::expression::Cut;
use crate::geometry::Size;
use crate::orientation::{Module, Orientation};
use crate::tree::{Node, NodeId, SlicingTree};

/// Indices of the child points that combined into a cut-node point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecompositionLink {
    /// Index into the left child's curve.
    pub left: usize,
    /// Index into the right child's curve.
    pub right: usize,
}

/// Where a frontier point came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointOrigin {
    /// A leaf point: the module laid down in this orientation.
    Leaf(Orientation),
    /// A cut-node point: combination of one point from each child.
    Cut(DecompositionLink),
}

/// One vertex of a shape curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrontierPoint {
    /// Bounding size of the subtree at this point.
    pub size: Size,
    /// How to decompose the point one level down.
    pub origin: PointOrigin,
}

/// Shape curve of one node.
///
/// For cut nodes the points are strictly Pareto-optimal: width strictly
/// increasing, height strictly decreasing. Leaf curves always hold exactly
/// `[Original, Rotated]`, which need not be width-sorted and coincide for
/// square modules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeCurve {
    points: Vec<FrontierPoint>,
}

impl ShapeCurve {
    /// Curve of a single module.
    pub fn leaf(module: &Module) -> Self {
        let points = Orientation::ALL
            .iter()
            .map(|&o| FrontierPoint {
                size: module.shape(o),
                origin: PointOrigin::Leaf(o),
            })
            .collect();
        Self { points }
    }

    /// Combine two child curves under `cut`.
    ///
    /// `Err` when a combined width or height overflows `u32`, `Ok(None)` when
    /// a child curve is empty.
    pub fn combine_checked(
        cut: Cut,
        left: &Self,
        right: &Self,
    ) -> Result<Option<Self>, Overflow> {
        let mut candidates = Vec::with_capacity(left.points.len() * right.points.len());
        for (i, l) in left.points.iter().enumerate() {
            for (j, r) in right.points.iter().enumerate() {
                candidates.push(FrontierPoint {
                    size: combine_sizes(cut, l.size, r.size).ok_or(Overflow)?,
                    origin: PointOrigin::Cut(DecompositionLink { left: i, right: j }),
                });
            }
        }
        let points = pareto_filter(candidates);
        if points.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { points }))
    }

    pub fn points(&self) -> &[FrontierPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> &FrontierPoint {
        &self.points[index]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the points are strictly width-ascending, strictly
    /// height-descending, and therefore free of dominated points.
    pub fn is_pareto(&self) -> bool {
        self.points.windows(2).all(|pair| {
            let (a, b) = (pair[0].size, pair[1].size);
            a.width < b.width && a.height > b.height
        })
    }

    /// First index of minimal area. Ties keep the earliest point, which on a
    /// cut-node curve is the narrowest.
    pub fn min_area_index(&self) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (index, point) in self.points.iter().enumerate() {
            let area = point.size.area();
            if best.is_none_or(|(_, best_area)| area < best_area) {
                best = Some((index, area));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// A combined width or height does not fit in `u32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Overflow;

/// Size of two shapes placed under `cut`.
pub fn combine_sizes(cut: Cut, left: Size, right: Size) -> Option<Size> {
    match cut {
        Cut::Abut => Some(Size::new(
            left.width.checked_add(right.width)?,
            left.height.max(right.height),
        )),
        Cut::Stack => Some(Size::new(
            left.width.max(right.width),
            left.height.checked_add(right.height)?,
        )),
    }
}

/// Keep the Pareto frontier of `candidates`.
///
/// Sorts by width then height, keeps the first point, then keeps a point
/// only if its height is strictly below every height kept so far. The sort
/// is stable, so among identical sizes the earliest candidate survives.
pub fn pareto_filter(mut candidates: Vec<FrontierPoint>) -> Vec<FrontierPoint> {
    candidates.sort_by_key(|p| (p.size.width, p.size.height));
    let mut kept: Vec<FrontierPoint> = Vec::with_capacity(candidates.len());
    for point in candidates {
        match kept.last() {
            Some(last) if point.size.height >= last.size.height => {}
            _ => kept.push(point),
        }
    }
    kept
}

/// Shape curves for every node of a tree, indexed by [`NodeId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeCurves {
    curves: Vec<ShapeCurve>,
}

impl ShapeCurves {
    /// Run the bottom-up pass.
    pub fn compute(tree: &SlicingTree, modules: &[Module]) -> Result<Self, At<FloorplanError>> {
        let mut curves: Vec<ShapeCurve> = Vec::with_capacity(tree.len());
        for id in tree.post_order() {
            let curve = match *tree.node(id) {
                Node::Leaf { module } => {
                    let m = modules.get(module).ok_or_else(|| {
                        at!(FloorplanError::OutOfRangeReference {
                            index: module,
                            modules: modules.len(),
                        })
                    })?;
                    if m.base().width == 0 || m.base().height == 0 {
                        return Err(at!(FloorplanError::ZeroDimension { module }));
                    }
                    ShapeCurve::leaf(m)
                }
                Node::Cut { cut, left, right } => {
                    let (l, r) = (&curves[left.index()], &curves[right.index()]);
                    let combined = ShapeCurve::combine_checked(cut, l, r)
                        .map_err(|_| at!(FloorplanError::DimensionOverflow { node: id }))?
                        .ok_or_else(|| at!(FloorplanError::EmptyFrontier { node: id }))?;
                    tracing::trace!(
                        node = %id,
                        candidates = l.len() * r.len(),
                        kept = combined.len(),
                        "shape curve combined"
                    );
                    combined
                }
            };
            curves.push(curve);
        }

        let widest = curves.iter().map(ShapeCurve::len).max().unwrap_or(0);
        tracing::debug!(
            nodes = curves.len(),
            root_points = curves.last().map_or(0, ShapeCurve::len),
            widest,
            "shape curves computed"
        );
        Ok(Self { curves })
    }

    pub fn curve(&self, id: NodeId) -> &ShapeCurve {
        &self.curves[id.index()]
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
