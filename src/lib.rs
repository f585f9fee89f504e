//! Minimum-area slicing floorplans from Normalized Polish Expressions.
//!
//! Pure integer geometry over an arena-backed slicing tree, `no_std`
//! compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`expression`] — postfix tokens, cut operators, balance check
//! - [`tree`] — slicing tree arena and traversals
//! - [`curve`] — shape curves (Pareto frontiers) computed bottom-up
//! - [`resolve`] — root selection and top-down shape resolution
//! - [`place`] — absolute module placement
//! - [`plan`] — the full pipeline and its [`Floorplan`] result
//! - [`input`] / [`output`] — problem and result text formats
//! - `svg` — floorplan drawing (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

whereat::define_at_crate_info!();

pub mod curve;
pub mod error;
pub mod expression;
pub mod geometry;
pub mod input;
pub mod orientation;
pub mod output;
pub mod place;
pub mod plan;
pub mod resolve;
#[cfg(feature = "svg")]
pub mod svg;
pub mod tree;

pub use curve::{DecompositionLink, FrontierPoint, PointOrigin, ShapeCurve, ShapeCurves};
pub use error::{ExpressionFault, FloorplanError};
pub use expression::{Cut, Expression, Token};
pub use geometry::{Corners, Point, Rect, Size};
pub use input::{InputError, Problem};
pub use orientation::{Module, Orientation};
pub use place::Placement;
pub use plan::{Floorplan, Planner, plan};
pub use resolve::{Resolution, RootChoice};
pub use tree::{Node, NodeId, SlicingTree};
pub use whereat::At;
