//! Module orientation and the module model itself.

use crate::geometry::Size;

/// How a module is laid down: as given, or turned by 90 degrees.
///
/// ```text
///     Original (w×h)     Rotated (h×w)
///     ┌──┐               ┌─────┐
///     │  │               │     │
///     │  │               └─────┘
///     └──┘
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Base dimensions `(w₀, h₀)`.
    #[default]
    Original,
    /// Transposed dimensions `(h₀, w₀)`.
    Rotated,
}

impl Orientation {
    /// Both orientations, in the order a leaf shape curve lists them.
    pub const ALL: [Self; 2] = [Self::Original, Self::Rotated];

    /// Whether this orientation swaps width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Rotated)
    }

    /// Effective dimensions of a module with `base` size in this orientation.
    pub fn apply(self, base: Size) -> Size {
        if self.swaps_axes() {
            base.transposed()
        } else {
            base
        }
    }
}

/// A rectangular unit to be placed.
///
/// Base dimensions never change; the chosen orientation and position are
/// results of a run, held by [`Floorplan`](crate::Floorplan).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Module {
    base: Size,
}

impl Module {
    /// Create a module with base width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            base: Size::new(width, height),
        }
    }

    /// Base dimensions `(w₀, h₀)`.
    pub const fn base(&self) -> Size {
        self.base
    }

    /// Dimensions in the given orientation.
    pub fn shape(&self, orientation: Orientation) -> Size {
        orientation.apply(self.base)
    }

    /// Square modules look the same in both orientations.
    pub const fn is_square(&self) -> bool {
        self.base.width == self.base.height
    }
}

impl From<(u32, u32)> for Module {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}
