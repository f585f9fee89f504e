//! Integer geometry shared by every pass: sizes, points, rectangles.
//!
//! Coordinates follow the floorplanning convention: origin at the lower-left
//! corner of the bounding box, y growing upward.

/// Width × height in layout units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Size {
    /// Width (x extent).
    pub width: u32,
    /// Height (y extent).
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The same rectangle turned by 90 degrees.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Area as `u64`; two `u32` factors cannot overflow it.
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Whether `self` is at least as large as `other` on both axes.
    pub const fn dominates(self, other: Self) -> bool {
        self.width >= other.width && self.height >= other.height
    }
}

/// A point in layout coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Distance from the left edge of the bounding box.
    pub x: u32,
    /// Distance from the bottom edge of the bounding box.
    pub y: u32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Bottom edge.
    pub y: u32,
    /// Extent along x.
    pub width: u32,
    /// Extent along y.
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of `size` with its lower-left corner at `origin`.
    pub const fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive top edge.
    pub const fn top(&self) -> u32 {
        self.y + self.height
    }

    /// The four corners, in the order the output format lists them.
    pub const fn corners(&self) -> Corners {
        Corners {
            lower_left: Point::new(self.x, self.y),
            lower_right: Point::new(self.right(), self.y),
            upper_left: Point::new(self.x, self.top()),
            upper_right: Point::new(self.right(), self.top()),
        }
    }

    /// Whether the interiors of two rects intersect. Shared edges do not count.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Whether `other` lies entirely inside `self`.
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }
}

/// Corner coordinates of a placed module.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Corners {
    /// `(x, y)`.
    pub lower_left: Point,
    /// `(x + width, y)`.
    pub lower_right: Point,
    /// `(x, y + height)`.
    pub upper_left: Point,
    /// `(x + width, y + height)`.
    pub upper_right: Point,
}
