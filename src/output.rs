//! Result file writer.
//!
//! One line per module in input order listing its corners as
//! `(llx lly) (lrx lry) (ulx uly) (urx ury) `, then the minimum area:
//!
//! ```text
//! (0 0) (2 0) (0 3) (2 3)
//! (2 0) (3 0) (2 4) (3 4)
//! 12
//! ```

use alloc::string::String;
use core::fmt::{self, Write};

use crate::geometry::{Corners, Point};
use crate::plan::Floorplan;

/// Write `floorplan` in result-file format.
pub fn write_floorplan<W: Write>(out: &mut W, floorplan: &Floorplan) -> fmt::Result {
    for placement in &floorplan.placements {
        write_corners(out, &placement.corners())?;
        out.write_char('\n')?;
    }
    writeln!(out, "{}", floorplan.area)
}

/// Render `floorplan` in result-file format.
pub fn render(floorplan: &Floorplan) -> String {
    let mut text = String::with_capacity(floorplan.placements.len() * 40 + 16);
    // Writing into a String cannot fail.
    let _ = write_floorplan(&mut text, floorplan);
    text
}

fn write_corners<W: Write>(out: &mut W, c: &Corners) -> fmt::Result {
    for p in [c.lower_left, c.lower_right, c.upper_left, c.upper_right] {
        write_point(out, p)?;
        out.write_char(' ')?;
    }
    Ok(())
}

fn write_point<W: Write>(out: &mut W, p: Point) -> fmt::Result {
    write!(out, "({} {})", p.x, p.y)
}
