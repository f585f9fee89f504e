//! SVG visualization of a placed floorplan.
//!
//! Draws the bounding box and every module outline labelled with its index.
//! Floorplan y grows upward, SVG y grows downward, so the drawing is
//! flipped to keep `(0, 0)` at the lower-left corner.
//!
//! # Example
//!
//! ```
//! use slicefloor::{Expression, Module, plan, svg::render_floorplan_svg};
//!
//! let modules = [Module::new(5, 10)];
//! let floorplan = plan(&modules, &Expression::leaf(0)).unwrap();
//!
//! let svg = render_floorplan_svg(&floorplan);
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;

use num_traits::Float;

use crate::geometry::Rect;
use crate::plan::Floorplan;

/// Maximum pixel width of the drawing area.
const MAX_PANEL_W: f64 = 480.0;
/// Maximum pixel height of the drawing area.
const MAX_PANEL_H: f64 = 480.0;
/// Margin around the drawing area.
const MARGIN: f64 = 30.0;
/// Height of the title line above the drawing area.
const TITLE_H: f64 = 24.0;

/// Render a complete SVG document for `floorplan`.
pub fn render_floorplan_svg(floorplan: &Floorplan) -> String {
    let bounding = floorplan.bounding;
    let (panel_w, panel_h, scale) = scale_to_fit(bounding.width, bounding.height);
    let total_w = Float::ceil(panel_w + 2.0 * MARGIN);
    let total_h = Float::ceil(panel_h + 2.0 * MARGIN + TITLE_H);
    let origin_x = MARGIN;
    let origin_y = MARGIN + TITLE_H;

    let mut svg = String::with_capacity(1024 + floorplan.placements.len() * 160);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .title { font-size: 13px; font-weight: bold; fill: #333; }
  .index { font-size: 11px; fill: #b22; }
  .bounds { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .module { fill: #6ba3d6; fill-opacity: 0.35; stroke: #2c6faa; stroke-width: 1.5; }
  .module.rotated { fill: #d6a36b; stroke: #aa6f2c; }
  @media (prefers-color-scheme: dark) {
    .title { fill: #e0e0e0; }
    .index { fill: #f88; }
    .bounds { fill: #2d2d2d; stroke: #555; }
    .module { fill: #3a72a4; stroke: #5a9fd4; }
    .module.rotated { fill: #a4723a; stroke: #d49f5a; }
  }
</style>
"##);

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="title" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN + 12.0,
        escape_xml(&format!(
            "{}×{}  area {}  ({} modules)",
            bounding.width,
            bounding.height,
            floorplan.area,
            floorplan.placements.len()
        ))
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="bounds"/>"#,
        origin_x, origin_y, panel_w, panel_h
    ));
    svg.push('\n');

    let flip = |r: &Rect| -> (f64, f64, f64, f64) {
        let x = origin_x + r.x as f64 * scale;
        let y = origin_y + panel_h - r.top() as f64 * scale;
        (x, y, r.width as f64 * scale, r.height as f64 * scale)
    };

    for (index, placement) in floorplan.placements.iter().enumerate() {
        let (x, y, w, h) = flip(&placement.rect);
        let class = if placement.orientation.swaps_axes() {
            "module rotated"
        } else {
            "module"
        };
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}"><title>{}</title></rect>"#,
            escape_xml(&format!(
                "module {index}: {}×{} at ({}, {}) {:?}",
                placement.rect.width,
                placement.rect.height,
                placement.rect.x,
                placement.rect.y,
                placement.orientation
            ))
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="index" text-anchor="middle" dominant-baseline="central">{index}</text>"#,
            x + w / 2.0,
            y + h / 2.0
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Scale a layout size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving
/// aspect ratio. Returns `(panel_w, panel_h, scale)`.
fn scale_to_fit(width: u32, height: u32) -> (f64, f64, f64) {
    let w = width as f64;
    let h = height as f64;
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
