use console::style;

use crate::models::DefectLocation;

/// Character-grid stand-in for the browser's absolutely positioned defect
/// markers. Coordinates are percentages of the preview area.
pub const OVERLAY_COLS: usize = 40;
pub const OVERLAY_ROWS: usize = 12;

pub fn render_overlay(markers: &[DefectLocation]) -> String {
    let mut grid = vec![[false; OVERLAY_COLS]; OVERLAY_ROWS];
    for m in markers {
        let (col, row) = cell_for(m.x, m.y);
        grid[row][col] = true;
    }

    let mut out = String::new();
    for row in &grid {
        out.push_str("  ");
        for &marked in row.iter() {
            if marked {
                out.push_str(&style("✚").red().bold().to_string());
            } else {
                out.push_str(&style("·").dim().to_string());
            }
        }
        out.push('\n');
    }
    out
}

/// Map percentage coordinates onto the grid, clamping out-of-range input.
pub fn cell_for(x: f64, y: f64) -> (usize, usize) {
    let cx = x.clamp(0.0, 100.0) / 100.0;
    let cy = y.clamp(0.0, 100.0) / 100.0;
    let col = (cx * (OVERLAY_COLS - 1) as f64).round() as usize;
    let row = (cy * (OVERLAY_ROWS - 1) as f64).round() as usize;
    (col, row)
}
