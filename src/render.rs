use crate::config::CM_PER_M;
use crate::types::{FittedLayout, Orientation};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// ASCII drawing of the roll strip: roll width across, used length down.
pub fn render_layout(layout: &FittedLayout) -> String {
    let roll_w = layout.roll_width;
    let roll_len = layout.used_length;
    let across = roll_w - layout.waste_width;

    let scale = f64::min(MAX_WIDTH / roll_w, MAX_HEIGHT / roll_len);
    let grid_w = (roll_w * scale).round() as usize;
    let grid_h = (roll_len * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    // Roll strip border first
    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    let print_w = (across * scale).round() as usize;
    if print_w > 0 {
        draw_rect(&mut grid, 0, 0, print_w, grid_h);
        let (w, h) = match layout.orientation {
            Orientation::Portrait => (across, roll_len),
            Orientation::Landscape => (roll_len, across),
        };
        let label = format!("{}x{}", trim_cm(w), trim_cm(h));
        draw_label(&mut grid, 0, print_w, grid_h, &label);
    }

    if grid_w > print_w {
        draw_label(&mut grid, print_w, grid_w - print_w, grid_h, "waste");
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result.push_str(&format!(
        "roll {}cm, {}, {:.2}m long, {}% used\n",
        trim_cm(roll_w),
        layout.orientation,
        roll_len / CM_PER_M,
        layout.utilization_percent()
    ));
    result
}

fn trim_cm(v: f64) -> String {
    let s = format!("{v:.1}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

/// Centers `label` inside a box spanning columns `x..x + w`, only if it fits.
fn draw_label(grid: &mut [Vec<char>], x: usize, w: usize, h: usize, label: &str) {
    let chars: Vec<char> = label.chars().collect();
    if w <= chars.len() || h < 2 {
        return;
    }
    let cy = h / 2;
    let start_x = x + 1 + (w - 1 - chars.len()) / 2;
    if let Some(row) = grid.get_mut(cy) {
        for (i, &ch) in chars.iter().enumerate() {
            if let Some(cell) = row.get_mut(start_x + i) {
                *cell = ch;
            }
        }
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    // Horizontal edges
    for i in x..=x + w {
        if i < cols {
            for row in [y, y + h] {
                if row < rows {
                    grid[row][i] = if matches!(grid[row][i], '|' | '+') { '+' } else { '-' };
                }
            }
        }
    }

    // Vertical edges
    for j in y..=y + h {
        if j < rows {
            for col in [x, x + w] {
                if col < cols {
                    grid[j][col] = if matches!(grid[j][col], '-' | '+') { '+' } else { '|' };
                }
            }
        }
    }

    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
