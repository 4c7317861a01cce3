//! Table detection and markdown rendering.
//!
//! Detects tables in PDF content by analyzing character X positions for
//! column alignment. The algorithm:
//!
//! 1. Group characters into lines
//! 2. Find column boundaries (large horizontal gaps) in each line
//! 3. Group consecutive lines with aligned boundaries
//! 4. Runs of `min_rows`+ aligned lines are classified as tables
//! 5. Extract cell text by splitting at boundary positions
//!
//! Complexity: O(L * C) where L = lines, C = max columns per line.

use super::layout::{cluster_lines, Line};
use super::types::{BBox, Character, Table};

impl Table {
    /// Render this table as a GitHub-flavored markdown table.
    ///
    /// Row 0 is the header; a header-only table renders header and
    /// separator with no body rows.
    pub fn to_markdown(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        let col_count = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if col_count == 0 {
            return String::new();
        }

        let mut md = String::new();

        // Header row
        push_row(&mut md, &self.rows[0], col_count);

        // Separator row
        md.push('|');
        for _ in 0..col_count {
            md.push_str(" --- |");
        }
        md.push('\n');

        // Data rows
        for row in self.rows.iter().skip(1) {
            push_row(&mut md, row, col_count);
        }

        md
    }
}

fn push_row(md: &mut String, row: &[String], col_count: usize) {
    md.push('|');
    for col in 0..col_count {
        let cell = row.get(col).map(String::as_str).unwrap_or("");
        md.push(' ');
        md.push_str(&escape_cell(cell));
        md.push_str(" |");
    }
    md.push('\n');
}

/// Cells must stay on one line and must not introduce extra columns.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Heuristic table detector over a page's characters.
#[derive(Debug, Clone, Copy)]
pub struct TableFinder {
    /// Minimum number of consecutive aligned rows to consider a table.
    pub min_rows: usize,
    /// Tolerance (in PDF points) for column boundary alignment.
    pub boundary_tolerance: f32,
    /// Line grouping tolerance (in PDF points).
    pub y_tolerance: f32,
}

impl Default for TableFinder {
    fn default() -> Self {
        Self {
            min_rows: 3,
            boundary_tolerance: 5.0,
            y_tolerance: 3.0,
        }
    }
}

impl TableFinder {
    /// Detect tables among the characters of one page.
    ///
    /// Tables are returned top to bottom.
    pub fn find(&self, chars: &[Character]) -> Vec<Table> {
        let lines = cluster_lines(chars, |c| &c.bbox, self.y_tolerance);
        let line_boundaries: Vec<Vec<f32>> = lines.iter().map(find_column_boundaries).collect();

        let mut tables = Vec::new();
        let mut run_start = 0;
        while run_start < lines.len() {
            let mut run_end = run_start + 1;

            while run_end < lines.len()
                && boundaries_align(
                    &line_boundaries[run_start],
                    &line_boundaries[run_end],
                    self.boundary_tolerance,
                )
            {
                run_end += 1;
            }

            let run_len = run_end - run_start;
            if run_len >= self.min_rows && !line_boundaries[run_start].is_empty() {
                let boundaries = &line_boundaries[run_start];
                let table_lines = &lines[run_start..run_end];

                let rows = table_lines
                    .iter()
                    .map(|line| split_at_boundaries(line, boundaries))
                    .collect();

                let bbox = table_lines
                    .iter()
                    .flat_map(|line| line.items.iter().map(|c| c.bbox))
                    .reduce(|acc, b| acc.union(&b))
                    .map(|bbox| {
                        let above = run_start.checked_sub(1).map(|i| line_extent(&lines[i]));
                        let below = lines.get(run_end).map(line_extent);
                        clamp_between(bbox, above, below)
                    });

                if let Some(bbox) = bbox {
                    tables.push(Table { bbox, rows });
                }
            }

            run_start = run_end;
        }

        tables
    }
}

/// Margin kept between a table's box and the lines around it.
const LINE_MARGIN: f32 = 0.01;

/// Vertical extent `(top, bottom)` of a line's glyphs.
fn line_extent(line: &Line<'_, Character>) -> (f32, f32) {
    line.items.iter().fold((f32::MAX, f32::MIN), |(top, bottom), c| {
        (top.min(c.bbox.top), bottom.max(c.bbox.bottom))
    })
}

/// Shrink a table box so it cannot touch the glyphs of the lines directly
/// above and below it. Glyph boxes on a tight pitch share edges, and a shared
/// edge already counts as overlap.
fn clamp_between(bbox: BBox, above: Option<(f32, f32)>, below: Option<(f32, f32)>) -> BBox {
    let mut clamped = bbox;
    if let Some((_, prev_bottom)) = above {
        clamped.top = clamped.top.max(prev_bottom + LINE_MARGIN);
    }
    if let Some((next_top, _)) = below {
        clamped.bottom = clamped.bottom.min(next_top - LINE_MARGIN);
    }
    // Lines that overlap heavily leave no room; keep the glyph union then
    if clamped.top < clamped.bottom {
        clamped
    } else {
        bbox
    }
}

fn average_width(chars: &[&Character]) -> f32 {
    chars.iter().map(|c| c.bbox.width()).sum::<f32>() / chars.len() as f32
}

/// Find X positions where column gaps occur in a text line.
///
/// A column gap is defined as a horizontal space greater than 2x the
/// average character width in that line.
fn find_column_boundaries(line: &Line<'_, Character>) -> Vec<f32> {
    let chars = &line.items;
    if chars.len() < 2 {
        return Vec::new();
    }

    let gap_threshold = average_width(chars) * 2.0;

    let mut boundaries = Vec::new();
    for pair in chars.windows(2) {
        let gap = pair[1].bbox.x0 - pair[0].bbox.x1;
        if gap > gap_threshold {
            // Boundary at the midpoint of the gap
            boundaries.push(pair[0].bbox.x1 + gap / 2.0);
        }
    }
    boundaries
}

/// Check if two sets of column boundaries are aligned within tolerance.
fn boundaries_align(a: &[f32], b: &[f32], tolerance: f32) -> bool {
    if a.len() != b.len() || a.is_empty() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(ax, bx)| (ax - bx).abs() < tolerance)
}

/// Split a line's characters at column boundaries, producing cell strings.
///
/// Word gaps inside a cell (wider than 0.3x the average glyph width) become
/// a single space.
fn split_at_boundaries(line: &Line<'_, Character>, boundaries: &[f32]) -> Vec<String> {
    let mut cells = vec![String::new(); boundaries.len() + 1];
    let mut last: Vec<Option<BBox>> = vec![None; boundaries.len() + 1];
    let space_threshold = average_width(&line.items) * 0.3;

    for ch in &line.items {
        let col = boundaries
            .iter()
            .position(|&b| ch.bbox.x0 < b)
            .unwrap_or(boundaries.len());
        if let Some(prev) = last[col] {
            if ch.bbox.x0 - prev.x1 > space_threshold {
                cells[col].push(' ');
            }
        }
        cells[col].push_str(&ch.text);
        last[col] = Some(ch.bbox);
    }

    cells.iter().map(|s| s.trim().to_string()).collect()
}
