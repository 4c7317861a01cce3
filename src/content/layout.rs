//! Layout-preserving text rendering.
//!
//! Reconstructs reading-order text from positioned page items:
//!
//! 1. Sort by top, then left edge.
//! 2. Group items whose `top` is within `y_tolerance` of the line's first
//!    item into the same line.
//! 3. Insert a single space at horizontal gaps wider than `x_tolerance`.
//! 4. Separate lines by newlines proportional to their vertical distance.
//!
//! Table blocks always occupy their own lines.

use std::cmp::Ordering;

use serde::Deserialize;

use super::types::{BBox, PageItem};

/// Tolerances for line grouping and spacing, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Horizontal gap above which a space is inserted.
    pub x_tolerance: f32,
    /// Maximum `top` difference for items on the same line.
    pub y_tolerance: f32,
    /// Points of vertical distance per emitted newline.
    pub y_density: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 3.0,
            y_tolerance: 3.0,
            y_density: 13.0,
        }
    }
}

/// A group of items sharing a baseline band, ordered left to right.
pub(crate) struct Line<'a, T> {
    pub top: f32,
    pub items: Vec<&'a T>,
}

/// Cluster items into lines, top to bottom, each ordered by `x0`.
pub(crate) fn cluster_lines<'a, T, F>(items: &'a [T], bbox: F, y_tolerance: f32) -> Vec<Line<'a, T>>
where
    F: Fn(&T) -> &BBox,
{
    if items.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| {
        let (a, b) = (bbox(*a), bbox(*b));
        a.top
            .partial_cmp(&b.top)
            .unwrap_or(Ordering::Equal)
            .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Line<'a, T>> = Vec::new();
    let mut current = Line {
        top: bbox(sorted[0]).top,
        items: vec![sorted[0]],
    };

    for item in sorted.into_iter().skip(1) {
        let top = bbox(item).top;
        if (top - current.top).abs() <= y_tolerance {
            current.items.push(item);
        } else {
            lines.push(current);
            current = Line {
                top,
                items: vec![item],
            };
        }
    }
    lines.push(current);

    for line in &mut lines {
        line.items.sort_by(|a, b| {
            bbox(*a)
                .x0
                .partial_cmp(&bbox(*b).x0)
                .unwrap_or(Ordering::Equal)
        });
    }

    lines
}

/// Render page items into a single layout-preserving string.
pub fn render_layout(items: &[PageItem], options: &LayoutOptions) -> String {
    let lines = cluster_lines(items, PageItem::bbox, options.y_tolerance);

    let mut output = String::new();
    let mut prev_top: Option<f32> = None;

    for line in &lines {
        if let Some(prev) = prev_top {
            let gap = ((line.top - prev) / options.y_density).round().max(1.0) as usize;
            for _ in 0..gap {
                output.push('\n');
            }
        }
        output.push_str(&render_line(&line.items, options));
        prev_top = Some(line.top);
    }

    output
}

/// Render one line. A table block splits the line: text before it, the
/// table's rows, then text after it, each on separate output lines.
fn render_line(items: &[&PageItem], options: &LayoutOptions) -> String {
    let mut rows: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut last_x1: Option<f32> = None;

    for item in items {
        match item {
            PageItem::Text(ch) => {
                if let Some(x1) = last_x1 {
                    if ch.bbox.x0 - x1 > options.x_tolerance && !current.is_empty() {
                        current.push(' ');
                    }
                }
                current.push_str(&ch.text);
                last_x1 = Some(ch.bbox.x1);
            }
            PageItem::Table(block) => {
                flush(&mut current, &mut rows);
                rows.extend(
                    block
                        .markdown
                        .lines()
                        .map(str::trim_end)
                        .filter(|l| !l.is_empty())
                        .map(String::from),
                );
                last_x1 = None;
            }
        }
    }
    flush(&mut current, &mut rows);

    rows.join("\n")
}

fn flush(current: &mut String, rows: &mut Vec<String>) {
    let trimmed = current.trim_end();
    if !trimmed.is_empty() {
        rows.push(trimmed.to_string());
    }
    current.clear();
}
