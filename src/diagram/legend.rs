//! Legend construction
//!
//! One legend entry per category, taken from the first node of that
//! category in declaration order. Later nodes of the same category are
//! still drawn, just not listed.

use std::collections::HashSet;

use super::graph::Node;

/// A legend slot and the node whose marker represents it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry<'a> {
    pub category: &'a str,
    pub node: &'a Node,
}

/// Fold over nodes, threading the set of categories already listed
pub fn legend_entries(nodes: &[Node]) -> Vec<LegendEntry<'_>> {
    nodes
        .iter()
        .fold(
            (HashSet::new(), Vec::new()),
            |(mut seen, mut entries), node| {
                if seen.insert(node.category.as_str()) {
                    entries.push(LegendEntry {
                        category: node.category.as_str(),
                        node,
                    });
                }
                (seen, entries)
            },
        )
        .1
}

/// Per-node flag: does this node own its category's legend slot
pub fn legend_flags(nodes: &[Node]) -> Vec<bool> {
    let entries = legend_entries(nodes);
    nodes
        .iter()
        .map(|n| entries.iter().any(|e| std::ptr::eq(e.node, n)))
        .collect()
}

/// A legend entry placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSlot {
    pub row: usize,
    /// Left edge of the slot, relative to the start of its row
    pub x: f64,
    pub width: f64,
}

/// Lay entries out left to right, starting a new row whenever the next
/// entry would exceed `max_width`. Returns the slots and each row's width.
pub fn layout_rows(widths: &[f64], max_width: f64) -> (Vec<LegendSlot>, Vec<f64>) {
    let mut slots = Vec::with_capacity(widths.len());
    let mut row_widths = Vec::new();
    let mut row = 0;
    let mut cursor = 0.0;

    for &width in widths {
        if cursor > 0.0 && cursor + width > max_width {
            row_widths.push(cursor);
            row += 1;
            cursor = 0.0;
        }
        slots.push(LegendSlot { row, x: cursor, width });
        cursor += width;
    }
    if cursor > 0.0 {
        row_widths.push(cursor);
    }

    (slots, row_widths)
}
