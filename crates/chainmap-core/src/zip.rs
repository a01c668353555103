//! # Table Zipper
//!
//! Extracts the declared label sequences of a table, one axis at a time.
//! The result for an axis is ordered by first appearance and free of
//! duplicates: when several nested tables declare overlapping label sets
//! (two networks supporting different chain subsets), a label is recorded
//! once, where it was first seen.
//!
//! These sequences are the authoritative enumerations of "what is valid at
//! this axis" that the typed registries check their closed enums against.

use indexmap::IndexSet;

use crate::literal::Literal;
use crate::table::{Cell, Table};

/// Labels of the outermost axis and the union of labels of the next axis.
///
/// For a table with terminal payloads the second sequence is empty; use
/// [`labels`] with `axis = 1` to read the value column instead.
pub fn zip(table: &Table) -> (Vec<Literal>, Vec<Literal>) {
    let inner = if table.depth() > 1 {
        labels(table, 1)
    } else {
        Vec::new()
    };
    (labels(table, 0), inner)
}

/// Ordered, duplicate-free labels at `axis`.
///
/// `axis == table.depth()` reads the leaf value column; anything deeper is
/// empty.
pub fn labels(table: &Table, axis: usize) -> Vec<Literal> {
    let mut out = IndexSet::new();
    collect(table, axis, &mut out);
    out.into_iter().collect()
}

fn collect(table: &Table, axis: usize, out: &mut IndexSet<Literal>) {
    for row in table.rows() {
        if axis == 0 {
            out.insert(row.label());
            continue;
        }
        match row.cell() {
            Cell::Nested(inner) => collect(inner, axis - 1, out),
            Cell::Leaf(value) if axis == 1 => {
                out.insert(*value);
            }
            Cell::Leaf(_) => {}
        }
    }
}
