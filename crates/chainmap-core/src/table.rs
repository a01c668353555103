//! # Tables
//!
//! A [`Table`] is an ordered list of `(label, cell)` rows where every cell is
//! either a leaf [`Literal`] or another table. A table of depth *d* has *d*
//! label axes plus one value column.
//!
//! ## Invariants
//!
//! - Labels are unique within a table.
//! - All rows of a table have the same depth.
//!
//! Both are checked when a table is built. Tables declared as typed slices
//! (`&[(Chain, &[(Network, &str)])]`) get uniform depth from the type
//! system; [`Table::new`] checks it for tables assembled by hand.

use std::collections::HashSet;

use crate::error::TableError;
use crate::literal::{Column, Literal};

/// A nested, ordered table of literal rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    depth: usize,
    rows: Vec<Row>,
}

/// One `(label, cell)` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    label: Literal,
    cell: Cell,
}

/// The payload column of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Terminal value.
    Leaf(Literal),
    /// A nested table one axis deeper.
    Nested(Table),
}

impl Cell {
    /// Number of label axes below this cell.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Nested(table) => table.depth,
        }
    }
}

impl Row {
    /// The row's label.
    pub fn label(&self) -> Literal {
        self.label
    }

    /// The row's payload.
    pub fn cell(&self) -> &Cell {
        &self.cell
    }
}

impl Table {
    /// Build a table from hand-assembled rows, checking label uniqueness and
    /// uniform depth. An empty row list yields a one-axis table; use
    /// [`Table::empty`] for deeper empty tables.
    pub fn new(rows: Vec<(Literal, Cell)>) -> Result<Self, TableError> {
        let depth = rows.first().map_or(0, |(_, cell)| cell.depth()) + 1;
        let mut seen = HashSet::with_capacity(rows.len());
        let mut checked = Vec::with_capacity(rows.len());

        for (label, cell) in rows {
            if !seen.insert(label) {
                return Err(TableError::DuplicateLabel { label });
            }
            if cell.depth() + 1 != depth {
                return Err(TableError::InconsistentShape {
                    label,
                    expected: depth - 1,
                    found: cell.depth(),
                });
            }
            checked.push(Row { label, cell });
        }

        Ok(Self {
            depth,
            rows: checked,
        })
    }

    /// An empty table with `depth` axes.
    pub fn empty(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            rows: Vec::new(),
        }
    }

    /// Build a table from a typed slice declaration.
    pub fn from_rows<K: Column, P: Payload>(rows: &[(K, P)]) -> Result<Self, TableError> {
        let rows = rows
            .iter()
            .map(|(label, payload)| Ok((label.literal(), payload.cell()?)))
            .collect::<Result<Vec<_>, TableError>>()?;
        let mut table = Self::new(rows)?;
        // The slice type fixes the depth even when there are no rows.
        table.depth = P::depth() + 1;
        Ok(table)
    }

    /// Number of label axes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of columns: the axes plus the value column.
    pub fn columns(&self) -> usize {
        self.depth + 1
    }

    /// The rows in declaration order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows at the top level.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the top level has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every root-to-leaf path as a row of `columns()` literals, in
    /// declaration order.
    pub fn flatten(&self) -> Vec<Vec<Literal>> {
        let mut out = Vec::new();
        let mut prefix = Vec::with_capacity(self.columns());
        flatten_into(self, &mut prefix, &mut out);
        out
    }
}

fn flatten_into(table: &Table, prefix: &mut Vec<Literal>, out: &mut Vec<Vec<Literal>>) {
    for row in &table.rows {
        prefix.push(row.label);
        match &row.cell {
            Cell::Leaf(value) => {
                let mut path = prefix.clone();
                path.push(*value);
                out.push(path);
            }
            Cell::Nested(inner) => flatten_into(inner, prefix, out),
        }
        prefix.pop();
    }
}

/// Something that can fill the payload column of a typed table row: a
/// leaf [`Column`] value or a nested row slice.
pub trait Payload {
    /// Number of label axes below this payload; zero for leaves.
    fn depth() -> usize;

    /// Convert into a table cell.
    fn cell(&self) -> Result<Cell, TableError>;
}

impl<K: Column, P: Payload> Payload for &'static [(K, P)] {
    fn depth() -> usize {
        P::depth() + 1
    }

    fn cell(&self) -> Result<Cell, TableError> {
        Table::from_rows(self).map(Cell::Nested)
    }
}

/// Implement [`Payload`] for leaf [`Column`] types.
#[macro_export]
macro_rules! leaf_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Payload for $ty {
                fn depth() -> usize {
                    0
                }

                fn cell(&self) -> ::core::result::Result<$crate::Cell, $crate::TableError> {
                    Ok($crate::Cell::Leaf($crate::Column::literal(*self)))
                }
            }
        )+
    };
}

leaf_payload!(&'static str, u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAINS: &[(&str, u32)] = &[("Ethereum", 0), ("Polygon", 7)];

    const CONTRACTS: &[(&str, &[(&str, &str)])] = &[
        ("Mainnet", &[("Ethereum", "0xaaa"), ("Polygon", "0xbbb")]),
        ("Testnet", &[("Ethereum", "0xccc")]),
    ];

    #[test]
    fn one_axis_table() {
        let table = Table::from_rows(DOMAINS).unwrap();
        assert_eq!(table.depth(), 1);
        assert_eq!(table.columns(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].label(), Literal::Str("Polygon"));
        assert_eq!(table.rows()[1].cell(), &Cell::Leaf(Literal::Num(7)));
    }

    #[test]
    fn two_axis_table_flattens_in_order() {
        let table = Table::from_rows(CONTRACTS).unwrap();
        assert_eq!(table.depth(), 2);
        assert_eq!(
            table.flatten(),
            vec![
                vec![Literal::Str("Mainnet"), Literal::Str("Ethereum"), Literal::Str("0xaaa")],
                vec![Literal::Str("Mainnet"), Literal::Str("Polygon"), Literal::Str("0xbbb")],
                vec![Literal::Str("Testnet"), Literal::Str("Ethereum"), Literal::Str("0xccc")],
            ]
        );
    }

    #[test]
    fn duplicate_label_rejected() {
        let rows: &[(&str, u32)] = &[("Ethereum", 0), ("Ethereum", 1)];
        assert_eq!(
            Table::from_rows(rows),
            Err(TableError::DuplicateLabel {
                label: Literal::Str("Ethereum")
            })
        );
    }

    #[test]
    fn duplicate_label_in_nested_table_rejected() {
        const NESTED: &[(&str, &[(&str, u32)])] =
            &[("Mainnet", &[("Base", 6), ("Base", 6)])];
        assert!(matches!(
            Table::from_rows(NESTED),
            Err(TableError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn inconsistent_shape_rejected() {
        let inner = Table::from_rows(DOMAINS).unwrap();
        let result = Table::new(vec![
            (Literal::Str("Mainnet"), Cell::Nested(inner)),
            (Literal::Str("Testnet"), Cell::Leaf(Literal::Num(1))),
        ]);
        assert_eq!(
            result,
            Err(TableError::InconsistentShape {
                label: Literal::Str("Testnet"),
                expected: 1,
                found: 0,
            })
        );
    }

    #[test]
    fn empty_typed_table_keeps_depth() {
        const NONE: &[(&str, &[(&str, u32)])] = &[];
        let table = Table::from_rows(NONE).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.depth(), 2);
        assert!(table.flatten().is_empty());
    }

    #[test]
    fn empty_nested_table_accepted_beside_full_one() {
        let result = Table::new(vec![
            (
                Literal::Str("Mainnet"),
                Cell::Nested(Table::from_rows(DOMAINS).unwrap()),
            ),
            (Literal::Str("Devnet"), Cell::Nested(Table::empty(1))),
        ]);
        let table = result.unwrap();
        assert_eq!(table.depth(), 2);
        assert_eq!(table.flatten().len(), 2);
    }
}
