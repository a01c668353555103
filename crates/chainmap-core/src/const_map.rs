//! # Constant Lookup Views
//!
//! A lookup view is built once from a [`Table`] and answers queries for the
//! rest of the process. The [`AxisOrder`] picks which columns act as keys
//! and which column is returned:
//!
//! | table                     | order       | view                          |
//! |---------------------------|-------------|-------------------------------|
//! | chain → id                | `[0, 1]`    | chain → id (forward)          |
//! | chain → id                | `[1, 0]`    | id → chain (reverse)          |
//! | network → chain → address | `[0, 1, 2]` | (network, chain) → address    |
//! | network → chain → address | `[0, 2, 1]` | (network, address) → chain    |
//! | network → chain → address | `[1, 0]`    | chain → networks (grouped)    |
//!
//! [`ConstMap`] requires every key path to determine one value and rejects
//! the table otherwise. [`GroupedMap`] collects all distinct values of a
//! key path, in first-seen order.
//!
//! When the leading key columns are the table's own axes in order, every
//! declared label is a member of the view, including an outer label whose
//! nested table is empty. Such a path answers `has` and `keys` but has no
//! value, so an exact lookup through it fails.
//!
//! Both views are immutable after construction and are `Send + Sync`.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{RegistryError, TableError};
use crate::literal::{render_path, Column, Key, Literal};
use crate::table::{Cell, Table};

/// Which columns of a table are keys, in lookup order, and which column is
/// the value. The last entry is the value column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisOrder(Vec<usize>);

impl AxisOrder {
    /// Validate a column selection against a table with `columns` columns.
    pub fn new(order: &[usize], columns: usize) -> Result<Self, TableError> {
        let invalid = || TableError::InvalidAxisOrder {
            order: order.to_vec(),
            columns,
        };
        if order.len() < 2 {
            return Err(invalid());
        }
        for (i, &column) in order.iter().enumerate() {
            if column >= columns || order[..i].contains(&column) {
                return Err(invalid());
            }
        }
        Ok(Self(order.to_vec()))
    }

    /// Outer label → … → leaf value, for a table of `depth` axes.
    pub fn forward(depth: usize) -> Self {
        Self((0..=depth).collect())
    }

    /// The key columns, in lookup order.
    pub fn keys(&self) -> &[usize] {
        &self.0[..self.0.len() - 1]
    }

    /// The value column.
    pub fn value(&self) -> usize {
        self.0[self.0.len() - 1]
    }
}

#[derive(Debug, Clone)]
enum Node {
    Branch(IndexMap<Literal, Node>),
    Leaf(Vec<Literal>),
}

impl Node {
    fn branch() -> Self {
        Self::Branch(IndexMap::new())
    }
}

/// The shared index behind both view kinds: a tree keyed by the selected
/// key columns whose leaves hold the distinct values of each key path.
#[derive(Debug, Clone)]
struct Index {
    name: &'static str,
    arity: usize,
    rows: usize,
    root: Node,
}

impl Index {
    fn build(name: &'static str, table: &Table, order: &AxisOrder) -> Self {
        let arity = order.keys().len();
        let flat = table.flatten();
        let mut root = Node::branch();

        let declared = order
            .keys()
            .iter()
            .enumerate()
            .take_while(|&(axis, &column)| axis == column)
            .count();
        if declared > 0 {
            declare(&mut root, table, declared, arity);
        }
        for row in &flat {
            let keys: Vec<Literal> = order.keys().iter().map(|&column| row[column]).collect();
            insert(&mut root, &keys, row[order.value()]);
        }

        tracing::debug!(view = name, rows = flat.len(), arity, "built lookup view");
        Self {
            name,
            arity,
            rows: flat.len(),
            root,
        }
    }

    fn node(&self, path: &[Key<'_>]) -> Option<&Node> {
        let mut node = &self.root;
        for key in path {
            match node {
                Node::Branch(children) => node = children.get(key)?,
                Node::Leaf(_) => return None,
            }
        }
        Some(node)
    }

    fn values(&self, path: &[Key<'_>]) -> Result<&[Literal], RegistryError> {
        if path.len() == self.arity {
            if let Some(Node::Leaf(values)) = self.node(path) {
                if !values.is_empty() {
                    return Ok(values);
                }
            }
        }
        Err(RegistryError::unknown(self.name, render_path(path)))
    }

    fn has(&self, path: &[Key<'_>]) -> bool {
        path.len() <= self.arity && self.node(path).is_some()
    }

    fn keys_at(&self, prefix: &[Key<'_>]) -> Vec<Literal> {
        match self.node(prefix) {
            Some(Node::Branch(children)) => children.keys().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// Every leaf with its key path, depth first in declaration order.
    fn leaves(&self) -> Vec<(Vec<Literal>, &[Literal])> {
        let mut out = Vec::new();
        let mut path = Vec::with_capacity(self.arity);
        walk(&self.root, &mut path, &mut out);
        out
    }
}

/// Add a node for every label of the first `levels` axes of `table`, so
/// labels with no rows below them stay members.
fn declare(node: &mut Node, table: &Table, levels: usize, arity: usize) {
    let Node::Branch(children) = node else {
        return;
    };
    for row in table.rows() {
        let child = children.entry(row.label()).or_insert_with(|| {
            if arity == 1 {
                Node::Leaf(Vec::new())
            } else {
                Node::branch()
            }
        });
        if let Cell::Nested(inner) = row.cell() {
            if levels > 1 {
                declare(child, inner, levels - 1, arity - 1);
            }
        }
    }
}

fn insert(node: &mut Node, keys: &[Literal], value: Literal) {
    match node {
        Node::Branch(children) => {
            let Some((first, rest)) = keys.split_first() else {
                return;
            };
            let child = children.entry(*first).or_insert_with(|| {
                if rest.is_empty() {
                    Node::Leaf(Vec::new())
                } else {
                    Node::branch()
                }
            });
            insert(child, rest, value);
        }
        Node::Leaf(values) => {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
}

fn walk<'a>(node: &'a Node, path: &mut Vec<Literal>, out: &mut Vec<(Vec<Literal>, &'a [Literal])>) {
    match node {
        Node::Leaf(values) => out.push((path.clone(), values)),
        Node::Branch(children) => {
            for (key, child) in children {
                path.push(*key);
                walk(child, path, out);
                path.pop();
            }
        }
    }
}

/// A single-valued lookup view over a table.
#[derive(Debug, Clone)]
pub struct ConstMap {
    index: Index,
}

impl ConstMap {
    /// Build a view with the given axis order.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidAxisOrder`] for a bad column selection,
    /// [`TableError::AmbiguousKey`] if some key path reaches two different
    /// values.
    pub fn new(name: &'static str, table: &Table, order: &[usize]) -> Result<Self, TableError> {
        let order = AxisOrder::new(order, table.columns())?;
        let index = Index::build(name, table, &order);

        for (path, values) in index.leaves() {
            if let [first, second, ..] = values {
                return Err(TableError::AmbiguousKey {
                    view: name,
                    path: render_path(&path.iter().map(Literal::key).collect::<Vec<_>>()),
                    first: *first,
                    second: *second,
                });
            }
        }
        Ok(Self { index })
    }

    /// Outer label → … → leaf value.
    pub fn forward(name: &'static str, table: &Table) -> Result<Self, TableError> {
        Self::new(name, table, &AxisOrder::forward(table.depth()).0)
    }

    /// The view's name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.index.name
    }

    /// Number of key columns a full lookup takes.
    pub fn arity(&self) -> usize {
        self.index.arity
    }

    /// Number of table rows the view was built from.
    pub fn len(&self) -> usize {
        self.index.rows
    }

    /// Whether the source table had no rows.
    pub fn is_empty(&self) -> bool {
        self.index.rows == 0
    }

    /// Exact lookup: one key per key column, in axis order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownKey`] naming the view and the path when the
    /// path is not declared or has the wrong length.
    pub fn get(&self, path: &[Key<'_>]) -> Result<Literal, RegistryError> {
        let values = self.index.values(path)?;
        values
            .first()
            .copied()
            .ok_or_else(|| RegistryError::unknown(self.name(), render_path(path)))
    }

    /// Exact lookup read back as a typed column value.
    pub fn get_as<V: Column>(&self, path: &[Key<'_>]) -> Result<V, RegistryError> {
        let value = self.get(path)?;
        V::from_literal(&value).ok_or_else(|| RegistryError::unknown(self.name(), value))
    }

    /// Whether `path` is a declared prefix. Never fails.
    pub fn has(&self, path: &[Key<'_>]) -> bool {
        self.index.has(path)
    }

    /// Labels of the first key column, in declaration order.
    pub fn keys(&self) -> Vec<Literal> {
        self.index.keys_at(&[])
    }

    /// Labels of the next key column under `prefix`.
    pub fn keys_at(&self, prefix: &[Key<'_>]) -> Vec<Literal> {
        self.index.keys_at(prefix)
    }

    /// Project a one-key view onto typed keys and values.
    ///
    /// # Errors
    ///
    /// [`TableError::Arity`] if the view takes more than one key,
    /// [`TableError::MissingKey`] if a key has no row and
    /// [`TableError::ValueType`] if a value is not a `V`.
    pub fn collect<K, V>(&self, keys: &[K]) -> Result<IndexMap<K, V>, TableError>
    where
        K: Column + Eq + std::hash::Hash,
        V: Column,
    {
        if self.arity() != 1 {
            return Err(TableError::Arity {
                view: self.name(),
                expected: 1,
                found: self.arity(),
            });
        }
        keys.iter()
            .map(|&key| {
                let value = self.get(&[key.key()]).map_err(|_| TableError::MissingKey {
                    view: self.name(),
                    label: key.literal(),
                })?;
                let typed = V::from_literal(&value).ok_or(TableError::ValueType {
                    view: self.name(),
                    value,
                })?;
                Ok((key, typed))
            })
            .collect()
    }
}

/// A lookup view where one key path may collect several values.
#[derive(Debug, Clone)]
pub struct GroupedMap {
    index: Index,
}

impl GroupedMap {
    /// Build a grouped view with the given axis order.
    pub fn new(name: &'static str, table: &Table, order: &[usize]) -> Result<Self, TableError> {
        let order = AxisOrder::new(order, table.columns())?;
        Ok(Self {
            index: Index::build(name, table, &order),
        })
    }

    /// The view's name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.index.name
    }

    /// Number of key columns a full lookup takes.
    pub fn arity(&self) -> usize {
        self.index.arity
    }

    /// All values of a declared key path, in first-seen order.
    pub fn get(&self, path: &[Key<'_>]) -> Result<&[Literal], RegistryError> {
        self.index.values(path)
    }

    /// Whether `path` is a declared prefix. Never fails.
    pub fn has(&self, path: &[Key<'_>]) -> bool {
        self.index.has(path)
    }

    /// Labels of the first key column, in declaration order.
    pub fn keys(&self) -> Vec<Literal> {
        self.index.keys_at(&[])
    }

    /// Labels of the next key column under `prefix`.
    pub fn keys_at(&self, prefix: &[Key<'_>]) -> Vec<Literal> {
        self.index.keys_at(prefix)
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys().iter().map(ToString::to_string).collect();
        write!(f, "[{}] -> {}", keys.join(", "), self.value())
    }
}
