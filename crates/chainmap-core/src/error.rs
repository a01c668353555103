//! # Error Types
//!
//! Two families of errors live here, and they never mix:
//!
//! - [`RegistryError`] is what queries return. There are exactly two kinds:
//!   an input that is not a declared label/id/path (`UnknownKey`), and an
//!   input that matched none of the accepted representations of a lenient
//!   converter (`ConversionFailure`). Both carry the rejected input.
//!
//! - [`TableError`] describes a defect in a table declaration. Tables are
//!   baked into the binary, so these surface while a registry is built and
//!   are caught by the registry's own tests, never by a caller's query.

use std::fmt::Display;

use thiserror::Error;

use crate::literal::Literal;

/// Error returned by lookups, assertions and conversions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The supplied label, id or path is not declared at the relevant axis.
    #[error("unknown {kind}: {value}")]
    UnknownKey {
        /// What was being looked up, e.g. "Circle chain id".
        kind: &'static str,
        /// The rejected input, rendered for diagnostics.
        value: String,
    },

    /// None of the accepted input representations matched a declared label.
    #[error("cannot convert to {target}: {input}")]
    ConversionFailure {
        /// The conversion target, e.g. "Circle chain".
        target: &'static str,
        /// The original input, before any numeric narrowing.
        input: String,
    },
}

impl RegistryError {
    /// Build an [`RegistryError::UnknownKey`] from anything displayable.
    pub fn unknown(kind: &'static str, value: impl Display) -> Self {
        Self::UnknownKey {
            kind,
            value: value.to_string(),
        }
    }

    /// Build a [`RegistryError::ConversionFailure`] from anything displayable.
    pub fn conversion(target: &'static str, input: impl Display) -> Self {
        Self::ConversionFailure {
            target,
            input: input.to_string(),
        }
    }
}

/// Defect in a table declaration or in a view derived from one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A label occurs twice within one table.
    #[error("duplicate label {label} in table")]
    DuplicateLabel {
        /// The repeated label.
        label: Literal,
    },

    /// Rows of one table disagree on nesting depth.
    #[error("row {label} has depth {found}, expected {expected}")]
    InconsistentShape {
        /// Label of the first offending row.
        label: Literal,
        /// Depth established by the first row.
        expected: usize,
        /// Depth of the offending row.
        found: usize,
    },

    /// The axis order selects an unknown or repeated column, or too few.
    #[error("invalid axis order {order:?} for a table with {columns} columns")]
    InvalidAxisOrder {
        /// The rejected column selection.
        order: Vec<usize>,
        /// Number of columns (axes plus the value column) in the table.
        columns: usize,
    },

    /// One key path of a view leads to two different values.
    #[error("{view}: key path [{path}] maps to both {first} and {second}")]
    AmbiguousKey {
        /// Name of the view being built.
        view: &'static str,
        /// The key path, comma separated.
        path: String,
        /// Value recorded first.
        first: Literal,
        /// Conflicting value found later.
        second: Literal,
    },

    /// A label expected by a typed projection has no row in the view.
    #[error("{view}: no entry for {label}")]
    MissingKey {
        /// Name of the view.
        view: &'static str,
        /// The label that has no row.
        label: Literal,
    },

    /// A cell could not be read back as the projection's value type.
    #[error("{view}: value {value} does not have the expected type")]
    ValueType {
        /// Name of the view.
        view: &'static str,
        /// The offending cell.
        value: Literal,
    },

    /// The table declares a label the closed enumeration does not have.
    #[error("{view}: {label} is not a declared {kind}")]
    UndeclaredLabel {
        /// Name of the view.
        view: &'static str,
        /// Kind of the closed enumeration.
        kind: &'static str,
        /// The stray label.
        label: Literal,
    },

    /// A typed projection was asked of a view with the wrong key arity.
    #[error("{view}: expected {expected} key column(s), view has {found}")]
    Arity {
        /// Name of the view.
        view: &'static str,
        /// Arity the projection needs.
        expected: usize,
        /// Arity of the view.
        found: usize,
    },
}
