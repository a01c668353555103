//! # chainmap-core — Constant Lookup Tables
//!
//! Static registries (which chains exist, which id each has, which contract
//! lives where on which network) are declared once as nested literal
//! tables. This crate turns such a declaration into everything a caller
//! queries: ordered label enumerations, exact forward and reverse lookups,
//! prefix membership, and typed, closed label sets.
//!
//! ## Building Blocks
//!
//! 1. **[`Table`].** An ordered nested list of `(label, cell)` rows,
//!    declared as a typed `&'static` slice. Label uniqueness and uniform
//!    depth are checked on construction.
//!
//! 2. **[`zip`].** Extracts the declared labels per axis, ordered by first
//!    appearance and free of duplicates.
//!
//! 3. **[`ConstMap`] / [`GroupedMap`].** Immutable lookup views built with an
//!    [`AxisOrder`] that permutes columns into keys and a value. A
//!    `ConstMap` refuses a table where one key path reaches two values.
//!
//! 4. **[`labels!`] / [`Label`] / [`TotalMap`].** Closed label enums and
//!    lookups proven total over them.
//!
//! 5. **[`IdMap`] / [`Id`].** One-to-one label ↔ id registries whose
//!    validated ids cannot be forged.
//!
//! ## Crate Policy
//!
//! - Tables are immutable after construction; every view is `Send + Sync`.
//! - Query failures are [`RegistryError`]; declaration defects are
//!   [`TableError`].
//! - No `unsafe` code. No `.unwrap()` outside tests.

pub mod const_map;
pub mod error;
pub mod id;
pub mod input;
pub mod label;
pub mod literal;
pub mod table;
pub mod zip;

// Re-export primary types for ergonomic imports.
pub use const_map::{AxisOrder, ConstMap, GroupedMap};
pub use error::{RegistryError, TableError};
pub use id::{Id, IdMap, IdRepr};
pub use input::Input;
pub use label::{Label, TotalMap};
pub use literal::{Column, Key, Literal};
pub use table::{Cell, Payload, Row, Table};
pub use zip::{labels, zip};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
