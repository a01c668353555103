//! # Bidirectional Id Registries
//!
//! An [`IdMap`] is a one-to-one table between a closed label enum and
//! numeric ids (chain → Wormhole chain id, Circle chain → CCTP domain).
//! It is built from a single `&[(label, id)]` declaration and derives all
//! four directions from it: label → id, id → label, and the two ordered
//! enumerations.
//!
//! ## Validated ids
//!
//! An [`Id`] is only ever produced by an `IdMap`, by forward lookup, by
//! enumeration, or by a successful assertion. Raw integers go through
//! [`IdMap::as_id`] or [`IdMap::to_id`]. Two registries can share the
//! type `IdMap<L, I>`, so [`IdMap::label`] still checks that the id is one
//! of its own and reports `UnknownKey` otherwise.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::const_map::ConstMap;
use crate::error::{RegistryError, TableError};
use crate::input::Input;
use crate::label::{Label, TotalMap};
use crate::literal::{Column, Key};
use crate::table::{Payload, Table};
use crate::zip::zip;

/// Integer widths usable as registry ids.
pub trait IdRepr:
    Column + Payload + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + Into<u64> + TryFrom<u64>
{
}

impl IdRepr for u8 {}
impl IdRepr for u16 {}
impl IdRepr for u32 {}
impl IdRepr for u64 {}

/// An id minted by an [`IdMap`] over labels `L`.
pub struct Id<L, I> {
    value: I,
    label: PhantomData<fn() -> L>,
}

impl<L, I: Copy> Id<L, I> {
    fn new(value: I) -> Self {
        Self {
            value,
            label: PhantomData,
        }
    }

    /// The raw id.
    pub fn get(self) -> I {
        self.value
    }
}

impl<L, I: Copy> Clone for Id<L, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L, I: Copy> Copy for Id<L, I> {}

impl<L, I: PartialEq> PartialEq for Id<L, I> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<L, I: Eq> Eq for Id<L, I> {}

impl<L, I: Ord> PartialOrd for Id<L, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L, I: Ord> Ord for Id<L, I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<L, I: Hash> Hash for Id<L, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<L, I: fmt::Debug> fmt::Debug for Id<L, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<L, I: fmt::Display> fmt::Display for Id<L, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<L, I: Serialize> Serialize for Id<L, I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<L, I: Into<u64>> From<Id<L, I>> for Input<'_> {
    fn from(id: Id<L, I>) -> Self {
        Input::Number(id.value.into())
    }
}

/// A one-to-one registry between labels `L` and ids `I`.
#[derive(Debug, Clone)]
pub struct IdMap<L: Label, I: IdRepr> {
    label_kind: &'static str,
    id_kind: &'static str,
    by_label: ConstMap,
    by_id: ConstMap,
    forward: TotalMap<L, I>,
    reverse: IndexMap<I, L>,
    labels: Vec<L>,
    ids: Vec<Id<L, I>>,
}

impl<L: Label, I: IdRepr> IdMap<L, I> {
    /// Build the registry from its declaration.
    ///
    /// # Errors
    ///
    /// - [`TableError::DuplicateLabel`] if a label is declared twice.
    /// - [`TableError::AmbiguousKey`] if two labels share an id.
    /// - [`TableError::MissingKey`] if a variant of `L` has no row.
    pub fn new(
        label_kind: &'static str,
        id_kind: &'static str,
        rows: &[(L, I)],
    ) -> Result<Self, TableError> {
        let table = Table::from_rows(rows)?;
        let by_label = ConstMap::forward(label_kind, &table)?;
        let by_id = ConstMap::new(id_kind, &table, &[1, 0])?;
        let forward = TotalMap::new(&by_label)?;

        let (declared, _) = zip(&table);
        let labels: Vec<L> = declared.iter().filter_map(L::from_literal).collect();
        let raw_ids: Vec<I> = labels.iter().map(|&label| forward.get(label)).collect();
        let reverse = by_id.collect(&raw_ids)?;
        let ids = raw_ids.into_iter().map(Id::new).collect();

        tracing::debug!(label_kind, id_kind, entries = labels.len(), "built id registry");
        Ok(Self {
            label_kind,
            id_kind,
            by_label,
            by_id,
            forward,
            reverse,
            labels,
            ids,
        })
    }

    /// Name of the label set, e.g. "chain".
    pub fn label_kind(&self) -> &'static str {
        self.label_kind
    }

    /// Name of the id set, e.g. "chain id".
    pub fn id_kind(&self) -> &'static str {
        self.id_kind
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Ids in declaration order; `ids()[i]` belongs to `labels()[i]`.
    pub fn ids(&self) -> &[Id<L, I>] {
        &self.ids
    }

    /// The id of a label.
    pub fn id(&self, label: L) -> Id<L, I> {
        Id::new(self.forward.get(label))
    }

    /// The label of an id.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownKey`] if `id` was minted by another registry
    /// of the same type and is not declared here.
    pub fn label(&self, id: Id<L, I>) -> Result<L, RegistryError> {
        self.reverse
            .get(&id.value)
            .copied()
            .ok_or_else(|| RegistryError::unknown(self.id_kind, id))
    }

    /// Whether `s` is a declared label. Exact and case-sensitive.
    pub fn is_label(&self, s: &str) -> bool {
        self.by_label.has(&[Key::Str(s)])
    }

    /// Whether `id` is a declared id.
    pub fn is_id(&self, id: I) -> bool {
        self.by_id.has(&[id.key()])
    }

    /// Narrow a string to a label.
    pub fn as_label(&self, s: &str) -> Result<L, RegistryError> {
        if self.is_label(s) {
            if let Some(label) = L::parse_label(s) {
                return Ok(label);
            }
        }
        Err(RegistryError::unknown(self.label_kind, s))
    }

    /// Fail unless `s` is a declared label.
    pub fn assert_label(&self, s: &str) -> Result<(), RegistryError> {
        self.as_label(s).map(drop)
    }

    /// Narrow a raw integer to a validated id.
    pub fn as_id(&self, id: I) -> Result<Id<L, I>, RegistryError> {
        if self.is_id(id) {
            Ok(Id::new(id))
        } else {
            Err(RegistryError::unknown(self.id_kind, id))
        }
    }

    /// Fail unless `id` is a declared id.
    pub fn assert_id(&self, id: I) -> Result<(), RegistryError> {
        self.as_id(id).map(drop)
    }

    /// Lenient conversion to a label: accepts a label or an id in any
    /// integer representation.
    pub fn to_label<'a>(&self, input: impl Into<Input<'a>>) -> Result<L, RegistryError> {
        let input = input.into();
        let found = match &input {
            Input::Label(s) => self.as_label(s).ok(),
            _ => self.narrow(&input).and_then(|id| self.label(id).ok()),
        };
        found.ok_or_else(|| self.reject(self.label_kind, &input))
    }

    /// Lenient conversion to an id: accepts a label or an id in any integer
    /// representation.
    pub fn to_id<'a>(&self, input: impl Into<Input<'a>>) -> Result<Id<L, I>, RegistryError> {
        let input = input.into();
        let found = match &input {
            Input::Label(s) => self.as_label(s).ok().map(|label| self.id(label)),
            _ => self.narrow(&input),
        };
        found.ok_or_else(|| self.reject(self.id_kind, &input))
    }

    /// Numeric input narrowed to `I` and checked for membership.
    fn narrow(&self, input: &Input<'_>) -> Option<Id<L, I>> {
        let raw = I::try_from(input.as_u64()?).ok()?;
        self.as_id(raw).ok()
    }

    fn reject(&self, target: &'static str, input: &Input<'_>) -> RegistryError {
        tracing::trace!(target_kind = target, %input, "conversion rejected");
        RegistryError::conversion(target, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::labels! {
        /// Test chains.
        pub enum Chain: "chain" {
            Solana,
            Ethereum,
            Base,
        }
    }

    const IDS: &[(Chain, u16)] = &[(Chain::Solana, 1), (Chain::Ethereum, 2), (Chain::Base, 30)];

    fn registry() -> IdMap<Chain, u16> {
        IdMap::new("chain", "chain id", IDS).unwrap()
    }

    #[test]
    fn both_directions() {
        let reg = registry();
        assert_eq!(reg.id(Chain::Base).get(), 30);
        let id = reg.as_id(2).unwrap();
        assert_eq!(reg.label(id), Ok(Chain::Ethereum));
        assert_eq!(reg.labels(), [Chain::Solana, Chain::Ethereum, Chain::Base]);
        let ids: Vec<u16> = reg.ids().iter().map(|id| id.get()).collect();
        assert_eq!(ids, [1, 2, 30]);
    }

    #[test]
    fn membership() {
        let reg = registry();
        assert!(reg.is_label("Solana"));
        assert!(!reg.is_label("solana"));
        assert!(!reg.is_label(""));
        assert!(reg.is_id(30));
        assert!(!reg.is_id(0));
    }

    #[test]
    fn assertions_report_input() {
        let reg = registry();
        assert!(reg.assert_id(1).is_ok());
        assert_eq!(
            reg.assert_id(3).unwrap_err().to_string(),
            "unknown chain id: 3"
        );
        assert_eq!(reg.as_label("Base"), Ok(Chain::Base));
        assert_eq!(
            reg.assert_label("Tron").unwrap_err(),
            RegistryError::unknown("chain", "Tron")
        );
    }

    #[test]
    fn lenient_conversions() {
        let reg = registry();
        assert_eq!(reg.to_label("Ethereum"), Ok(Chain::Ethereum));
        assert_eq!(reg.to_label(2u16), Ok(Chain::Ethereum));
        assert_eq!(reg.to_label(2i64), Ok(Chain::Ethereum));
        assert_eq!(reg.to_label(30u128), Ok(Chain::Base));
        assert_eq!(reg.to_id("Solana").map(Id::get), Ok(1));
        assert_eq!(reg.to_id(30u64).map(Id::get), Ok(30));
        assert_eq!(reg.to_id(reg.id(Chain::Base)).map(Id::get), Ok(30));
    }

    #[test]
    fn lenient_conversion_failures_keep_original_input() {
        let reg = registry();
        assert_eq!(
            reg.to_label(70_002u64),
            Err(RegistryError::conversion("chain", 70_002))
        );
        assert_eq!(
            reg.to_label(-1i32),
            Err(RegistryError::conversion("chain", -1))
        );
        assert_eq!(
            reg.to_id("1"),
            Err(RegistryError::conversion("chain id", "1"))
        );
        assert_eq!(
            reg.to_id(true),
            Err(RegistryError::conversion("chain id", true))
        );
    }

    #[test]
    fn shared_id_rejected() {
        const CLASH: &[(Chain, u16)] = &[(Chain::Solana, 1), (Chain::Ethereum, 1), (Chain::Base, 30)];
        assert!(matches!(
            IdMap::new("chain", "chain id", CLASH),
            Err(TableError::AmbiguousKey { view: "chain id", .. })
        ));
    }

    #[test]
    fn missing_label_rejected() {
        const PARTIAL: &[(Chain, u16)] = &[(Chain::Solana, 1), (Chain::Ethereum, 2)];
        assert!(matches!(
            IdMap::new("chain", "chain id", PARTIAL),
            Err(TableError::MissingKey { .. })
        ));
    }

    #[test]
    fn duplicate_label_rejected() {
        const TWICE: &[(Chain, u16)] = &[(Chain::Solana, 1), (Chain::Solana, 2), (Chain::Base, 30)];
        assert!(matches!(
            IdMap::new("chain", "chain id", TWICE),
            Err(TableError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn id_from_another_registry_is_unknown() {
        const OTHER: &[(Chain, u16)] = &[(Chain::Solana, 5), (Chain::Ethereum, 6), (Chain::Base, 7)];
        let reg = registry();
        let other = IdMap::new("chain", "chain id", OTHER).unwrap();
        let foreign = other.id(Chain::Solana);
        assert_eq!(reg.label(foreign), Err(RegistryError::unknown("chain id", 5)));
        assert_eq!(reg.to_label(foreign), Err(RegistryError::conversion("chain", 5)));
        // Ids shared by both registries resolve through each one's own rows.
        const OVERLAP: &[(Chain, u16)] = &[(Chain::Solana, 30), (Chain::Ethereum, 1), (Chain::Base, 2)];
        let overlap = IdMap::new("chain", "chain id", OVERLAP).unwrap();
        assert_eq!(reg.label(overlap.id(Chain::Solana)), Ok(Chain::Base));
    }

    #[test]
    fn two_row_registry() {
        crate::labels! {
            enum Pair: "chain" {
                Ethereum,
                Polygon,
            }
        }
        let reg = IdMap::new("chain", "chain id", &[(Pair::Ethereum, 0u32), (Pair::Polygon, 7)]).unwrap();
        assert_eq!(reg.to_id("Polygon").map(Id::get), Ok(7));
        assert_eq!(reg.to_label(7u32), Ok(Pair::Polygon));
        assert!(!reg.is_id(8));
        let err = reg.assert_id(8).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownKey { .. }));
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn ids_serialize_as_numbers() {
        let reg = registry();
        assert_eq!(serde_json::to_string(&reg.id(Chain::Base)).unwrap(), "30");
        assert_eq!(reg.id(Chain::Ethereum).to_string(), "2");
    }
}
