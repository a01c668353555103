//! # Chains
//!
//! The catalog of chains known to the registries, and the Wormhole chain-id
//! registry over it. Every other chain-keyed registry declares a subset of
//! [`Chain`] (see [`CircleChain`](crate::circle::CircleChain)).
//!
//! ## Chain Ids
//!
//! Ids are `u16`. [`ChainId`] values are minted by an `IdMap<Chain, u16>`,
//! normally [`chain_registry`]. Raw integers go through [`as_chain_id`] or
//! [`to_chain_id`]. [`chain_id_to_chain`] is fallible because a registry
//! built separately through [`build_chain_registry`] mints the same type.

use std::sync::LazyLock;

use chainmap_core::{Id, IdMap, Input, RegistryError, TableError};

chainmap_core::labels! {
    /// A chain known to the registries.
    pub enum Chain: "chain" {
        Solana,
        Ethereum,
        Terra,
        Bsc,
        Polygon,
        Avalanche,
        Oasis,
        Algorand,
        Aurora,
        Fantom,
        Karura,
        Acala,
        Klaytn,
        Celo,
        Near,
        Moonbeam,
        Neon,
        Terra2,
        Injective,
        Osmosis,
        Sui,
        Aptos,
        Arbitrum,
        Optimism,
        Gnosis,
        Pythnet,
        Xpla,
        Btc,
        Base,
        Sei,
        Rootstock,
        Wormchain,
        Cosmoshub,
        Evmos,
        Kujira,
        Sepolia,
    }
}

/// A declared Wormhole chain id.
pub type ChainId = Id<Chain, u16>;

const CHAIN_IDS: &[(Chain, u16)] = &[
    (Chain::Solana, 1),
    (Chain::Ethereum, 2),
    (Chain::Terra, 3),
    (Chain::Bsc, 4),
    (Chain::Polygon, 5),
    (Chain::Avalanche, 6),
    (Chain::Oasis, 7),
    (Chain::Algorand, 8),
    (Chain::Aurora, 9),
    (Chain::Fantom, 10),
    (Chain::Karura, 11),
    (Chain::Acala, 12),
    (Chain::Klaytn, 13),
    (Chain::Celo, 14),
    (Chain::Near, 15),
    (Chain::Moonbeam, 16),
    (Chain::Neon, 17),
    (Chain::Terra2, 18),
    (Chain::Injective, 19),
    (Chain::Osmosis, 20),
    (Chain::Sui, 21),
    (Chain::Aptos, 22),
    (Chain::Arbitrum, 23),
    (Chain::Optimism, 24),
    (Chain::Gnosis, 25),
    (Chain::Pythnet, 26),
    (Chain::Xpla, 28),
    (Chain::Btc, 29),
    (Chain::Base, 30),
    (Chain::Sei, 32),
    (Chain::Rootstock, 33),
    (Chain::Wormchain, 3104),
    (Chain::Cosmoshub, 4000),
    (Chain::Evmos, 4001),
    (Chain::Kujira, 4002),
    (Chain::Sepolia, 10002),
];

static CHAIN_REGISTRY: LazyLock<IdMap<Chain, u16>> =
    LazyLock::new(|| crate::baked("chain id", build_chain_registry()));

/// Build the chain-id registry from its declaration.
pub fn build_chain_registry() -> Result<IdMap<Chain, u16>, TableError> {
    IdMap::new("chain", "chain id", CHAIN_IDS)
}

/// The chain-id registry.
pub fn chain_registry() -> &'static IdMap<Chain, u16> {
    &CHAIN_REGISTRY
}

/// Chains with a Wormhole id, in declaration order.
pub fn chains() -> &'static [Chain] {
    CHAIN_REGISTRY.labels()
}

/// Wormhole chain ids, in declaration order.
pub fn chain_ids() -> &'static [ChainId] {
    CHAIN_REGISTRY.ids()
}

/// The Wormhole chain id of a chain.
pub fn chain_to_chain_id(chain: Chain) -> ChainId {
    CHAIN_REGISTRY.id(chain)
}

/// The chain of a Wormhole chain id.
pub fn chain_id_to_chain(id: ChainId) -> Result<Chain, RegistryError> {
    CHAIN_REGISTRY.label(id)
}

/// Whether `chain` names a chain with a Wormhole id. Never fails.
pub fn is_chain(chain: &str) -> bool {
    CHAIN_REGISTRY.is_label(chain)
}

/// Whether `id` is a declared Wormhole chain id. Never fails.
pub fn is_chain_id(id: u16) -> bool {
    CHAIN_REGISTRY.is_id(id)
}

/// Fail with `UnknownKey` unless `chain` names a chain.
pub fn assert_chain(chain: &str) -> Result<(), RegistryError> {
    CHAIN_REGISTRY.assert_label(chain)
}

/// Fail with `UnknownKey` unless `id` is a declared chain id.
pub fn assert_chain_id(id: u16) -> Result<(), RegistryError> {
    CHAIN_REGISTRY.assert_id(id)
}

/// Narrow a chain name to a [`Chain`].
pub fn as_chain(chain: &str) -> Result<Chain, RegistryError> {
    CHAIN_REGISTRY.as_label(chain)
}

/// Narrow a raw integer to a [`ChainId`].
pub fn as_chain_id(id: u16) -> Result<ChainId, RegistryError> {
    CHAIN_REGISTRY.as_id(id)
}

/// Accepts a chain name or a chain id in any integer representation.
pub fn to_chain<'a>(chain: impl Into<Input<'a>>) -> Result<Chain, RegistryError> {
    CHAIN_REGISTRY.to_label(chain)
}

/// Accepts a chain name or a chain id in any integer representation.
pub fn to_chain_id<'a>(chain: impl Into<Input<'a>>) -> Result<ChainId, RegistryError> {
    CHAIN_REGISTRY.to_id(chain)
}
