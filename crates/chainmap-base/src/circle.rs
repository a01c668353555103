//! # Circle CCTP Registry
//!
//! Circle's Cross-Chain Transfer Protocol identifies chains by *domain*
//! (a `u32` unrelated to Wormhole chain ids), serves attestations from one
//! API per network, and has a USDC contract per (network, chain) pair.
//!
//! Three tables are declared here and every accessor is derived from them:
//!
//! | table            | shape                       | views                                  |
//! |------------------|-----------------------------|----------------------------------------|
//! | `CIRCLE_DOMAINS` | chain → domain              | chain ↔ domain                         |
//! | `CIRCLE_APIS`    | network → URL               | network → URL                          |
//! | `USDC_CONTRACTS` | network → chain → address   | (network, chain) → address, reverse by address, chain → networks |
//!
//! Not every chain has USDC on every network: Polygon is mainnet-only.
//! [`is_circle_supported`] answers that from the contract table.

use std::sync::LazyLock;

use chainmap_core::{
    zip, Column, ConstMap, GroupedMap, Id, IdMap, Input, Key, Label, Literal, RegistryError, Table,
    TableError, TotalMap,
};

use crate::chain::Chain;
use crate::network::Network;

chainmap_core::labels! {
    /// A chain with a Circle CCTP domain.
    pub enum CircleChain: "Circle chain" in Chain {
        Ethereum,
        Avalanche,
        Optimism,
        Arbitrum,
        Solana,
        Base,
        Polygon,
    }
}

chainmap_core::labels! {
    /// A network Circle serves attestations for.
    pub enum CircleNetwork: "Circle network" in Network {
        Mainnet,
        Testnet,
    }
}

/// A declared Circle domain.
pub type CircleChainId = Id<CircleChain, u32>;

const CIRCLE_DOMAINS: &[(CircleChain, u32)] = &[
    (CircleChain::Ethereum, 0),
    (CircleChain::Avalanche, 1),
    (CircleChain::Optimism, 2),
    (CircleChain::Arbitrum, 3),
    (CircleChain::Solana, 5),
    (CircleChain::Base, 6),
    (CircleChain::Polygon, 7),
];

const CIRCLE_APIS: &[(CircleNetwork, &str)] = &[
    (CircleNetwork::Mainnet, "https://iris-api.circle.com/v1/attestations"),
    (CircleNetwork::Testnet, "https://iris-api-sandbox.circle.com/v1/attestations"),
];

const USDC_CONTRACTS: &[(CircleNetwork, &[(CircleChain, &str)])] = &[
    (
        CircleNetwork::Mainnet,
        &[
            (CircleChain::Ethereum, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            (CircleChain::Avalanche, "0xb97ef9ef8734c71904d8002f8b6bc66dd9c48a6e"),
            (CircleChain::Arbitrum, "0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
            (CircleChain::Optimism, "0x179522635726710dd7d2035a81d856de4aa7836c"),
            (CircleChain::Solana, "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            (CircleChain::Base, "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"),
            (CircleChain::Polygon, "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
        ],
    ),
    (
        CircleNetwork::Testnet,
        &[
            (CircleChain::Avalanche, "0x5425890298aed601595a70AB815c96711a31Bc65"),
            (CircleChain::Arbitrum, "0xfd064A18f3BF249cf1f87FC203E90D8f650f2d63"),
            (CircleChain::Ethereum, "0x07865c6e87b9f70255377e024ace6630c1eaa37f"),
            (CircleChain::Optimism, "0xe05606174bac4A6364B31bd0eCA4bf4dD368f8C6"),
            (CircleChain::Solana, "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU"),
            (CircleChain::Base, "0xf175520c52418dfe19c8098071a252da48cd1c19"),
        ],
    ),
];

/// All views over the Circle tables.
#[derive(Debug, Clone)]
pub struct CircleRegistry {
    chains: IdMap<CircleChain, u32>,
    apis: TotalMap<CircleNetwork, &'static str>,
    networks: Vec<CircleNetwork>,
    usdc: ConstMap,
    usdc_by_address: ConstMap,
    usdc_networks: GroupedMap,
}

impl CircleRegistry {
    /// Build every view from the declared tables.
    pub fn try_build() -> Result<Self, TableError> {
        let chains = IdMap::new("Circle chain", "Circle chain id", CIRCLE_DOMAINS)?;

        let api_table = Table::from_rows(CIRCLE_APIS)?;
        let apis = TotalMap::new(&ConstMap::forward("Circle API", &api_table)?)?;

        let usdc_table = Table::from_rows(USDC_CONTRACTS)?;
        let (declared, _) = zip(&usdc_table);
        let networks = typed(&declared, "USDC contract")?;
        let usdc = ConstMap::forward("USDC contract", &usdc_table)?;
        let usdc_by_address = ConstMap::new("USDC contract address", &usdc_table, &[0, 2, 1])?;
        let usdc_networks = GroupedMap::new("USDC chain", &usdc_table, &[1, 0])?;

        Ok(Self {
            chains,
            apis,
            networks,
            usdc,
            usdc_by_address,
            usdc_networks,
        })
    }

    /// The domain registry.
    pub fn chains(&self) -> &IdMap<CircleChain, u32> {
        &self.chains
    }
}

/// Read zipped labels back as a closed enum; a stray label is a table defect.
fn typed<L: Label>(declared: &[Literal], view: &'static str) -> Result<Vec<L>, TableError> {
    declared
        .iter()
        .map(|literal| {
            L::from_literal(literal).ok_or(TableError::UndeclaredLabel {
                view,
                kind: L::KIND,
                label: *literal,
            })
        })
        .collect()
}

static CIRCLE: LazyLock<CircleRegistry> =
    LazyLock::new(|| crate::baked("Circle", CircleRegistry::try_build()));

/// The Circle registry.
pub fn circle_registry() -> &'static CircleRegistry {
    &CIRCLE
}

/// Chains with a Circle domain, in declaration order.
pub fn circle_chains() -> &'static [CircleChain] {
    CIRCLE.chains.labels()
}

/// Circle domains, in declaration order.
pub fn circle_chain_ids() -> &'static [CircleChainId] {
    CIRCLE.chains.ids()
}

/// Networks with USDC contracts, in declaration order.
pub fn circle_networks() -> &'static [CircleNetwork] {
    &CIRCLE.networks
}

/// The Circle domain of a chain.
pub fn circle_chain_id(chain: CircleChain) -> CircleChainId {
    CIRCLE.chains.id(chain)
}

/// The chain of a Circle domain.
pub fn circle_chain_id_to_chain(id: CircleChainId) -> Result<CircleChain, RegistryError> {
    CIRCLE.chains.label(id)
}

/// The attestation API for a network.
pub fn circle_api(network: CircleNetwork) -> &'static str {
    CIRCLE.apis.get(network)
}

/// The USDC contract of `chain` on `network`.
///
/// # Errors
///
/// [`RegistryError::UnknownKey`] when USDC is not deployed on that pair,
/// e.g. Polygon on Testnet.
pub fn usdc_contract(network: CircleNetwork, chain: CircleChain) -> Result<&'static str, RegistryError> {
    CIRCLE.usdc.get_as(&[Key::from(network), Key::from(chain)])
}

/// The chain whose USDC contract on `network` is `address`. Addresses
/// match exactly, including case.
pub fn usdc_contract_chain(network: CircleNetwork, address: &str) -> Result<CircleChain, RegistryError> {
    CIRCLE
        .usdc_by_address
        .get_as(&[Key::from(network), Key::Str(address)])
}

/// Networks on which `chain` has a USDC contract, in declaration order.
pub fn usdc_networks(chain: CircleChain) -> Vec<CircleNetwork> {
    CIRCLE
        .usdc_networks
        .get(&[Key::from(chain)])
        .map(|values| values.iter().filter_map(CircleNetwork::from_literal).collect())
        .unwrap_or_default()
}

/// Whether `chain` names a chain with a Circle domain. Never fails.
pub fn is_circle_chain(chain: &str) -> bool {
    CIRCLE.chains.is_label(chain)
}

/// Whether `id` is a declared Circle domain. Never fails.
pub fn is_circle_chain_id(id: u32) -> bool {
    CIRCLE.chains.is_id(id)
}

/// Whether USDC is deployed on `chain` in `network`. Never fails, for any
/// network and any string.
pub fn is_circle_supported(network: Network, chain: &str) -> bool {
    CIRCLE.usdc.has(&[Key::from(network), Key::Str(chain)])
}

/// Fail with `UnknownKey` unless `chain` names a Circle chain.
pub fn assert_circle_chain(chain: &str) -> Result<(), RegistryError> {
    CIRCLE.chains.assert_label(chain)
}

/// Fail with `UnknownKey` unless `id` is a declared Circle domain.
pub fn assert_circle_chain_id(id: u32) -> Result<(), RegistryError> {
    CIRCLE.chains.assert_id(id)
}

/// Narrow a chain name to a [`CircleChain`].
pub fn as_circle_chain(chain: &str) -> Result<CircleChain, RegistryError> {
    CIRCLE.chains.as_label(chain)
}

/// Narrow a raw integer to a [`CircleChainId`].
pub fn as_circle_chain_id(id: u32) -> Result<CircleChainId, RegistryError> {
    CIRCLE.chains.as_id(id)
}

/// Accepts a chain name or a Circle domain in any integer representation.
pub fn to_circle_chain<'a>(chain: impl Into<Input<'a>>) -> Result<CircleChain, RegistryError> {
    CIRCLE.chains.to_label(chain)
}

/// Accepts a chain name or a Circle domain in any integer representation.
pub fn to_circle_chain_id<'a>(chain: impl Into<Input<'a>>) -> Result<CircleChainId, RegistryError> {
    CIRCLE.chains.to_id(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds() {
        let registry = CircleRegistry::try_build().unwrap();
        assert_eq!(registry.chains().labels(), CircleChain::ALL);
        assert_eq!(registry.networks, CircleNetwork::ALL);
    }

    #[test]
    fn domains() {
        let domains: Vec<u32> = circle_chain_ids().iter().map(|id| id.get()).collect();
        assert_eq!(domains, [0, 1, 2, 3, 5, 6, 7]);
        assert_eq!(circle_chain_id(CircleChain::Solana).get(), 5);
        let base = as_circle_chain_id(6).unwrap();
        assert_eq!(circle_chain_id_to_chain(base), Ok(CircleChain::Base));
        assert!(!is_circle_chain_id(4));
    }

    #[test]
    fn apis() {
        assert_eq!(
            circle_api(CircleNetwork::Testnet),
            "https://iris-api-sandbox.circle.com/v1/attestations"
        );
    }

    #[test]
    fn contracts_per_network() {
        assert_eq!(
            usdc_contract(CircleNetwork::Mainnet, CircleChain::Polygon),
            Ok("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359")
        );
        assert_eq!(
            usdc_contract(CircleNetwork::Testnet, CircleChain::Polygon)
                .unwrap_err()
                .to_string(),
            "unknown USDC contract: Testnet, Polygon"
        );
    }

    #[test]
    fn contract_reverse_lookup() {
        assert_eq!(
            usdc_contract_chain(
                CircleNetwork::Testnet,
                "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU"
            ),
            Ok(CircleChain::Solana)
        );
        // A mainnet address is not a testnet contract.
        assert!(usdc_contract_chain(
            CircleNetwork::Testnet,
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        )
        .is_err());
    }

    #[test]
    fn networks_per_chain() {
        assert_eq!(
            usdc_networks(CircleChain::Ethereum),
            [CircleNetwork::Mainnet, CircleNetwork::Testnet]
        );
        assert_eq!(usdc_networks(CircleChain::Polygon), [CircleNetwork::Mainnet]);
    }

    #[test]
    fn support_matrix() {
        assert!(is_circle_supported(Network::Mainnet, "Polygon"));
        assert!(!is_circle_supported(Network::Testnet, "Polygon"));
        assert!(!is_circle_supported(Network::Devnet, "Ethereum"));
        assert!(!is_circle_supported(Network::Mainnet, "Sui"));
    }

    #[test]
    fn subset_of_chain_catalog() {
        for chain in CircleChain::ALL {
            let wide = Chain::from(*chain);
            assert_eq!(wide.as_str(), chain.as_str());
            assert_eq!(CircleChain::try_from(wide), Ok(*chain));
        }
        assert!(CircleChain::try_from(Chain::Sui).is_err());
        assert_eq!(CircleNetwork::try_from(Network::Testnet), Ok(CircleNetwork::Testnet));
        assert!(CircleNetwork::try_from(Network::Devnet).is_err());
    }

    #[test]
    fn stray_network_label_rejected() {
        let declared = [Literal::Str("Mainnet"), Literal::Str("Devnet")];
        assert_eq!(
            typed::<CircleNetwork>(&declared, "USDC contract"),
            Err(TableError::UndeclaredLabel {
                view: "USDC contract",
                kind: "Circle network",
                label: Literal::Str("Devnet"),
            })
        );
        assert_eq!(CircleNetwork::Mainnet.literal(), declared[0]);
    }

    #[test]
    fn conversions() {
        assert_eq!(to_circle_chain(7u32), Ok(CircleChain::Polygon));
        assert_eq!(to_circle_chain(7i128), Ok(CircleChain::Polygon));
        assert_eq!(to_circle_chain("Arbitrum"), Ok(CircleChain::Arbitrum));
        assert_eq!(to_circle_chain_id("Base").map(CircleChainId::get), Ok(6));
        assert_eq!(
            to_circle_chain(4u32),
            Err(RegistryError::conversion("Circle chain", 4))
        );
        assert_eq!(
            to_circle_chain_id(true),
            Err(RegistryError::conversion("Circle chain id", true))
        );
    }

    #[test]
    fn assertions() {
        assert!(assert_circle_chain("Base").is_ok());
        assert!(assert_circle_chain("Sui").is_err());
        assert!(assert_circle_chain_id(0).is_ok());
        assert_eq!(
            assert_circle_chain_id(8).unwrap_err().to_string(),
            "unknown Circle chain id: 8"
        );
        assert_eq!(as_circle_chain("Optimism"), Ok(CircleChain::Optimism));
    }
}
