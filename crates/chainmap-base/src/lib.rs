//! # chainmap-base — Network, Chain and Circle Registries
//!
//! Concrete registries built on `chainmap-core`:
//!
//! - [`network`]: the [`Network`] catalog.
//! - [`chain`]: the [`Chain`] catalog and Wormhole chain ids.
//! - [`circle`]: Circle CCTP domains, attestation APIs and USDC contracts.
//! - [`config`]: YAML selection of a Circle network and chains.
//!
//! Every registry is declared as `const` tables and built on first access
//! into a `LazyLock` static. Queries are lock-free reads afterwards.
//!
//! ## Security Invariant
//!
//! Validated values cannot be forged. A [`ChainId`] or [`CircleChainId`] is
//! only minted by its registry, and untrusted strings or integers pass
//! through an `is_*` guard, an `assert_*`/`as_*` check or a `to_*`
//! converter before they become typed.

pub mod chain;
pub mod circle;
pub mod config;
pub mod error;
pub mod network;

pub use chain::{Chain, ChainId};
pub use circle::{CircleChain, CircleChainId, CircleNetwork, CircleRegistry};
pub use config::{CircleConfig, CircleEndpoint, ResolvedCircle};
pub use error::ConfigError;
pub use network::Network;

use chainmap_core::TableError;

/// Unwrap a registry built from `const` tables.
///
/// The tables are fixed at compile time and each registry's `build`
/// function is exercised by its tests, so an error here is a defect in
/// this crate's source.
fn baked<T>(registry: &'static str, built: Result<T, TableError>) -> T {
    match built {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(registry, error = %err, "malformed registry table");
            panic!("{registry} registry table is malformed: {err}")
        }
    }
}
