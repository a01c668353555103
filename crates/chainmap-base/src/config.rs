//! # Circle Configuration
//!
//! A service that relays CCTP transfers picks one Circle network and the
//! chains it serves, usually from a YAML file:
//!
//! ```yaml
//! network: Testnet
//! chains: [Ethereum, Base]
//! ```
//!
//! Network and chain names are validated while deserializing. Omitting
//! `chains` (or leaving it empty) selects every chain with a USDC contract
//! on the network.

use serde::{Deserialize, Serialize};

use crate::circle::{
    circle_api, circle_chain_id, circle_chains, is_circle_supported, usdc_contract, CircleChain,
    CircleChainId, CircleNetwork,
};
use crate::error::ConfigError;

/// The Circle network and chains a deployment serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CircleConfig {
    /// Network to attest on.
    pub network: CircleNetwork,
    /// Chains to serve; empty means every supported chain.
    #[serde(default)]
    pub chains: Vec<CircleChain>,
}

/// A [`CircleConfig`] with every registry value filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCircle {
    /// The configured network.
    pub network: CircleNetwork,
    /// Attestation API URL.
    pub api: &'static str,
    /// One entry per served chain, in selection order.
    pub endpoints: Vec<CircleEndpoint>,
}

/// One served chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircleEndpoint {
    /// The served chain.
    pub chain: CircleChain,
    /// CCTP domain.
    pub domain: CircleChainId,
    /// USDC contract on the configured network.
    pub usdc: &'static str,
}

impl CircleConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Look up the API, domains and contracts of the selection.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Registry`] if a selected chain has no USDC contract on
    /// the network.
    pub fn resolve(&self) -> Result<ResolvedCircle, ConfigError> {
        let chains: Vec<CircleChain> = if self.chains.is_empty() {
            circle_chains()
                .iter()
                .copied()
                .filter(|chain| is_circle_supported(self.network.into(), chain.as_str()))
                .collect()
        } else {
            self.chains.clone()
        };

        let endpoints = chains
            .into_iter()
            .map(|chain| -> Result<CircleEndpoint, ConfigError> {
                Ok(CircleEndpoint {
                    chain,
                    domain: circle_chain_id(chain),
                    usdc: usdc_contract(self.network, chain)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            network = %self.network,
            endpoints = endpoints.len(),
            "resolved Circle config"
        );
        Ok(ResolvedCircle {
            network: self.network,
            api: circle_api(self.network),
            endpoints,
        })
    }
}
