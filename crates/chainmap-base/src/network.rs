//! # Networks
//!
//! The deployment environments a chain can run in. Registries keyed by
//! network declare a subset of these (see
//! [`CircleNetwork`](crate::circle::CircleNetwork)).

chainmap_core::labels! {
    /// A deployment environment.
    pub enum Network: "network" {
        /// Production.
        Mainnet,
        /// Public test networks.
        Testnet,
        /// Local development networks.
        Devnet,
    }
}
