//! Hypergraph model of interference in wireless networks.
//!
//! A wireless network `<S, α, β>` places stations `S` in the plane, attenuates
//! energy with distance as `d^(-α)` and lets a receiver decode only while the
//! energy it collects from other active stations stays below β. The network
//! generates a hypergraph whose edges are the minimal sets of stations that
//! cannot be active together.
//!
//! ## Module Organization
//!
//! - `network`: stations, reception model, energy calculations, layouts
//! - `hypergraph`: minimal forbidden sets and structural analysis
//! - `search`: bisection over the threshold or the path loss exponent
//! - `config`: TOML configuration for study runs
//! - `study`: reproduction of the `U_k` transition values
//! - `error`: error type shared by the library

pub mod config;
pub mod error;
pub mod hypergraph;
pub mod network;
pub mod search;
pub mod study;

pub use error::HypergraphError;
pub use hypergraph::{Hyperedge, Hypergraph, build_hypergraph, build_hypergraph_with};
pub use network::{ReceptionModel, Station, WirelessNetwork};
pub use search::{BisectionOptions, BisectionOutcome, bisect, bisect_path_loss_exponent, bisect_threshold};
