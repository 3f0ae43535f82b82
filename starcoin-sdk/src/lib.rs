#![deny(missing_docs)]

//! Starcoin SDK - Complete SDK.
//!
//! Re-exports all Starcoin SDK components for convenient single-crate usage.

pub use starcoin_bcs as bcs;
pub use starcoin_client as client;
pub use starcoin_crypto as crypto;
pub use starcoin_types as types;
