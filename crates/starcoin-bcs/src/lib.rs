//! Starcoin SDK - Binary Canonical Serialization (BCS).
//!
//! BCS is the deterministic encoding every signed Starcoin transaction is
//! built from. A value has exactly one valid encoding, so two semantically
//! equal values always produce byte-identical output.
//!
//! This crate provides:
//! - `BcsWriter` / `BcsReader` for the primitive and composite encodings
//! - ULEB128 length and variant-index encoding with canonicity checks
//! - `BcsSerialize` / `BcsDeserialize` traits for walking typed values

pub mod codec;
pub mod reader;
pub mod uleb128;
pub mod writer;

mod error;
pub use codec::{from_bytes, to_bytes, BcsDeserialize, BcsSerialize};
pub use error::BcsError;
pub use reader::BcsReader;
pub use writer::BcsWriter;

/// Largest length a sequence, string or byte buffer may declare.
pub const MAX_SEQUENCE_LENGTH: usize = (1 << 31) - 1;

/// Largest nesting of containers (type tags inside struct tags inside
/// type tags) accepted by the writer and the reader.
pub const MAX_CONTAINER_DEPTH: usize = 500;
