//! Buffer-based BCS writer.
//!
//! Every composite encoding is built from four shapes: fixed-width
//! little-endian integers, ULEB128 length prefixes, a 0/1 optional tag and a
//! ULEB128 variant index. The writer offers exactly those plus the container
//! depth guard used by recursive types.

use crate::{uleb128, BcsError, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH};

/// An append-only writer producing canonical BCS bytes.
#[derive(Debug, Default)]
pub struct BcsWriter {
    buf: Vec<u8>,
    depth: usize,
}

impl BcsWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new writer with a pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        BcsWriter {
            buf: Vec::with_capacity(capacity),
            depth: 0,
        }
    }

    // -----------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------

    /// Append a single byte.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a boolean as one byte, 0 or 1.
    pub fn write_bool(&mut self, val: bool) {
        self.buf.push(u8::from(val));
    }

    /// Append a little-endian u16 (2 bytes).
    pub fn write_u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u32 (4 bytes).
    pub fn write_u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes).
    pub fn write_u64(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u128 (16 bytes).
    pub fn write_u128(&mut self, val: u128) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a sequence length as minimal ULEB128.
    ///
    /// # Returns
    /// `EncodingRange` if `len` exceeds `MAX_SEQUENCE_LENGTH`.
    pub fn write_length(&mut self, len: usize) -> Result<(), BcsError> {
        if len > MAX_SEQUENCE_LENGTH {
            return Err(BcsError::EncodingRange(format!(
                "length {} exceeds maximum {}",
                len, MAX_SEQUENCE_LENGTH
            )));
        }
        uleb128::encode(len as u32, &mut self.buf);
        Ok(())
    }

    /// Append raw bytes with no length prefix.
    ///
    /// Only for fields whose width is fixed by the schema, such as addresses.
    pub fn write_fixed_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a length-prefixed byte buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BcsError> {
        self.write_length(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a string as length-prefixed UTF-8.
    pub fn write_str(&mut self, s: &str) -> Result<(), BcsError> {
        self.write_bytes(s.as_bytes())
    }

    // -----------------------------------------------------------------
    // Composites
    // -----------------------------------------------------------------

    /// Append an optional value: tag 0 when absent, tag 1 then the body
    /// when present.
    pub fn write_optional<T, F>(&mut self, value: Option<&T>, inner: F) -> Result<(), BcsError>
    where
        T: ?Sized,
        F: FnOnce(&mut Self, &T) -> Result<(), BcsError>,
    {
        match value {
            None => {
                self.write_u8(0);
                Ok(())
            }
            Some(v) => {
                self.write_u8(1);
                inner(self, v)
            }
        }
    }

    /// Append a length-prefixed sequence, items in the order given.
    pub fn write_sequence<T, F>(&mut self, items: &[T], mut inner: F) -> Result<(), BcsError>
    where
        F: FnMut(&mut Self, &T) -> Result<(), BcsError>,
    {
        self.write_length(items.len())?;
        for item in items {
            inner(self, item)?;
        }
        Ok(())
    }

    /// Append a variant index then the variant body.
    pub fn write_variant<F>(&mut self, index: u32, body: F) -> Result<(), BcsError>
    where
        F: FnOnce(&mut Self) -> Result<(), BcsError>,
    {
        uleb128::encode(index, &mut self.buf);
        body(self)
    }

    /// Run `f` one container level deeper.
    ///
    /// Recursive types wrap their body in this so that encoding an
    /// unreasonably deep value fails with `DepthLimitExceeded`.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, BcsError>
    where
        F: FnOnce(&mut Self) -> Result<T, BcsError>,
    {
        if self.depth >= MAX_CONTAINER_DEPTH {
            return Err(BcsError::DepthLimitExceeded(MAX_CONTAINER_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
