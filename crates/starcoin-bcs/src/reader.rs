//! Cursor-based BCS reader.
//!
//! Every read either consumes exactly the bytes of a well-formed value or
//! fails; nothing is defaulted or truncated.

use crate::{uleb128, BcsError, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH};

/// A cursor over BCS-encoded bytes.
#[derive(Debug)]
pub struct BcsReader<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> BcsReader<'a> {
    /// Create a new reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        BcsReader {
            data,
            pos: 0,
            depth: 0,
        }
    }

    // -----------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------

    /// Read exactly `n` bytes with no length prefix.
    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<&'a [u8], BcsError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(BcsError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a fixed-size array with no length prefix.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], BcsError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_fixed_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, BcsError> {
        Ok(self.read_fixed_bytes(1)?[0])
    }

    /// Read a boolean, rejecting any byte other than 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool, BcsError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(BcsError::InvalidBool(other)),
        }
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16, BcsError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, BcsError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, BcsError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u128.
    pub fn read_u128(&mut self) -> Result<u128, BcsError> {
        Ok(u128::from_le_bytes(self.read_array()?))
    }

    /// Read a ULEB128 value, enforcing the minimal encoding.
    fn read_uleb128(&mut self) -> Result<u32, BcsError> {
        let (value, consumed) = match uleb128::decode(&self.data[self.pos..]) {
            Ok(decoded) => decoded,
            Err(BcsError::UnexpectedEof { .. }) => {
                return Err(BcsError::UnexpectedEof {
                    needed: self.remaining() + 1,
                    remaining: self.remaining(),
                })
            }
            Err(e) => return Err(e),
        };
        self.pos += consumed;
        Ok(value)
    }

    /// Read a sequence length.
    ///
    /// # Returns
    /// `MalformedLength` for non-minimal encodings or values above
    /// `MAX_SEQUENCE_LENGTH`.
    pub fn read_length(&mut self) -> Result<usize, BcsError> {
        let len = self.read_uleb128()? as usize;
        if len > MAX_SEQUENCE_LENGTH {
            return Err(BcsError::MalformedLength(format!(
                "length {} exceeds maximum {}",
                len, MAX_SEQUENCE_LENGTH
            )));
        }
        Ok(len)
    }

    /// Read a length-prefixed byte buffer.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, BcsError> {
        let len = self.read_length()?;
        Ok(self.read_fixed_bytes(len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, BcsError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|e| BcsError::InvalidUtf8(e.to_string()))
    }

    // -----------------------------------------------------------------
    // Composites
    // -----------------------------------------------------------------

    /// Read an optional value: tag 0 is `None`, tag 1 is followed by the body.
    pub fn read_optional<T, F>(&mut self, inner: F) -> Result<Option<T>, BcsError>
    where
        F: FnOnce(&mut Self) -> Result<T, BcsError>,
    {
        match self.read_u8()? {
            0 => Ok(None),
            1 => inner(self).map(Some),
            tag => Err(BcsError::InvalidOptionalTag(tag)),
        }
    }

    /// Read a length-prefixed sequence, preserving encoded order.
    pub fn read_sequence<T, F>(&mut self, mut inner: F) -> Result<Vec<T>, BcsError>
    where
        F: FnMut(&mut Self) -> Result<T, BcsError>,
    {
        let len = self.read_length()?;
        // Every element occupies at least one byte.
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(inner(self)?);
        }
        Ok(items)
    }

    /// Read a variant index and check it against the union's variant count.
    pub fn read_variant_index(
        &mut self,
        type_name: &'static str,
        variant_count: u32,
    ) -> Result<u32, BcsError> {
        let index = self.read_uleb128()?;
        if index >= variant_count {
            return Err(BcsError::UnknownVariant { type_name, index });
        }
        Ok(index)
    }

    /// Run `f` one container level deeper; see [`BcsWriter::nested`](crate::BcsWriter::nested).
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
    // Position
    // -----------------------------------------------------------------

    /// Return the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check that the whole input was consumed.
    pub fn finish(&self) -> Result<(), BcsError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(BcsError::TrailingBytes(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01, 0x2a, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0x03, b'a', b'b', b'c',
        ];
        let mut r = BcsReader::new(&data);
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_u8().unwrap(), 0x2a);
        assert_eq!(r.read_u64().unwrap(), 0x0102030405060708);
        assert_eq!(r.read_string().unwrap(), "abc");
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_read_eof() {
        let mut r = BcsReader::new(&[0x01, 0x02]);
        assert_eq!(
            r.read_u64(),
            Err(BcsError::UnexpectedEof {
                needed: 8,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_read_bytes_truncated_payload() {
        // Declares five bytes, provides two.
        let mut r = BcsReader::new(&[0x05, 0xaa, 0xbb]);
        assert!(matches!(r.read_bytes(), Err(BcsError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_read_length_non_minimal() {
        let mut r = BcsReader::new(&[0x80, 0x00]);
        assert!(matches!(r.read_length(), Err(BcsError::MalformedLength(_))));
    }

    #[test]
    fn test_read_length_above_max() {
        // 2^31 encoded minimally.
        let mut r = BcsReader::new(&[0x80, 0x80, 0x80, 0x80, 0x08]);
        assert!(matches!(r.read_length(), Err(BcsError::MalformedLength(_))));
    }

    #[test]
    fn test_read_bool_rejects_other_bytes() {
        let mut r = BcsReader::new(&[0x02]);
        assert_eq!(r.read_bool(), Err(BcsError::InvalidBool(2)));
    }

    #[test]
    fn test_read_optional_invalid_tag() {
        let mut r = BcsReader::new(&[0x02, 0x00]);
        assert_eq!(
            r.read_optional(|r| r.read_u8()),
            Err(BcsError::InvalidOptionalTag(2))
        );
    }

    #[test]
    fn test_read_variant_index_unknown() {
        let mut r = BcsReader::new(&[0x03]);
        assert_eq!(
            r.read_variant_index("Payload", 3),
            Err(BcsError::UnknownVariant {
                type_name: "Payload",
                index: 3
            })
        );
    }

    #[test]
    fn test_read_variant_index_non_minimal() {
        let mut r = BcsReader::new(&[0x81, 0x00]);
        assert!(matches!(
            r.read_variant_index("Payload", 3),
            Err(BcsError::MalformedLength(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut r = BcsReader::new(&[0x02, 0xff, 0xfe]);
        assert!(matches!(r.read_string(), Err(BcsError::InvalidUtf8(_))));
    }

    #[test]
    fn test_finish_reports_trailing() {
        let mut r = BcsReader::new(&[0x00, 0x00, 0x00]);
        r.read_u8().unwrap();
        assert_eq!(r.finish(), Err(BcsError::TrailingBytes(2)));
    }

    #[test]
    fn test_huge_declared_sequence_does_not_preallocate() {
        // Declares 2^31 - 1 elements with nothing behind it.
        let mut r = BcsReader::new(&[0xff, 0xff, 0xff, 0xff, 0x07]);
        assert!(matches!(
            r.read_sequence(|r| r.read_u8()),
            Err(BcsError::UnexpectedEof { .. })
        ));
    }
}
