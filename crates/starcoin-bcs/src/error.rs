/// Errors produced while encoding or decoding BCS data.
///
/// Decode-side variants signal corrupted or adversarial input and are never
/// recovered from: the value being decoded is discarded as a whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BcsError {
    /// A value falls outside the domain the format can represent.
    #[error("value out of encodable range: {0}")]
    EncodingRange(String),

    /// A length or variant index is not minimally encoded, overflows, or
    /// exceeds the maximum sequence length.
    #[error("malformed length: {0}")]
    MalformedLength(String),

    /// An optional value's tag byte was neither 0 nor 1.
    #[error("invalid optional tag: {0:#04x}")]
    InvalidOptionalTag(u8),

    /// A variant index outside the union's known variants.
    #[error("unknown variant index {index} for {type_name}")]
    UnknownVariant {
        /// Name of the union being decoded.
        type_name: &'static str,
        /// The offending index.
        index: u32,
    },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid bool byte: {0:#04x}")]
    InvalidBool(u8),

    /// A string payload was not valid UTF-8.
    #[error("invalid utf-8 string: {0}")]
    InvalidUtf8(String),

    /// The input ended before the value was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the current read required.
        needed: usize,
        /// Bytes that were left.
        remaining: usize,
    },

    /// A complete value was decoded but input remained.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Nested containers exceeded `MAX_CONTAINER_DEPTH`.
    #[error("container depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    /// The bytes decoded but describe a value the domain type rejects.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
