//! Traits for walking typed values through the writer and the reader.

use crate::{BcsError, BcsReader, BcsWriter};

/// A type with a canonical BCS encoding.
pub trait BcsSerialize {
    /// Append the encoding of `self` to `writer`.
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError>;

    /// Encode `self` into a fresh buffer.
    fn to_bcs_bytes(&self) -> Result<Vec<u8>, BcsError> {
        let mut writer = BcsWriter::new();
        self.bcs_serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }
}

/// A type that can be decoded from its canonical BCS encoding.
pub trait BcsDeserialize: Sized {
    /// Decode one value from the front of `reader`.
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError>;

    /// Decode a value that must occupy all of `bytes`.
    fn from_bcs_bytes(bytes: &[u8]) -> Result<Self, BcsError> {
        let mut reader = BcsReader::new(bytes);
        let value = Self::bcs_deserialize(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

/// Encode `value` to canonical BCS bytes.
pub fn to_bytes<T: BcsSerialize + ?Sized>(value: &T) -> Result<Vec<u8>, BcsError> {
    value.to_bcs_bytes()
}

/// Decode a `T` from `bytes`, rejecting trailing data.
pub fn from_bytes<T: BcsDeserialize>(bytes: &[u8]) -> Result<T, BcsError> {
    T::from_bcs_bytes(bytes)
}

macro_rules! impl_fixed_width {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl BcsSerialize for $ty {
                fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
                    writer.$write(*self);
                    Ok(())
                }
            }

            impl BcsDeserialize for $ty {
                fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_fixed_width! {
    bool => write_bool, read_bool;
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    u128 => write_u128, read_u128;
}

impl BcsSerialize for str {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_str(self)
    }
}

impl BcsSerialize for String {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_str(self)
    }
}

impl BcsDeserialize for String {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_string()
    }
}

impl<T: BcsSerialize> BcsSerialize for [T] {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_sequence(self, |w, item| item.bcs_serialize(w))
    }
}

impl<T: BcsSerialize> BcsSerialize for Vec<T> {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        self.as_slice().bcs_serialize(writer)
    }
}

impl<T: BcsDeserialize> BcsDeserialize for Vec<T> {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_sequence(T::bcs_deserialize)
    }
}

impl<T: BcsSerialize> BcsSerialize for Option<T> {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_optional(self.as_ref(), |w, v| v.bcs_serialize(w))
    }
}

impl<T: BcsDeserialize> BcsDeserialize for Option<T> {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_optional(T::bcs_deserialize)
    }
}

impl<T: BcsSerialize + ?Sized> BcsSerialize for Box<T> {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        (**self).bcs_serialize(writer)
    }
}

impl<T: BcsDeserialize> BcsDeserialize for Box<T> {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        T::bcs_deserialize(reader).map(Box::new)
    }
}

impl<T: BcsSerialize + ?Sized> BcsSerialize for &T {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        (**self).bcs_serialize(writer)
    }
}

/// Fixed-size byte arrays carry no length prefix.
impl<const N: usize> BcsSerialize for [u8; N] {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_fixed_bytes(self);
        Ok(())
    }
}

impl<const N: usize> BcsDeserialize for [u8; N] {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_array()
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: BcsSerialize),+> BcsSerialize for ($($name,)+) {
            #[allow(non_snake_case)]
            fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
                let ($($name,)+) = self;
                $($name.bcs_serialize(writer)?;)+
                Ok(())
            }
        }

        impl<$($name: BcsDeserialize),+> BcsDeserialize for ($($name,)+) {
            fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
                Ok(($($name::bcs_deserialize(reader)?,)+))
            }
        }
    };
}

impl_tuple!(A, B);
impl_tuple!(A, B, C);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_of_u8_matches_write_bytes() {
        let bytes = vec![1u8, 2, 3];
        let mut w = BcsWriter::new();
        w.write_bytes(&bytes).unwrap();
        assert_eq!(to_bytes(&bytes).unwrap(), w.into_bytes());
    }

    #[test]
    fn test_nested_option_vec_roundtrip() {
        let value: Vec<Option<String>> = vec![Some("a".into()), None, Some("".into())];
        let bytes = to_bytes(&value).unwrap();
        assert_eq!(bytes, vec![3, 1, 1, b'a', 0, 1, 0]);
        let decoded: Vec<Option<String>> = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_fixed_array_has_no_prefix() {
        let arr = [9u8; 4];
        assert_eq!(to_bytes(&arr).unwrap(), vec![9, 9, 9, 9]);
        let back: [u8; 4] = from_bytes(&[9, 9, 9, 9]).unwrap();
        assert_eq!(back, arr);
    }

    #[test]
    fn test_from_bytes_rejects_trailing() {
        assert_eq!(
            from_bytes::<u8>(&[1, 2]),
            Err(BcsError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_tuple_is_concatenation() {
        let value = (1u8, 2u64);
        let bytes = to_bytes(&value).unwrap();
        assert_eq!(bytes, vec![1, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(from_bytes::<(u8, u64)>(&bytes).unwrap(), value);
    }
}
