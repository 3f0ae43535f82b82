//! Module ids, struct tags and type tags.
//!
//! `TypeTag` and `StructTag` are mutually recursive: a struct's type
//! parameters are type tags, and a type tag may be a struct. Values are
//! finite trees, so no cycle handling is needed; the BCS container depth
//! limit bounds how deep a decoded tree may go.

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::{AccountAddress, Identifier};

// ---------------------------------------------------------------------------
// ModuleId
// ---------------------------------------------------------------------------

/// A published module: the address it lives under and its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: Identifier,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: Identifier) -> Self {
        ModuleId { address, name }
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

impl BcsSerialize for ModuleId {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        self.address.bcs_serialize(writer)?;
        self.name.bcs_serialize(writer)
    }
}

impl BcsDeserialize for ModuleId {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(ModuleId {
            address: AccountAddress::bcs_deserialize(reader)?,
            name: Identifier::bcs_deserialize(reader)?,
        })
    }
}

// ---------------------------------------------------------------------------
// StructTag
// ---------------------------------------------------------------------------

/// A named struct type with its type arguments.
///
/// Identity is the full 4-tuple; equality, ordering and hashing consider
/// every field in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: Identifier,
    pub name: Identifier,
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    pub fn new(
        address: AccountAddress,
        module: Identifier,
        name: Identifier,
        type_params: Vec<TypeTag>,
    ) -> Self {
        StructTag {
            address,
            module,
            name,
            type_params,
        }
    }

    /// Return the id of the module declaring this struct.
    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.address, self.module.clone())
    }
}

impl std::fmt::Display for StructTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some((first, rest)) = self.type_params.split_first() {
            write!(f, "<{}", first)?;
            for param in rest {
                write!(f, ", {}", param)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl BcsSerialize for StructTag {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.nested(|w| {
            self.address.bcs_serialize(w)?;
            self.module.bcs_serialize(w)?;
            self.name.bcs_serialize(w)?;
            w.write_sequence(&self.type_params, |w, tag| tag.bcs_serialize(w))
        })
    }
}

impl BcsDeserialize for StructTag {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.nested(|r| {
            Ok(StructTag {
                address: AccountAddress::bcs_deserialize(r)?,
                module: Identifier::bcs_deserialize(r)?,
                name: Identifier::bcs_deserialize(r)?,
                type_params: r.read_sequence(TypeTag::bcs_deserialize)?,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// TypeTag
// ---------------------------------------------------------------------------

/// The on-chain type of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

impl TypeTag {
    const VARIANT_COUNT: u32 = 8;

    fn variant_index(&self) -> u32 {
        match self {
            TypeTag::Bool => 0,
            TypeTag::U8 => 1,
            TypeTag::U64 => 2,
            TypeTag::U128 => 3,
            TypeTag::Address => 4,
            TypeTag::Signer => 5,
            TypeTag::Vector(_) => 6,
            TypeTag::Struct(_) => 7,
        }
    }

    /// Shorthand for `vector<inner>`.
    pub fn vector(inner: TypeTag) -> Self {
        TypeTag::Vector(Box::new(inner))
    }
}

impl From<StructTag> for TypeTag {
    fn from(tag: StructTag) -> Self {
        TypeTag::Struct(Box::new(tag))
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{}>", inner),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

impl BcsSerialize for TypeTag {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.nested(|w| {
            w.write_variant(self.variant_index(), |w| match self {
                TypeTag::Bool
                | TypeTag::U8
                | TypeTag::U64
                | TypeTag::U128
                | TypeTag::Address
                | TypeTag::Signer => Ok(()),
                TypeTag::Vector(inner) => inner.bcs_serialize(w),
                TypeTag::Struct(tag) => tag.bcs_serialize(w),
            })
        })
    }
}

impl BcsDeserialize for TypeTag {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.nested(|r| {
            let tag = match r.read_variant_index("TypeTag", Self::VARIANT_COUNT)? {
                0 => TypeTag::Bool,
                1 => TypeTag::U8,
                2 => TypeTag::U64,
                3 => TypeTag::U128,
                4 => TypeTag::Address,
                5 => TypeTag::Signer,
                6 => TypeTag::Vector(Box::new(TypeTag::bcs_deserialize(r)?)),
                7 => TypeTag::Struct(Box::new(StructTag::bcs_deserialize(r)?)),
                index => {
                    return Err(BcsError::UnknownVariant {
                        type_name: "TypeTag",
                        index,
                    })
                }
            };
            Ok(tag)
        })
    }
}
