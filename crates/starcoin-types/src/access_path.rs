//! State access paths, the keys the `state.get` RPC looks values up by.

use crate::{AccountAddress, Identifier, StructTag};

/// What kind of value an access path points at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataPath {
    /// Published module bytecode.
    Code(Identifier),
    /// A resource stored under the account.
    Resource(StructTag),
}

impl DataPath {
    fn type_index(&self) -> u8 {
        match self {
            DataPath::Code(_) => 0,
            DataPath::Resource(_) => 1,
        }
    }
}

/// An address plus the data path under it.
///
/// Rendered as `{address}/{type}/{name}`, e.g.
/// `0x…01/1/0x…01::Account::Account`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessPath {
    pub address: AccountAddress,
    pub path: DataPath,
}

impl AccessPath {
    /// Path to the resource `tag` stored under `address`.
    pub fn resource(address: AccountAddress, tag: StructTag) -> Self {
        AccessPath {
            address,
            path: DataPath::Resource(tag),
        }
    }

    /// Path to the module `name` published under `address`.
    pub fn code(address: AccountAddress, name: Identifier) -> Self {
        AccessPath {
            address,
            path: DataPath::Code(name),
        }
    }
}

impl std::fmt::Display for AccessPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/", self.address, self.path.type_index())?;
        match &self.path {
            DataPath::Code(name) => write!(f, "{}", name),
            DataPath::Resource(tag) => write!(f, "{}", tag),
        }
    }
}
