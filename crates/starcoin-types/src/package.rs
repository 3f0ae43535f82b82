//! Compiled modules and the packages that deploy them.

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::{AccountAddress, ScriptFunction, TypesError};

/// One compiled code unit, kept as opaque bytecode.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Module {
    code: Vec<u8>,
}

impl Module {
    pub fn new(code: Vec<u8>) -> Self {
        Module { code }
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("code_len", &self.code.len())
            .finish()
    }
}

impl BcsSerialize for Module {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_bytes(&self.code)
    }
}

impl BcsDeserialize for Module {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        reader.read_bytes().map(Module::new)
    }
}

/// A set of modules deployed together under one address, with an optional
/// function to run after publishing.
///
/// Module order is preserved exactly as supplied; it is part of the encoded
/// bytes and therefore of the transaction's signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Package {
    package_address: AccountAddress,
    modules: Vec<Module>,
    init_script: Option<ScriptFunction>,
}

impl Package {
    /// Create a package.
    ///
    /// # Returns
    /// `TypesError::EmptyPackage` if `modules` is empty.
    pub fn new(
        package_address: AccountAddress,
        modules: Vec<Module>,
        init_script: Option<ScriptFunction>,
    ) -> Result<Self, TypesError> {
        if modules.is_empty() {
            return Err(TypesError::EmptyPackage);
        }
        Ok(Package {
            package_address,
            modules,
            init_script,
        })
    }

    pub fn package_address(&self) -> AccountAddress {
        self.package_address
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn init_script(&self) -> Option<&ScriptFunction> {
        self.init_script.as_ref()
    }
}

impl BcsSerialize for Package {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        self.package_address.bcs_serialize(writer)?;
        self.modules.bcs_serialize(writer)?;
        self.init_script.bcs_serialize(writer)
    }
}

impl BcsDeserialize for Package {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        let package_address = AccountAddress::bcs_deserialize(reader)?;
        let modules = Vec::<Module>::bcs_deserialize(reader)?;
        let init_script = Option::<ScriptFunction>::bcs_deserialize(reader)?;
        Package::new(package_address, modules, init_script)
            .map_err(|e| BcsError::InvalidValue(e.to_string()))
    }
}
