//! Script and script-function payload bodies.

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::parser::FunctionId;
use crate::{Identifier, ModuleId, TypeTag};

/// A call to a published script function.
///
/// `args` are individually BCS-encoded argument values (see
/// [`crate::args`]); their order is the function's parameter order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScriptFunction {
    pub module: ModuleId,
    pub function: Identifier,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl ScriptFunction {
    pub fn new(
        module: ModuleId,
        function: Identifier,
        ty_args: Vec<TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        ScriptFunction {
            module,
            function,
            ty_args,
            args,
        }
    }

    /// Build a call from a parsed `address::module::function` id.
    pub fn from_function_id(id: FunctionId, ty_args: Vec<TypeTag>, args: Vec<Vec<u8>>) -> Self {
        Self::new(id.module, id.function, ty_args, args)
    }

    /// Return the `address::module::function` id of the call target.
    pub fn function_id(&self) -> FunctionId {
        FunctionId {
            module: self.module.clone(),
            function: self.function.clone(),
        }
    }
}

impl BcsSerialize for ScriptFunction {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        self.module.bcs_serialize(writer)?;
        self.function.bcs_serialize(writer)?;
        self.ty_args.bcs_serialize(writer)?;
        writer.write_sequence(&self.args, |w, arg| w.write_bytes(arg))
    }
}

impl BcsDeserialize for ScriptFunction {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(ScriptFunction {
            module: ModuleId::bcs_deserialize(reader)?,
            function: Identifier::bcs_deserialize(reader)?,
            ty_args: Vec::bcs_deserialize(reader)?,
            args: reader.read_sequence(|r| r.read_bytes())?,
        })
    }
}

/// An ad-hoc script: bytecode executed once rather than a published
/// function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Script {
    pub code: Vec<u8>,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl BcsSerialize for Script {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_bytes(&self.code)?;
        self.ty_args.bcs_serialize(writer)?;
        writer.write_sequence(&self.args, |w, arg| w.write_bytes(arg))
    }
}

impl BcsDeserialize for Script {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(Script {
            code: reader.read_bytes()?,
            ty_args: Vec::bcs_deserialize(reader)?,
            args: reader.read_sequence(|r| r.read_bytes())?,
        })
    }
}
