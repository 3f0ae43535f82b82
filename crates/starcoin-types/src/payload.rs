//! The transaction payload union.

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::{Package, Script, ScriptFunction};

/// What a user transaction does.
///
/// | Index | Variant        |
/// |-------|----------------|
/// | 0     | Script         |
/// | 1     | Package        |
/// | 2     | ScriptFunction |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransactionPayload {
    Script(Script),
    Package(Package),
    ScriptFunction(ScriptFunction),
}

impl TransactionPayload {
    const VARIANT_COUNT: u32 = 3;

    fn variant_index(&self) -> u32 {
        match self {
            TransactionPayload::Script(_) => 0,
            TransactionPayload::Package(_) => 1,
            TransactionPayload::ScriptFunction(_) => 2,
        }
    }
}

impl From<ScriptFunction> for TransactionPayload {
    fn from(f: ScriptFunction) -> Self {
        TransactionPayload::ScriptFunction(f)
    }
}

impl From<Package> for TransactionPayload {
    fn from(p: Package) -> Self {
        TransactionPayload::Package(p)
    }
}

impl From<Script> for TransactionPayload {
    fn from(s: Script) -> Self {
        TransactionPayload::Script(s)
    }
}

impl BcsSerialize for TransactionPayload {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_variant(self.variant_index(), |w| match self {
            TransactionPayload::Script(s) => s.bcs_serialize(w),
            TransactionPayload::Package(p) => p.bcs_serialize(w),
            TransactionPayload::ScriptFunction(f) => f.bcs_serialize(w),
        })
    }
}

impl BcsDeserialize for TransactionPayload {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        match reader.read_variant_index("TransactionPayload", Self::VARIANT_COUNT)? {
            0 => Ok(TransactionPayload::Script(Script::bcs_deserialize(reader)?)),
            1 => Ok(TransactionPayload::Package(Package::bcs_deserialize(reader)?)),
            2 => Ok(TransactionPayload::ScriptFunction(
                ScriptFunction::bcs_deserialize(reader)?,
            )),
            index => Err(BcsError::UnknownVariant {
                type_name: "TransactionPayload",
                index,
            }),
        }
    }
}
