//! The on-chain `0x1::Account::Account` resource.
//!
//! Only the sequence number is needed to build transactions, but the whole
//! resource is decoded so that a layout mismatch fails loudly instead of
//! yielding a wrong counter.

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::{AccessPath, AccountAddress, Identifier, StructTag};

/// An event stream owned by an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventHandle {
    pub counter: u64,
    pub guid: Vec<u8>,
}

impl BcsSerialize for EventHandle {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_u64(self.counter);
        writer.write_bytes(&self.guid)
    }
}

impl BcsDeserialize for EventHandle {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(EventHandle {
            counter: reader.read_u64()?,
            guid: reader.read_bytes()?,
        })
    }
}

/// Capability to withdraw from an account, held while not delegated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawCapability {
    pub account_address: AccountAddress,
}

/// Capability to rotate an account's authentication key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyRotationCapability {
    pub account_address: AccountAddress,
}

macro_rules! impl_capability_bcs {
    ($($t:ident),*) => {
        $(
            impl BcsSerialize for $t {
                fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
                    self.account_address.bcs_serialize(writer)
                }
            }

            impl BcsDeserialize for $t {
                fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
                    Ok($t {
                        account_address: AccountAddress::bcs_deserialize(reader)?,
                    })
                }
            }
        )*
    };
}

impl_capability_bcs!(WithdrawCapability, KeyRotationCapability);

/// The account resource stored at `{address}/1/0x1::Account::Account`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountResource {
    pub authentication_key: Vec<u8>,
    pub withdrawal_capability: Option<WithdrawCapability>,
    pub key_rotation_capability: Option<KeyRotationCapability>,
    pub withdraw_events: EventHandle,
    pub deposit_events: EventHandle,
    pub accept_token_events: EventHandle,
    pub sequence_number: u64,
}

impl AccountResource {
    /// The struct tag `0x1::Account::Account`.
    pub fn struct_tag() -> StructTag {
        StructTag::new(
            AccountAddress::ONE,
            Identifier::from_static("Account"),
            Identifier::from_static("Account"),
            vec![],
        )
    }

    /// The state path the resource for `address` lives at.
    pub fn access_path(address: AccountAddress) -> AccessPath {
        AccessPath::resource(address, Self::struct_tag())
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }
}

impl BcsSerialize for AccountResource {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_bytes(&self.authentication_key)?;
        self.withdrawal_capability.bcs_serialize(writer)?;
        self.key_rotation_capability.bcs_serialize(writer)?;
        self.withdraw_events.bcs_serialize(writer)?;
        self.deposit_events.bcs_serialize(writer)?;
        self.accept_token_events.bcs_serialize(writer)?;
        writer.write_u64(self.sequence_number);
        Ok(())
    }
}

impl BcsDeserialize for AccountResource {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        Ok(AccountResource {
            authentication_key: reader.read_bytes()?,
            withdrawal_capability: Option::bcs_deserialize(reader)?,
            key_rotation_capability: Option::bcs_deserialize(reader)?,
            withdraw_events: EventHandle::bcs_deserialize(reader)?,
            deposit_events: EventHandle::bcs_deserialize(reader)?,
            accept_token_events: EventHandle::bcs_deserialize(reader)?,
            sequence_number: reader.read_u64()?,
        })
    }
}
