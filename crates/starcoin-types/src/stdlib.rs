//! Builders for standard-library script functions published at `0x1`.

use starcoin_bcs::BcsError;

use crate::{args, AccountAddress, Identifier, ModuleId, ScriptFunction, StructTag, TypeTag};

/// The default gas and transfer token, `0x1::STC::STC`.
pub const STC_TOKEN_CODE: &str = "0x1::STC::STC";

/// The type tag of the native STC token.
pub fn stc_token_type() -> TypeTag {
    TypeTag::Struct(Box::new(StructTag::new(
        AccountAddress::ONE,
        Identifier::from_static("STC"),
        Identifier::from_static("STC"),
        vec![],
    )))
}

/// `0x1::TransferScripts::peer_to_peer_v2<token>(payee, amount)`.
///
/// Moves `amount` units of `token` from the sender to `payee`, creating the
/// payee account if it does not exist yet.
pub fn peer_to_peer_v2(
    token: TypeTag,
    payee: AccountAddress,
    amount: u128,
) -> Result<ScriptFunction, BcsError> {
    Ok(ScriptFunction::new(
        ModuleId::new(AccountAddress::ONE, Identifier::from_static("TransferScripts")),
        Identifier::from_static("peer_to_peer_v2"),
        vec![token],
        vec![args::address(payee)?, args::u128(amount)?],
    ))
}
