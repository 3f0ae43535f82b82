/// Starcoin SDK - On-chain types and user transactions.
///
/// Provides the fixed schema the BCS codec walks: account addresses, Move
/// identifiers, module ids, struct and type tags, modules, packages, script
/// functions, transaction payloads, raw and signed user transactions, and the
/// on-chain account resource.

pub mod access_path;
pub mod account;
pub mod account_address;
pub mod args;
pub mod identifier;
pub mod language;
pub mod package;
pub mod parser;
pub mod payload;
pub mod script;
pub mod stdlib;
pub mod transaction;

mod error;
pub use access_path::AccessPath;
pub use account::AccountResource;
pub use account_address::{AccountAddress, ADDRESS_LENGTH};
pub use error::TypesError;
pub use identifier::Identifier;
pub use language::{ModuleId, StructTag, TypeTag};
pub use package::{Module, Package};
pub use parser::FunctionId;
pub use payload::TransactionPayload;
pub use script::{Script, ScriptFunction};
pub use transaction::{ChainId, RawUserTransaction, SignedUserTransaction, TransactionAuthenticator};
