//! Move identifiers (module, struct and function names).

use starcoin_bcs::{BcsDeserialize, BcsError, BcsReader, BcsSerialize, BcsWriter};

use crate::TypesError;

/// A valid Move identifier.
///
/// Either an ASCII letter followed by letters, digits and underscores, or an
/// underscore followed by at least one such character.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Box<str>);

/// Check whether `s` is a valid Move identifier.
pub fn is_valid(s: &str) -> bool {
    let mut chars = s.chars();
    let rest_ok = |c: char| c.is_ascii_alphanumeric() || c == '_';
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(rest_ok),
        Some('_') => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(rest_ok)
        }
        _ => false,
    }
}

impl Identifier {
    /// Validate and wrap `s`.
    pub fn new(s: impl Into<Box<str>>) -> Result<Self, TypesError> {
        let s = s.into();
        if is_valid(&s) {
            Ok(Identifier(s))
        } else {
            Err(TypesError::InvalidIdentifier(s.into_string()))
        }
    }

    /// Wrap a compile-time name known to be valid.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(is_valid(s), "invalid static identifier {:?}", s);
        Identifier(s.into())
    }

    /// Return the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl BcsSerialize for Identifier {
    fn bcs_serialize(&self, writer: &mut BcsWriter) -> Result<(), BcsError> {
        writer.write_str(&self.0)
    }
}

impl BcsDeserialize for Identifier {
    fn bcs_deserialize(reader: &mut BcsReader<'_>) -> Result<Self, BcsError> {
        let s = reader.read_string()?;
        Identifier::new(s).map_err(|e| BcsError::InvalidValue(e.to_string()))
    }
}
