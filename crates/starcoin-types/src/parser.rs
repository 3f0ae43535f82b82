//! Parsing type tags, struct tags, module ids and function ids from text.
//!
//! Accepted grammar:
//!
//! ```text
//! type_tag    := "bool" | "u8" | "u64" | "u128" | "address" | "signer"
//!              | "vector" "<" type_tag ">"
//!              | struct_tag
//! struct_tag  := address "::" ident "::" ident [ "<" type_tag ("," type_tag)* ">" ]
//! module_id   := address "::" ident
//! function_id := address "::" ident "::" ident
//! ```
//!
//! Addresses are `0x`-prefixed hex; whitespace between tokens is ignored.

use starcoin_bcs::MAX_CONTAINER_DEPTH;

use crate::{AccountAddress, Identifier, ModuleId, StructTag, TypeTag, TypesError};

/// Each parsed nesting level can cost two container levels when encoded
/// (a type tag wrapping a struct tag).
pub const MAX_TYPE_TAG_NESTING: usize = MAX_CONTAINER_DEPTH / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Address(String),
    Name(String),
    ColonColon,
    Lt,
    Gt,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Address(s) | Token::Name(s) => write!(f, "{}", s),
            Token::ColonColon => write!(f, "::"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::Comma => write!(f, ","),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, TypesError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '<' => {
                chars.next();
                tokens.push(Token::Lt);
            }
            '>' => {
                chars.next();
                tokens.push(Token::Gt);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            ':' => {
                chars.next();
                match chars.next() {
                    Some((_, ':')) => tokens.push(Token::ColonColon),
                    _ => {
                        return Err(TypesError::Parse(format!(
                            "expected '::' at offset {} in {:?}",
                            start, input
                        )))
                    }
                }
            }
            c if c.is_ascii_alphanumeric() || c == '_' => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let word = &input[start..end];
                if word.starts_with("0x") {
                    tokens.push(Token::Address(word.to_string()));
                } else {
                    tokens.push(Token::Name(word.to_string()));
                }
            }
            other => {
                return Err(TypesError::Parse(format!(
                    "unexpected character {:?} at offset {} in {:?}",
                    other, start, input
                )))
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
    peeked: Option<Token>,
    depth: usize,
}

impl Parser {
    fn new(input: &str) -> Result<Self, TypesError> {
        Ok(Parser {
            tokens: tokenize(input)?.into_iter(),
            peeked: None,
            depth: 0,
        })
    }

    fn peek(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            self.peeked = self.tokens.next();
        }
        self.peeked.as_ref()
    }

    fn next(&mut self) -> Result<Token, TypesError> {
        self.peeked
            .take()
            .or_else(|| self.tokens.next())
            .ok_or_else(|| TypesError::Parse("unexpected end of input".to_string()))
    }

    fn expect(&mut self, expected: Token) -> Result<(), TypesError> {
        let token = self.next()?;
        if token != expected {
            return Err(TypesError::Parse(format!(
                "expected '{}', found '{}'",
                expected, token
            )));
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TypesError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(TypesError::Parse(format!("unexpected trailing '{}'", token))),
        }
    }

    fn address(&mut self) -> Result<AccountAddress, TypesError> {
        match self.next()? {
            Token::Address(s) => AccountAddress::from_hex_literal(&s),
            other => Err(TypesError::Parse(format!("expected address, found '{}'", other))),
        }
    }

    fn identifier(&mut self) -> Result<Identifier, TypesError> {
        match self.next()? {
            Token::Name(s) => Identifier::new(s),
            other => Err(TypesError::Parse(format!(
                "expected identifier, found '{}'",
                other
            ))),
        }
    }

    /// `address "::" ident`
    fn module_id(&mut self) -> Result<ModuleId, TypesError> {
        let address = self.address()?;
        self.expect(Token::ColonColon)?;
        let name = self.identifier()?;
        Ok(ModuleId::new(address, name))
    }

    fn struct_tag(&mut self) -> Result<StructTag, TypesError> {
        let module_id = self.module_id()?;
        self.expect(Token::ColonColon)?;
        let name = self.identifier()?;

        let mut type_params = Vec::new();
        if self.peek() == Some(&Token::Lt) {
            self.next()?;
            loop {
                type_params.push(self.type_tag()?);
                match self.next()? {
                    Token::Comma => continue,
                    Token::Gt => break,
                    other => {
                        return Err(TypesError::Parse(format!(
                            "expected ',' or '>', found '{}'",
                            other
                        )))
                    }
                }
            }
        }
        Ok(StructTag::new(module_id.address, module_id.name, name, type_params))
    }

    fn type_tag(&mut self) -> Result<TypeTag, TypesError> {
        if self.depth >= MAX_TYPE_TAG_NESTING {
            return Err(TypesError::Parse(format!(
                "type tag nesting exceeds {}",
                MAX_TYPE_TAG_NESTING
            )));
        }
        self.depth += 1;
        let result = self.type_tag_inner();
        self.depth -= 1;
        result
    }

    fn type_tag_inner(&mut self) -> Result<TypeTag, TypesError> {
        if let Some(Token::Address(_)) = self.peek() {
            return Ok(TypeTag::from(self.struct_tag()?));
        }
        let name = match self.next()? {
            Token::Name(name) => name,
            other => return Err(TypesError::Parse(format!("expected type, found '{}'", other))),
        };
        let tag = match name.as_str() {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect(Token::Lt)?;
                let inner = self.type_tag()?;
                self.expect(Token::Gt)?;
                TypeTag::vector(inner)
            }
            other => return Err(TypesError::Parse(format!("unknown type {:?}", other))),
        };
        Ok(tag)
    }
}

fn parse_all<T>(
    input: &str,
    f: impl FnOnce(&mut Parser) -> Result<T, TypesError>,
) -> Result<T, TypesError> {
    let mut parser = Parser::new(input)?;
    let value = f(&mut parser)?;
    parser.finish()?;
    Ok(value)
}

/// Parse a type tag such as `vector<0x1::Token::Token<0x1::STC::STC>>`.
pub fn parse_type_tag(input: &str) -> Result<TypeTag, TypesError> {
    parse_all(input, Parser::type_tag)
}

/// Parse a struct tag such as `0x1::Account::Account`.
pub fn parse_struct_tag(input: &str) -> Result<StructTag, TypesError> {
    parse_all(input, Parser::struct_tag)
}

/// Parse a module id such as `0x1::TransferScripts`.
pub fn parse_module_id(input: &str) -> Result<ModuleId, TypesError> {
    parse_all(input, Parser::module_id)
}

/// A script function entry point: `address::module::function`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionId {
    pub module: ModuleId,
    pub function: Identifier,
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.module, self.function)
    }
}

impl std::str::FromStr for FunctionId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(s, |p| {
            let module = p.module_id()?;
            p.expect(Token::ColonColon)?;
            let function = p.identifier()?;
            Ok(FunctionId { module, function })
        })
    }
}

impl std::str::FromStr for TypeTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type_tag(s)
    }
}

impl std::str::FromStr for StructTag {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_struct_tag(s)
    }
}

impl std::str::FromStr for ModuleId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_module_id(s)
    }
}
