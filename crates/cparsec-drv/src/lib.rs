//! Library surface behind the `cparsec` binary, kept thin enough that the
//! integration tests in `tests/` can drive a parse without shelling out,
//! and thick enough that `main.rs` stays a plain argument-to-call mapping.

pub mod error;

use bumpalo::Bump;
use cparsec_par::{print_ast, DefaultTypePredicate, ParseResult, TokenStream, TypePredicate};

use error::{DriverError, Result};

/// One read-and-parse run: owns the arena a parse allocates into and the
/// source bytes the resulting AST's tokens borrow from, so a caller gets
/// back a `Session` it can print from without juggling lifetimes itself.
pub struct Session {
    arena: Bump,
    source: Vec<u8>,
    file: String,
}

impl Session {
    /// Reads `path` into memory; does not parse yet — `parse_expression`
    /// and `parse_type_name` are separate entry points from reading the
    /// file.
    pub fn read(path: &std::path::Path) -> Result<Self> {
        let source = std::fs::read(path).map_err(|source| DriverError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Session {
            arena: Bump::new(),
            source,
            file: path.display().to_string(),
        })
    }

    /// Parses the held source as a single expression.
    pub fn parse_expression(&self) -> ParseResult<'_, '_> {
        self.parse_expression_with(&DefaultTypePredicate)
    }

    /// Parses the held source as a single expression, using a caller's own
    /// type predicate (e.g. one backed by a real typedef table).
    pub fn parse_expression_with(&self, is_type_name: &dyn TypePredicate) -> ParseResult<'_, '_> {
        let tokens = TokenStream::from_source(&self.source);
        cparsec_par::parse_expression(&self.arena, &tokens, &self.file, is_type_name)
    }

    /// Parses the held source as a single type-name.
    pub fn parse_type_name(&self) -> ParseResult<'_, '_> {
        self.parse_type_name_with(&DefaultTypePredicate)
    }

    pub fn parse_type_name_with(&self, is_type_name: &dyn TypePredicate) -> ParseResult<'_, '_> {
        let tokens = TokenStream::from_source(&self.source);
        cparsec_par::parse_type_name(&self.arena, &tokens, &self.file, is_type_name)
    }
}

/// Prints a successful parse result's AST, or returns the `DriverError`
/// carrying its fatal message when the parse failed.
pub fn render(result: &ParseResult<'_, '_>) -> Result<String> {
    match result.node {
        Some(node) => Ok(print_ast(node)),
        None => Err(DriverError::Parse(
            result
                .error
                .clone()
                .expect("a Fatal ParseResult always carries an error"),
        )),
    }
}
