//! The driver (§4.11): binds the lexer, parser, evaluator, registries, and
//! constants table, and exposes `eval`/`define`/`clear`/`clear_all` plus
//! the standalone `list`/`show`/`clear` commands.

use crate::ast::Expr;
use crate::catalog;
use crate::constants::Constants;
use crate::dimension::Dimension;
use crate::error::DimError;
use crate::evaluator::{self, UnitResolver};
use crate::format;
use crate::lexer::{LexError, Lexer};
use crate::normalize::normalize;
use crate::parser::Parser;
use crate::registry::Registry;
use crate::token::{Token, TokenKind};
use crate::unit::Unit;
use crate::value::Value;

/// A session: registries consulted in order, user extras, and the
/// constants table. `eval` is re-entrant per §5: no internal locks, no
/// background tasks; concurrent callers need one `Engine` each.
pub struct Engine {
    registries: Vec<Registry>,
    user_extras: Vec<Registry>,
    constants: Constants,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Loads all four built-in catalogues (SI, Imperial, CGS, Industrial).
    pub fn new() -> Self {
        Self::with_registries(catalog::builtin_registries())
    }

    /// Builds an engine over an explicit, ordered registry list, still
    /// always consulting the constants table first (§4.3, §5). Embedders
    /// that need isolation, or a reduced catalogue, use this instead of
    /// the process-wide convenience of [`Engine::new`].
    pub fn with_registries(registries: Vec<Registry>) -> Self {
        Self {
            registries,
            user_extras: Vec::new(),
            constants: Constants::new(),
        }
    }

    /// Registers an additional, lowest-priority registry (the "user
    /// extras" slot named in §4.3's lookup order).
    pub fn add_user_registry(&mut self, registry: Registry) {
        self.user_extras.push(registry);
    }

    fn all_registries(&self) -> Vec<&Registry> {
        self.registries.iter().chain(self.user_extras.iter()).collect()
    }

    /// Evaluates one line of source, returning the text the driver
    /// prints, or a `DimError` to report. Recognizes the standalone
    /// commands (`list`, `show NAME`, `clear NAME`, `clear all`) before
    /// falling back to the expression grammar.
    pub fn eval(&mut self, src: &str) -> Result<String, DimError> {
        let (tokens, lex_errors) = Lexer::new(src).scan_tokens();
        if let Some(err) = lex_errors.into_iter().next() {
            log::error!("lex error evaluating {src:?}");
            return Err(lex_error_to_dim_error(err));
        }

        if let Some(command_result) = self.try_command(&tokens) {
            return command_result;
        }

        let mut parser = Parser::new(tokens);
        let program = parser.parse_program()?;
        log::debug!("parsed {} top-level expression(s) from {src:?}", program.len());

        let mut last = Value::Nil;
        for expr in &program {
            last = evaluator::evaluate(expr, self)?;
        }
        Ok(self.render(&last))
    }

    /// `define(name, expr_src)`: internally rewritten to `name = ( expr )`
    /// per §4.11.
    pub fn define(&mut self, name: &str, expr_src: &str) -> Result<(), DimError> {
        let rewritten = format!("{name} = ( {expr_src} )");
        self.eval(&rewritten).map(|_| ())
    }

    pub fn clear(&mut self, name: &str) -> bool {
        self.constants.clear(name)
    }

    pub fn clear_all(&mut self) {
        self.constants.clear_all();
    }

    fn render(&self, value: &Value) -> String {
        match value {
            Value::Quantity(q) => {
                let registries = self.all_registries();
                format::render(q.value, &q.unit, q.mode, q.is_delta, &registries)
            }
            Value::Number(n) => format!("{n}"),
            Value::Boolean(b) => b.to_string(),
            Value::Str(s) => s.clone(),
            Value::Nil => "nil".to_string(),
        }
    }

    fn try_command(&mut self, tokens: &[Token]) -> Option<Result<String, DimError>> {
        let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
        match kinds.as_slice() {
            [TokenKind::List, TokenKind::Eof] => Some(Ok(self.list_all())),
            [TokenKind::Show, TokenKind::Identifier(name), TokenKind::Eof] => {
                Some(self.show_one(name))
            }
            [TokenKind::Clear, TokenKind::All, TokenKind::Eof] => {
                self.clear_all();
                Some(Ok("ok".to_string()))
            }
            [TokenKind::Clear, TokenKind::Identifier(name), TokenKind::Eof] => {
                self.clear(name);
                Some(Ok("ok".to_string()))
            }
            _ => None,
        }
    }

    fn list_all(&self) -> String {
        self.constants.iter_in_order().map(|(name, unit)| self.describe_constant(name, unit)).collect::<Vec<_>>().join("\n")
    }

    fn show_one(&self, name: &str) -> Result<String, DimError> {
        match self.constants.get(name) {
            Some(unit) => Ok(self.describe_constant(name, unit)),
            None => Err(DimError::UndefinedVariable(name.to_string())),
        }
    }

    fn describe_constant(&self, name: &str, unit: &Unit) -> String {
        let registries = self.all_registries();
        let symbol = normalize(&unit.dim, &registries, &unit.symbol);
        format!("{name}: dim {}, 1 {name} = {} {symbol}", unit.dim, unit.scale)
    }
}

impl UnitResolver for Engine {
    fn resolve(&self, symbol: &str) -> Option<Unit> {
        if let Some(unit) = self.constants.get(symbol) {
            return Some(unit.clone());
        }
        for registry in self.all_registries() {
            if let Some(unit) = registry.find_exact(symbol) {
                return Some(unit);
            }
        }
        for registry in self.all_registries() {
            if let Some(unit) = registry.find(symbol) {
                return Some(unit);
            }
        }
        None
    }

    fn registries_for_normalize(&self) -> Vec<&Registry> {
        self.all_registries()
    }

    fn record_constant(&mut self, name: &str, dim: Dimension, canonical_value: f64) {
        self.constants.define(name, dim, canonical_value);
    }
}

fn lex_error_to_dim_error(err: LexError) -> DimError {
    match err {
        LexError::UnexpectedChar { line, character } => DimError::LexUnexpectedChar { line: line as u32, character },
        LexError::MalformedNumber { line, lexeme } => DimError::LexMalformedNumber { line: line as u32, lexeme },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_addition() {
        let mut e = Engine::new();
        assert_eq!(e.eval("2 m + 3 m").unwrap(), "5 m");
    }

    #[test]
    fn celsius_to_fahrenheit() {
        let mut e = Engine::new();
        let out = e.eval("100 C as F").unwrap();
        assert!(out.starts_with("212"), "got {out}");
    }

    #[test]
    fn scientific_pressure() {
        let mut e = Engine::new();
        let out = e.eval("1 bar as Pa:scientific").unwrap();
        assert_eq!(out, "1.000e5 Pa");
    }

    #[test]
    fn assignment_then_trailing_expression() {
        let mut e = Engine::new();
        e.eval("d = (24 h)").unwrap();
        let out = e.eval("1000000 s as d").unwrap();
        assert!(out.starts_with("11.574"), "got {out}");
    }

    #[test]
    fn area_power_reduces_back_to_length() {
        let mut e = Engine::new();
        assert_eq!(e.eval("(16 m^2)^0.5").unwrap(), "4 m");
    }

    #[test]
    fn product_of_lengths_is_area() {
        let mut e = Engine::new();
        assert_eq!(e.eval("2 m * 3 m").unwrap(), "6 m^2");
    }

    #[test]
    fn list_and_clear_roundtrip() {
        let mut e = Engine::new();
        e.eval("x = (5 m)").unwrap();
        assert!(e.eval("list").unwrap().contains("x: dim"));
        assert_eq!(e.eval("clear x").unwrap(), "ok");
        assert!(e.eval("list").unwrap().is_empty());
    }

    #[test]
    fn clear_all_empties_constants() {
        let mut e = Engine::new();
        e.eval("x = (5 m)").unwrap();
        e.eval("y = (2 s)").unwrap();
        assert_eq!(e.eval("clear all").unwrap(), "ok");
        assert!(e.eval("list").unwrap().is_empty());
    }

    #[test]
    fn dimension_mismatch_is_a_runtime_error() {
        let mut e = Engine::new();
        assert!(matches!(e.eval("2 m + 3 s"), Err(DimError::DimensionMismatch(_, _))));
    }
}
