//! Recursive-descent parser: tokens to the expression tree (§4.6).
//!
//! Precedence, low to high, per the EBNF in §6 (the authoritative grammar;
//! §4.6's prose precedence list places `assignment` between `term` and
//! `factor`, which the EBNF does not reflect — assignment is only ever a
//! `primary` production here, `Ident "=" "(" expr ")"`):
//! `expr` (with optional `as` clause) -> `compare` -> `term (+ -)` ->
//! `factor (* /)` -> `power (^, right-assoc)` -> `unary (- !)` -> `primary`.

use crate::ast::{BinaryOp, Expr, UnaryOp, UnitExpr, UnitOp};
use crate::error::DimError;
use crate::lexer::split_superscript_exponent;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

type PResult<T> = Result<T, DimError>;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses every top-level expression on the line, e.g. an assignment
    /// immediately followed by a trailing expression with no connecting
    /// operator (§4.6 "A line like `d = (24 h) 200 kg/h as kg/d`").
    pub fn parse_program(&mut self) -> PResult<Vec<Expr>> {
        let mut exprs = Vec::new();
        while !self.check(&TokenKind::Eof) {
            exprs.push(self.expr()?);
        }
        Ok(exprs)
    }

    fn expr(&mut self) -> PResult<Expr> {
        let child = self.compare()?;
        if self.match_kind(&TokenKind::As) {
            let unit = self.unit_expr()?;
            let mode = if self.match_kind(&TokenKind::Colon) {
                Some(self.consume_identifier("format mode")?)
            } else {
                None
            };
            return Ok(Expr::Display { child: Box::new(child), unit, mode });
        }
        Ok(child)
    }

    fn compare(&mut self) -> PResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::Equal => BinaryOp::Equal,
                TokenKind::EqualEqual => BinaryOp::EqualEqual,
                TokenKind::BangEqual => BinaryOp::BangEqual,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> PResult<Expr> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.factor()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> PResult<Expr> {
        let mut lhs = self.power()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.power()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn power(&mut self) -> PResult<Expr> {
        let base = self.unary()?;
        if self.match_kind(&TokenKind::Caret) {
            // Right-associative: recurse into another `power`, not `unary`.
            let exp = self.power()?;
            return Ok(Expr::Binary { op: BinaryOp::Pow, lhs: Box::new(base), rhs: Box::new(exp) });
        }
        Ok(base)
    }

    fn unary(&mut self) -> PResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let child = self.unary()?;
            return Ok(Expr::Unary { op, child: Box::new(child) });
        }
        self.primary()
    }

    fn primary(&mut self) -> PResult<Expr> {
        if self.match_kind(&TokenKind::LParen) {
            let inner = self.expr()?;
            self.expect(&TokenKind::RParen, ")")?;
            return Ok(Expr::Grouping(Box::new(inner)));
        }

        // Assignment: Ident "=" "(" expr ")", only when both lookaheads
        // confirm it — otherwise identifiers are not valid standalone
        // primaries (they only ever appear inside a unit expression).
        if let TokenKind::Identifier(name) = self.peek_kind().clone() {
            if self.check_at(1, &TokenKind::Equal) && self.check_at(2, &TokenKind::LParen) {
                self.advance(); // name
                self.advance(); // =
                self.advance(); // (
                let value = self.expr()?;
                self.expect(&TokenKind::RParen, ")")?;
                return Ok(Expr::Assignment { name, value: Box::new(value) });
            }
        }

        if let TokenKind::Number(n) = *self.peek_kind() {
            self.advance();
            let number = Expr::Number(n);
            if matches!(self.peek_kind(), TokenKind::Identifier(_)) {
                let unit = self.unit_expr()?;
                return Ok(Expr::UnitApplied { number: Box::new(number), unit });
            }
            return Ok(number);
        }

        let tok = self.peek().clone();
        Err(DimError::ParseError {
            line: tok.line as u32,
            lexeme: tok.lexeme,
            message: "expected expression".to_string(),
        })
    }

    /// `unitTerm (("*"|"/") unitTerm)*`, with the one-token lookahead
    /// rule: an operator only joins the unit expression when the token
    /// immediately following it is an `Identifier`. `^` is handled
    /// entirely inside [`Parser::unit_term`] (it only ever admits a
    /// `Number` afterwards, so the lookahead-on-`Identifier` condition
    /// for a compound `^` can never hold and is correctly never reached
    /// here).
    fn unit_expr(&mut self) -> PResult<UnitExpr> {
        let mut lhs = self.unit_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star if self.next_is_identifier() => UnitOp::Mul,
                TokenKind::Slash if self.next_is_identifier() => UnitOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.unit_term()?;
            lhs = UnitExpr::Compound { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn unit_term(&mut self) -> PResult<UnitExpr> {
        let name = self.consume_identifier("unit")?;
        let (base, embedded_exp) = split_superscript_exponent(&name);
        let base = base.to_string();
        if let Some(exp) = embedded_exp {
            return Ok(UnitExpr::Term { name: base, exp });
        }
        if self.match_kind(&TokenKind::Caret) {
            let exp_tok = self.peek_kind().clone();
            if let TokenKind::Number(n) = exp_tok {
                self.advance();
                return Ok(UnitExpr::Term { name: base, exp: n as i32 });
            }
            let tok = self.peek().clone();
            return Err(DimError::ParseError {
                line: tok.line as u32,
                lexeme: tok.lexeme,
                message: "expected a number after '^' in a unit exponent".to_string(),
            });
        }
        Ok(UnitExpr::Term { name: base, exp: 1 })
    }

    fn next_is_identifier(&self) -> bool {
        matches!(self.tokens.get(self.pos + 1).map(|t| &t.kind), Some(TokenKind::Identifier(_)))
    }

    fn consume_identifier(&mut self, what: &str) -> PResult<String> {
        if let TokenKind::Identifier(name) = self.peek_kind().clone() {
            self.advance();
            return Ok(name);
        }
        let tok = self.peek().clone();
        Err(DimError::ParseError {
            line: tok.line as u32,
            lexeme: tok.lexeme,
            message: format!("expected {what}"),
        })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek_kind()) == std::mem::discriminant(kind)
    }

    fn check_at(&self, offset: usize, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.pos + offset)
            .is_some_and(|t| std::mem::discriminant(&t.kind) == std::mem::discriminant(kind))
    }

    fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> &Token {
        let tok = &self.tokens[self.pos];
        if !matches!(tok.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> PResult<()> {
        if self.match_kind(kind) {
            Ok(())
        } else {
            let tok = self.peek().clone();
            Err(DimError::ParseError {
                line: tok.line as u32,
                lexeme: tok.lexeme,
                message: format!("expected '{what}'"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_one(src: &str) -> Expr {
        let (tokens, errors) = Lexer::new(src).scan_tokens();
        assert!(errors.is_empty());
        let mut p = Parser::new(tokens);
        let mut program = p.parse_program().unwrap();
        assert_eq!(program.len(), 1);
        program.remove(0)
    }

    #[test]
    fn number_plus_unit_is_unit_applied() {
        let e = parse_one("2 m");
        assert!(matches!(e, Expr::UnitApplied { .. }));
    }

    #[test]
    fn compound_division_builds_quotient() {
        let e = parse_one("5 m / 2 s");
        match e {
            Expr::Binary { op: BinaryOp::Div, lhs, rhs } => {
                assert!(matches!(*lhs, Expr::UnitApplied { .. }));
                assert!(matches!(*rhs, Expr::UnitApplied { .. }));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn velocity_unit_juxtaposition_is_one_quantity() {
        let e = parse_one("2 m/s");
        match e {
            Expr::UnitApplied { unit, .. } => {
                assert!(matches!(unit, UnitExpr::Compound { op: UnitOp::Div, .. }));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn product_of_two_quantities_stays_two_quantities() {
        let e = parse_one("2 m * 3 m");
        assert!(matches!(e, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn as_clause_with_mode() {
        let e = parse_one("1 bar as Pa:scientific");
        match e {
            Expr::Display { mode, .. } => assert_eq!(mode.as_deref(), Some("scientific")),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn assignment_requires_parens() {
        let e = parse_one("d = (24 h)");
        assert!(matches!(e, Expr::Assignment { .. }));
    }

    #[test]
    fn assignment_then_trailing_expression_are_two_statements() {
        let (tokens, errors) = Lexer::new("d = (24 h) 200 kg/h as kg/d").scan_tokens();
        assert!(errors.is_empty());
        let mut p = Parser::new(tokens);
        let program = p.parse_program().unwrap();
        assert_eq!(program.len(), 2);
        assert!(matches!(program[0], Expr::Assignment { .. }));
        assert!(matches!(program[1], Expr::Display { .. }));
    }

    #[test]
    fn caret_power_is_right_associative_and_exponent_is_full_power_expr() {
        let e = parse_one("(16 m^2)^0.5");
        assert!(matches!(e, Expr::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn superscript_identifier_becomes_term_with_exponent() {
        let e = parse_one("5 m\u{00B2}");
        match e {
            Expr::UnitApplied { unit, .. } => {
                assert_eq!(unit, UnitExpr::Term { name: "m".to_string(), exp: 2 });
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }
}
