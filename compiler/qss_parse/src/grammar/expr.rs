//! Expression parsing.
//!
//! Precedence climbing: parse a prefix form, then keep folding infix
//! operators while the operator at the cursor binds tighter than the
//! caller's precedence. Equal precedence stops the loop, so every binary
//! operator is left-associative.

use qss_ir::{
    BinaryOp, Expr, ExprKind, Identifier, NumberLiteral, Precedence, Selector, TokenKind, UnaryOp,
};

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;
        while let Some(op) = BinaryOp::from_token(self.current_kind()) {
            if op.precedence() <= precedence {
                break;
            }
            self.advance()?;
            let right = self.parse_expression(op.precedence())?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Infix {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let kind = self.current_kind();
        match kind {
            TokenKind::Identifier => {
                let tok = self.advance()?;
                Ok(Expr::new(
                    ExprKind::Identifier(Identifier::new(tok.text, tok.span)),
                    tok.span,
                ))
            }
            TokenKind::Number => {
                let tok = self.advance()?;
                let literal = split_number(&tok.text).ok_or(ParseError::Unexpected {
                    expected: "a number",
                    found: TokenKind::Number,
                    span: tok.span,
                })?;
                Ok(Expr::new(ExprKind::Number(literal), tok.span))
            }
            TokenKind::String => {
                let tok = self.advance()?;
                Ok(Expr::new(ExprKind::String(tok.text), tok.span))
            }
            TokenKind::Color => {
                let tok = self.advance()?;
                Ok(Expr::new(ExprKind::Color(tok.text), tok.span))
            }
            TokenKind::True | TokenKind::False => {
                let tok = self.advance()?;
                Ok(Expr::new(
                    ExprKind::Bool(kind == TokenKind::True),
                    tok.span,
                ))
            }
            TokenKind::Sub => {
                let start = self.advance()?.span;
                let right = self.parse_expression(Precedence::Prefix)?;
                let span = start.merge(right.span);
                Ok(Expr::new(
                    ExprKind::Prefix {
                        op: UnaryOp::Neg,
                        right: Box::new(right),
                    },
                    span,
                ))
            }
            TokenKind::LeftParen => {
                let open = self.advance()?.span;
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.expect_close(TokenKind::RightParen, "`(`", open)?;
                Ok(inner)
            }
            kind if kind.is_selector() => {
                let tok = self.advance()?;
                let span = tok.span;
                Ok(Expr::new(ExprKind::Selector(Selector::new(tok)), span))
            }
            found => Err(ParseError::ExpectedExpression {
                found,
                span: self.current_span(),
            }),
        }
    }
}

/// Split `20px` into magnitude and unit. `None` if the magnitude is not a
/// valid number.
fn split_number(text: &str) -> Option<NumberLiteral> {
    let unit_start = text
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(text.len());
    let (digits, unit) = text.split_at(unit_start);
    let value = digits.parse::<f64>().ok()?;
    Some(NumberLiteral {
        value,
        unit: (!unit.is_empty()).then(|| unit.to_owned()),
    })
}
