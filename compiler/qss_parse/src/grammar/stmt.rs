//! Statement parsing.

use std::rc::Rc;

use qss_ir::{
    Block, Extend, IfStatement, Import, Include, Mixin, Precedence, Rule, Ruleset, Selector,
    Stmt, StmtKind, StyleSheet, TokenKind, VarStatement,
};
use tracing::trace;

use crate::stack::ensure_sufficient_stack;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole input.
    pub fn parse_program(&mut self) -> Result<StyleSheet, ParseError> {
        let mut sheet = StyleSheet::default();
        while !self.is_at_end() {
            if let Some(stmt) = self.parse_statement()? {
                sheet.statements.push(stmt);
            }
        }
        Ok(sheet)
    }

    /// Parse one statement. Returns `None` for an empty `;`.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Option<Stmt>, ParseError> {
        trace!(current = ?self.current_kind(), peek = ?self.peek.kind, "statement");
        let stmt = match self.current_kind() {
            TokenKind::Semicolon => {
                self.advance()?;
                return Ok(None);
            }
            TokenKind::Identifier if self.peek_is(TokenKind::Assign) => self.parse_var()?,
            TokenKind::Property if self.peek_is(TokenKind::Assign) => self.parse_rule()?,
            TokenKind::Import => self.parse_import()?,
            TokenKind::Mixin => self.parse_mixin()?,
            TokenKind::Include => self.parse_include()?,
            TokenKind::Extend => self.parse_extend()?,
            TokenKind::If => self.parse_if()?,
            kind if kind.starts_ruleset() => {
                let ruleset = self.parse_ruleset()?;
                let span = ruleset.span;
                Stmt::new(StmtKind::Ruleset(ruleset), span)
            }
            _ => self.parse_expression_statement()?,
        };
        Ok(Some(stmt))
    }

    /// `;` closing a statement. Optional right before `}` or end of input.
    fn end_statement(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semicolon)? || self.check(TokenKind::RightBrace) || self.is_at_end()
        {
            Ok(())
        } else {
            Err(self.unexpected("`;`"))
        }
    }

    /// `$name: <expr> [!default] [!global];`
    fn parse_var(&mut self) -> Result<Stmt, ParseError> {
        let name = self.advance()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expression(Precedence::Lowest)?;

        let mut is_global = false;
        let mut is_default = false;
        loop {
            if self.eat(TokenKind::Global)? {
                is_global = true;
            } else if self.eat(TokenKind::Default)? {
                is_default = true;
            } else {
                break;
            }
        }
        let span = name.span.merge(self.previous_span());
        self.end_statement()?;

        Ok(Stmt::new(
            StmtKind::Var(VarStatement {
                name: qss_ir::Identifier::new(name.text, name.span),
                value,
                is_global,
                is_default,
            }),
            span,
        ))
    }

    /// `property: value [value ...] [!important];`
    fn parse_rule(&mut self) -> Result<Stmt, ParseError> {
        let property = self.advance()?;
        self.expect(TokenKind::Assign)?;

        let mut value = vec![self.parse_expression(Precedence::Lowest)?];
        let mut important = false;
        loop {
            match self.current_kind() {
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof => break,
                TokenKind::Important => {
                    self.advance()?;
                    important = true;
                    break;
                }
                _ => value.push(self.parse_expression(Precedence::Lowest)?),
            }
        }
        let span = property.span.merge(self.previous_span());
        self.end_statement()?;

        Ok(Stmt::new(
            StmtKind::Rule(Rule {
                property,
                value,
                important,
            }),
            span,
        ))
    }

    /// Selector header, then a `{ ... }` body. Nested rulesets go to
    /// `children`; everything else stays in `rules` in source order.
    pub(crate) fn parse_ruleset(&mut self) -> Result<Ruleset, ParseError> {
        let start = self.current_span();
        let mut selectors = Vec::new();
        while !self.check(TokenKind::LeftBrace) {
            let kind = self.current_kind();
            if !kind.is_selector() && kind != TokenKind::Comma {
                return Err(self.unexpected("`{`"));
            }
            selectors.push(Selector::new(self.advance()?));
        }
        trace!(selectors = selectors.len(), "ruleset");

        let open = self.advance()?.span;
        let mut rules = Vec::new();
        let mut children = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(ParseError::Unclosed {
                    delimiter: "`{`",
                    span: open,
                });
            }
            match self.parse_statement()? {
                Some(Stmt {
                    kind: StmtKind::Ruleset(child),
                    ..
                }) => children.push(child),
                Some(stmt) => rules.push(stmt),
                None => {}
            }
        }
        self.advance()?;

        Ok(Ruleset {
            selectors,
            rules,
            children,
            span: start.merge(self.previous_span()),
        })
    }

    /// `@import "path";`
    fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance()?.span;
        let path = self.expect(TokenKind::String)?;
        let span = start.merge(path.span);
        self.end_statement()?;
        Ok(Stmt::new(
            StmtKind::Import(Import {
                path: unquote(&path.text).to_owned(),
            }),
            span,
        ))
    }

    /// `@mixin name[(params)] { body }`
    fn parse_mixin(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance()?.span;
        let name = self.parse_directive_name()?;

        let mut params = Vec::new();
        if self.check(TokenKind::LeftParen) {
            let open = self.advance()?.span;
            while !self.check(TokenKind::RightParen) && !self.is_at_end() {
                let param = self.expect(TokenKind::Identifier)?;
                params.push(qss_ir::Identifier::new(param.text, param.span));
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
            self.expect_close(TokenKind::RightParen, "`(`", open)?;
        }

        let body = self.parse_block()?;
        trace!(%name, params = params.len(), "mixin");
        let span = start.merge(body.span);
        Ok(Stmt::new(
            StmtKind::Mixin(Rc::new(Mixin { name, params, body })),
            span,
        ))
    }

    /// `@include name[(args)];`
    fn parse_include(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance()?.span;
        let mixin_name = self.parse_directive_name()?;

        let mut args = Vec::new();
        if self.check(TokenKind::LeftParen) {
            let open = self.advance()?.span;
            while !self.check(TokenKind::RightParen) && !self.is_at_end() {
                args.push(self.parse_expression(Precedence::Lowest)?);
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
            self.expect_close(TokenKind::RightParen, "`(`", open)?;
        }
        let span = start.merge(self.previous_span());
        self.end_statement()?;

        Ok(Stmt::new(StmtKind::Include(Include { mixin_name, args }), span))
    }

    /// `@extend <selector ...>;`
    fn parse_extend(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance()?.span;
        let mut target = Vec::new();
        while self.current_kind().is_selector() || self.check(TokenKind::String) {
            target.push(Selector::new(self.advance()?));
        }
        if target.is_empty() {
            return Err(self.unexpected("a selector"));
        }
        let span = start.merge(self.previous_span());
        self.end_statement()?;
        Ok(Stmt::new(StmtKind::Extend(Extend { target }), span))
    }

    /// `@if <expr> { ... } [@else { ... } | @else @if ...]`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance()?.span;
        let condition = self.parse_expression(Precedence::Lowest)?;
        let consequence = self.parse_block()?;

        let alternative = if self.eat(TokenKind::Else)? {
            if self.check(TokenKind::If) {
                let chained = self.parse_if()?;
                Some(Block {
                    span: chained.span,
                    statements: vec![chained],
                })
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(Stmt::new(
            StmtKind::If(IfStatement {
                condition,
                consequence,
                alternative,
            }),
            start.merge(self.previous_span()),
        ))
    }

    /// `{ statement* }` for mixin bodies and conditional branches.
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(TokenKind::LeftBrace)?.span;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(ParseError::Unclosed {
                    delimiter: "`{`",
                    span: open,
                });
            }
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
        }
        self.advance()?;
        Ok(Block {
            statements,
            span: open.merge(self.previous_span()),
        })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        let span = expr.span;
        self.end_statement()?;
        Ok(Stmt::new(StmtKind::Expression(expr), span))
    }

    /// Mixin names are bare words; depending on their shape the lexer hands
    /// them over as plain strings, colour names or type selectors.
    fn parse_directive_name(&mut self) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::String
            | TokenKind::Color
            | TokenKind::TypeSelector
            | TokenKind::Property => Ok(self.advance()?.text),
            _ => Err(self.unexpected("a mixin name")),
        }
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}
