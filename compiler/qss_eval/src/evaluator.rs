//! Tree-walking evaluator.
//!
//! Walks the statements of a [`StyleSheet`] against an [`Environment`] and
//! produces flat output blocks, one `selector{property:value;...}` per
//! ruleset. Nesting exists only in the source: a nested ruleset is emitted
//! as its own block right after its parent's.
//!
//! Evaluation threads the composed selector list of the innermost enclosing
//! ruleset (`None` at the top level) and an [`Output`] sink. Declarations
//! land in the sink of the ruleset that is currently open, which is how a
//! mixin's rules end up inside the ruleset that includes it.

use std::mem;
use std::rc::Rc;

use qss_ir::{
    Block, Expr, ExprKind, IfStatement, Import, Include, Rule, Ruleset, Span, Stmt, StmtKind,
    StyleSheet, VarStatement,
};
use qss_lexer::Keywords;
use tracing::{debug, trace};

use crate::environment::{Environment, LocalScope, Scope};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::selector::compose;
use crate::stack::ensure_sufficient_stack;
use crate::{EvalError, ImportLoader, Value};

/// Text produced while evaluating statements under one selector context.
#[derive(Debug, Default)]
struct Output {
    /// `property:value;` entries for the open ruleset.
    declarations: Vec<String>,
    /// Finished blocks, in emission order.
    blocks: Vec<String>,
}

impl Output {
    fn append(&mut self, mut other: Output) {
        self.declarations.append(&mut other.declarations);
        self.blocks.append(&mut other.blocks);
    }
}

/// Evaluator for one compilation unit and the files it imports.
pub struct Evaluator<'l> {
    env: Environment,
    loader: &'l dyn ImportLoader,
    /// Keyword table used to parse imported files.
    keywords: Keywords,
    /// Paths of imports currently being evaluated, outermost first.
    import_stack: Vec<String>,
    /// Top-level blocks not yet taken by the caller.
    blocks: Vec<String>,
}

impl<'l> Evaluator<'l> {
    pub fn new(loader: &'l dyn ImportLoader) -> Self {
        Evaluator {
            env: Environment::new(),
            loader,
            keywords: Keywords::new(),
            import_stack: Vec::new(),
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Global scope; stays valid after evaluation for inspecting variables.
    pub fn global(&self) -> LocalScope<Scope> {
        self.env.global()
    }

    /// Evaluate every statement and return the output text, top-level
    /// blocks separated by newlines.
    ///
    /// On failure every queued block is discarded, so a later call starts
    /// from empty output.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = sheet.statements.len()))]
    pub fn evaluate_program(&mut self, sheet: &StyleSheet) -> Result<String, EvalError> {
        for stmt in &sheet.statements {
            if let Err(err) = self.evaluate_statement(stmt) {
                self.blocks.clear();
                return Err(err);
            }
        }
        Ok(self.take_output())
    }

    /// Evaluate one top-level statement. Expression statements yield their
    /// value; everything else yields [`Value::Unit`] and queues its blocks
    /// for [`take_output`](Self::take_output). A failing statement queues
    /// nothing.
    pub fn evaluate_statement(&mut self, stmt: &Stmt) -> Result<Value, EvalError> {
        let mut out = Output::default();
        let value = self.exec(stmt, None, &mut out)?;
        self.blocks.append(&mut out.blocks);
        Ok(value)
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, EvalError> {
        self.eval_expr(expr)
    }

    /// Drain the queued top-level blocks.
    pub fn take_output(&mut self) -> String {
        let text = self.blocks.join("\n");
        self.blocks.clear();
        text
    }

    fn exec(
        &mut self,
        stmt: &Stmt,
        selectors: Option<&[String]>,
        out: &mut Output,
    ) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.exec_inner(stmt, selectors, out))
    }

    fn exec_inner(
        &mut self,
        stmt: &Stmt,
        selectors: Option<&[String]>,
        out: &mut Output,
    ) -> Result<Value, EvalError> {
        match &stmt.kind {
            StmtKind::Var(var) => self.exec_var(var)?,
            StmtKind::Ruleset(ruleset) => self.exec_ruleset(ruleset, selectors, out)?,
            StmtKind::Rule(rule) => {
                if selectors.is_none() {
                    return Err(EvalError::DeclarationOutsideRuleset { span: stmt.span });
                }
                let declaration = self.render_rule(rule)?;
                out.declarations.push(declaration);
            }
            StmtKind::Mixin(mixin) => self.env.define_mixin(Rc::clone(mixin)),
            StmtKind::Include(include) => {
                let expanded = self.expand_include(include, stmt.span, selectors)?;
                out.append(expanded);
            }
            StmtKind::Import(import) => {
                let imported = self.exec_import(import, stmt.span, selectors)?;
                out.append(imported);
            }
            StmtKind::Extend(extend) => {
                trace!(targets = extend.target.len(), "@extend has no effect");
            }
            StmtKind::If(if_stmt) => self.exec_if(if_stmt, selectors, out)?,
            StmtKind::Expression(expr) => return self.eval_expr(expr),
        }
        Ok(Value::Unit)
    }

    fn exec_statements(
        &mut self,
        statements: &[Stmt],
        selectors: Option<&[String]>,
        out: &mut Output,
    ) -> Result<(), EvalError> {
        for stmt in statements {
            self.exec(stmt, selectors, out)?;
        }
        Ok(())
    }

    fn exec_var(&mut self, var: &VarStatement) -> Result<(), EvalError> {
        let name = var.name.name.as_str();
        if var.is_default {
            let bound = if var.is_global {
                self.env.lookup_global(name)
            } else {
                self.env.lookup(name)
            };
            if bound.is_some() {
                return Ok(());
            }
        }

        let value = self.eval_expr(&var.value)?;
        trace!(name, %value, global = var.is_global, "assign");
        if var.is_global {
            self.env.define_global(name, value);
        } else {
            self.env.define(name, value);
        }
        Ok(())
    }

    fn render_rule(&self, rule: &Rule) -> Result<String, EvalError> {
        let mut values = Vec::with_capacity(rule.value.len());
        for expr in &rule.value {
            values.push(self.eval_expr(expr)?.to_string());
        }
        let mut text = format!("{}:{}", rule.property.text, values.join(" "));
        if rule.important {
            text.push_str(" !important");
        }
        text.push(';');
        Ok(text)
    }

    fn exec_ruleset(
        &mut self,
        ruleset: &Ruleset,
        parents: Option<&[String]>,
        out: &mut Output,
    ) -> Result<(), EvalError> {
        let selectors = compose(parents, &ruleset.selectors, ruleset.span)?;
        trace!(selector = %selectors.join(", "), "ruleset");

        let mut body = Output::default();
        self.env.push_scope();
        let result = self.exec_ruleset_body(ruleset, &selectors, &mut body);
        self.env.pop_scope();
        result?;

        out.blocks.push(format!(
            "{}{{{}}}",
            selectors.join(", "),
            body.declarations.concat()
        ));
        out.blocks.append(&mut body.blocks);
        Ok(())
    }

    fn exec_ruleset_body(
        &mut self,
        ruleset: &Ruleset,
        selectors: &[String],
        body: &mut Output,
    ) -> Result<(), EvalError> {
        self.exec_statements(&ruleset.rules, Some(selectors), body)?;
        for child in &ruleset.children {
            self.exec_ruleset(child, Some(selectors), body)?;
        }
        Ok(())
    }

    /// Expand a mixin into the output it contributes at the include site.
    ///
    /// Arguments are evaluated in the caller's scope; the body runs in a
    /// child of the scope the mixin was declared in.
    #[tracing::instrument(level = "debug", skip_all, fields(mixin = %include.mixin_name))]
    fn expand_include(
        &mut self,
        include: &Include,
        span: Span,
        selectors: Option<&[String]>,
    ) -> Result<Output, EvalError> {
        let undefined = || EvalError::UndefinedMixin {
            name: include.mixin_name.clone(),
            span,
        };
        let binding = self
            .env
            .lookup_mixin(&include.mixin_name)
            .ok_or_else(undefined)?;
        let scope = binding.scope().ok_or_else(undefined)?;
        let mixin = binding.mixin;

        if include.args.len() < mixin.params.len() {
            return Err(EvalError::ArityMismatch {
                name: include.mixin_name.clone(),
                expected: mixin.params.len(),
                got: include.args.len(),
                span,
            });
        }
        let mut args = Vec::with_capacity(include.args.len());
        for arg in &include.args {
            args.push(self.eval_expr(arg)?);
        }

        let mut expanded = Output::default();
        self.env.push_scope_in(scope);
        for (param, value) in mixin.params.iter().zip(args) {
            self.env.define(param.name.as_str(), value);
        }
        let result = self.exec_block(&mixin.body, selectors, &mut expanded);
        self.env.pop_scope();
        result?;
        Ok(expanded)
    }

    fn exec_if(
        &mut self,
        if_stmt: &IfStatement,
        selectors: Option<&[String]>,
        out: &mut Output,
    ) -> Result<(), EvalError> {
        let branch = match self.eval_expr(&if_stmt.condition)? {
            Value::Bool(true) => Some(&if_stmt.consequence),
            Value::Bool(false) => if_stmt.alternative.as_ref(),
            other => {
                return Err(EvalError::TypeMismatch {
                    op: "@if",
                    operands: other.type_name().to_owned(),
                    span: if_stmt.condition.span,
                })
            }
        };
        let Some(block) = branch else {
            return Ok(());
        };

        self.env.push_scope();
        let result = self.exec_block(block, selectors, out);
        self.env.pop_scope();
        result
    }

    fn exec_block(
        &mut self,
        block: &Block,
        selectors: Option<&[String]>,
        out: &mut Output,
    ) -> Result<(), EvalError> {
        self.exec_statements(&block.statements, selectors, out)
    }

    /// Load, parse and evaluate an imported file.
    ///
    /// The imported statements run in a fresh environment sharing the
    /// global scope, so its top-level variables and mixins stay visible to
    /// the importer. Errors raised inside are wrapped with the import's
    /// span.
    #[tracing::instrument(level = "debug", skip_all, fields(path = %import.path))]
    fn exec_import(
        &mut self,
        import: &Import,
        span: Span,
        selectors: Option<&[String]>,
    ) -> Result<Output, EvalError> {
        let path = import.path.as_str();
        if self.import_stack.iter().any(|active| active == path) {
            return Err(EvalError::ImportCycle {
                path: path.to_owned(),
                span,
            });
        }

        let source = self
            .loader
            .load(path)
            .map_err(|source| EvalError::Load { source, span })?;
        debug!(bytes = source.len(), "loaded import");
        let sheet = qss_parse::parse_with_keywords(&source, self.keywords.clone()).map_err(
            |source| EvalError::Parse {
                path: path.to_owned(),
                source,
                span,
            },
        )?;

        let mut imported = Output::default();
        let child = self.env.child();
        let importer = mem::replace(&mut self.env, child);
        self.import_stack.push(path.to_owned());
        let result = self.exec_statements(&sheet.statements, selectors, &mut imported);
        self.import_stack.pop();
        self.env = importer;

        result.map_err(|source| EvalError::InImport {
            path: path.to_owned(),
            source: Box::new(source),
            span,
        })?;
        Ok(imported)
    }

    fn eval_expr(&self, expr: &Expr) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&self, expr: &Expr) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Identifier(id) => {
                self.env
                    .lookup(&id.name)
                    .ok_or_else(|| EvalError::UndefinedVariable {
                        name: id.name.clone(),
                        span: id.span,
                    })
            }
            ExprKind::Number(number) => Ok(match &number.unit {
                Some(unit) => Value::Dimension {
                    value: number.value,
                    unit: unit.clone(),
                },
                None => Value::Number(number.value),
            }),
            ExprKind::String(text) => Ok(Value::Text(text.clone())),
            ExprKind::Color(color) => Ok(Value::Color(color.clone())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Prefix { op, right } => {
                let operand = self.eval_expr(right)?;
                evaluate_unary(*op, operand, expr.span)
            }
            ExprKind::Infix { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(*op, &left, &right, expr.span)
            }
            ExprKind::Selector(selector) => Ok(Value::Text(selector.token.text.clone())),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
