//! Debug commands: `lex` and `parse` for inspecting compiler internals.

use std::fmt::Write;

use qss_ir::{Ruleset, Stmt, StmtKind};
use qss_lexer::Lexer;

use super::{read_file, report};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let toks = match Lexer::new(&content).tokenize() {
        Ok(toks) => toks,
        Err(err) => report(path, &content, &err.to_diagnostic()),
    };

    println!("Tokens for '{}' ({} tokens):", path, toks.len());
    for tok in &toks {
        println!("  {tok:?}");
    }
}

/// Parse a file and display a statement outline.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let sheet = match qss_parse::parse(&content) {
        Ok(sheet) => sheet,
        Err(err) => report(path, &content, &err.to_diagnostic()),
    };

    println!("Parse result for '{path}':");
    println!("  Statements: {}", sheet.statements.len());
    println!();
    let mut outline = String::new();
    for stmt in &sheet.statements {
        outline_stmt(&mut outline, stmt, 1);
    }
    print!("{outline}");
}

fn outline_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = match &stmt.kind {
        StmtKind::Var(var) => writeln!(
            out,
            "{indent}var {}{}{} @ {}",
            var.name.name,
            if var.is_global { " !global" } else { "" },
            if var.is_default { " !default" } else { "" },
            stmt.span
        ),
        StmtKind::Rule(rule) => writeln!(
            out,
            "{indent}rule {} ({} values) @ {}",
            rule.property.text,
            rule.value.len(),
            stmt.span
        ),
        StmtKind::Ruleset(ruleset) => {
            outline_ruleset(out, ruleset, depth);
            return;
        }
        StmtKind::Mixin(mixin) => {
            let params: Vec<&str> = mixin.params.iter().map(|p| p.name.as_str()).collect();
            let _ = writeln!(
                out,
                "{indent}@mixin {}({}) @ {}",
                mixin.name,
                params.join(", "),
                stmt.span
            );
            for inner in &mixin.body.statements {
                outline_stmt(out, inner, depth + 1);
            }
            return;
        }
        StmtKind::Include(include) => writeln!(
            out,
            "{indent}@include {} ({} args) @ {}",
            include.mixin_name,
            include.args.len(),
            stmt.span
        ),
        StmtKind::Import(import) => {
            writeln!(out, "{indent}@import {:?} @ {}", import.path, stmt.span)
        }
        StmtKind::Extend(extend) => {
            let target: String = extend.target.iter().map(|s| s.token.text.as_str()).collect();
            writeln!(out, "{indent}@extend {target} @ {}", stmt.span)
        }
        StmtKind::If(if_stmt) => {
            let _ = writeln!(out, "{indent}@if @ {}", stmt.span);
            for inner in &if_stmt.consequence.statements {
                outline_stmt(out, inner, depth + 1);
            }
            if let Some(alternative) = &if_stmt.alternative {
                let _ = writeln!(out, "{indent}@else");
                for inner in &alternative.statements {
                    outline_stmt(out, inner, depth + 1);
                }
            }
            return;
        }
        StmtKind::Expression(_) => writeln!(out, "{indent}expression @ {}", stmt.span),
    };
}

fn outline_ruleset(out: &mut String, ruleset: &Ruleset, depth: usize) {
    let indent = "  ".repeat(depth);
    let header: String = ruleset
        .selectors
        .iter()
        .map(|s| s.token.text.as_str())
        .collect();
    let _ = writeln!(out, "{indent}ruleset `{}` @ {}", header.trim(), ruleset.span);
    for inner in &ruleset.rules {
        outline_stmt(out, inner, depth + 1);
    }
    for child in &ruleset.children {
        outline_ruleset(out, child, depth + 1);
    }
}
