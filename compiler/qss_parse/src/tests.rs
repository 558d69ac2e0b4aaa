use super::*;
use pretty_assertions::assert_eq;
use qss_ir::{Block, Expr, ExprKind, Ruleset, Stmt, StmtKind};
use qss_lexer::LexError;

/// Render an expression fully parenthesized.
fn show(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Identifier(id) => id.name.clone(),
        ExprKind::Number(n) => match &n.unit {
            Some(unit) => format!("{}{unit}", n.value),
            None => format!("{}", n.value),
        },
        ExprKind::String(s) | ExprKind::Color(s) => s.clone(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Prefix { op, right } => format!("({}{})", op.as_symbol(), show(right)),
        ExprKind::Infix { op, left, right } => {
            format!("({} {} {})", show(left), op.as_symbol(), show(right))
        }
        ExprKind::Selector(sel) => sel.token.text.clone(),
    }
}

fn statements(source: &str) -> Vec<Stmt> {
    parse(source).unwrap().statements
}

fn expression(source: &str) -> String {
    match &statements(source)[0].kind {
        StmtKind::Expression(expr) => show(expr),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn ruleset(stmt: &Stmt) -> &Ruleset {
    match &stmt.kind {
        StmtKind::Ruleset(ruleset) => ruleset,
        other => panic!("expected ruleset, got {other:?}"),
    }
}

fn selector_texts(ruleset: &Ruleset) -> Vec<&str> {
    ruleset
        .selectors
        .iter()
        .map(|sel| sel.token.text.as_str())
        .collect()
}

#[test]
fn product_binds_tighter_than_sum() {
    assert_eq!(expression("5+5*5;"), "(5 + (5 * 5))");
    assert_eq!(expression("2*(1+3);"), "(2 * (1 + 3))");
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(expression("10 - 2 - 3;"), "((10 - 2) - 3)");
    assert_eq!(expression("8 / 2 * 4"), "((8 / 2) * 4)");
}

#[test]
fn prefix_and_comparison_precedence() {
    assert_eq!(expression("-5 * 2;"), "((-5) * 2)");
    assert_eq!(expression("$a + 1 == 3 < 4;"), "(($a + 1) == (3 < 4))");
    assert_eq!(expression("$a != true;"), "($a != true)");
}

#[test]
fn variable_declaration() {
    let stmts = statements("$width: 20px;");
    let StmtKind::Var(var) = &stmts[0].kind else {
        panic!("expected variable declaration");
    };
    assert_eq!(var.name.name, "$width");
    assert_eq!(show(&var.value), "20px");
    assert!(!var.is_global);
    assert!(!var.is_default);
}

#[test]
fn variable_flags() {
    let stmts = statements("$a: 1 !default !global;");
    let StmtKind::Var(var) = &stmts[0].kind else {
        panic!("expected variable declaration");
    };
    assert!(var.is_global);
    assert!(var.is_default);
}

#[test]
fn trailing_semicolon_optional_at_end() {
    assert_eq!(statements("$a: 1").len(), 1);
    assert_eq!(statements(";;").len(), 0);
}

#[test]
fn nested_ruleset_goes_to_children() {
    let stmts = statements("QCheckBox{ &::indicator{ background-color: yellow; } }");
    assert_eq!(stmts.len(), 1);
    let outer = ruleset(&stmts[0]);
    assert_eq!(selector_texts(outer), vec!["QCheckBox"]);
    assert!(outer.rules.is_empty());

    let inner = &outer.children[0];
    assert_eq!(selector_texts(inner), vec!["&", "::indicator"]);
    let StmtKind::Rule(rule) = &inner.rules[0].kind else {
        panic!("expected rule");
    };
    assert_eq!(rule.property.text, "background-color");
    assert_eq!(rule.value.iter().map(show).collect::<Vec<_>>(), vec!["yellow"]);
}

#[test]
fn rule_value_list_and_important() {
    let stmts = statements("QLabel { border: 1px solid red !important; }");
    let StmtKind::Rule(rule) = &ruleset(&stmts[0]).rules[0].kind else {
        panic!("expected rule");
    };
    assert_eq!(
        rule.value.iter().map(show).collect::<Vec<_>>(),
        vec!["1px", "solid", "red"]
    );
    assert!(rule.important);
}

#[test]
fn selector_group() {
    let stmts = statements("QPushButton, QLabel > .warning { color: red; }");
    assert_eq!(
        selector_texts(ruleset(&stmts[0])),
        vec!["QPushButton", ",", "QLabel", ">", ".warning"]
    );
}

#[test]
fn comments_inside_selector_header() {
    let stmts = statements("QWidget /* c */ QLabel { w: 1; }");
    assert_eq!(
        selector_texts(ruleset(&stmts[0])),
        vec!["QWidget", " /* c */ ", "QLabel"]
    );

    for source in ["QWidget /* c */ { w: 1; }", "QWidget // c\n{ w: 1; }"] {
        let stmts = statements(source);
        let rs = ruleset(&stmts[0]);
        assert_eq!(selector_texts(rs), vec!["QWidget"]);
        assert_eq!(rs.rules.len(), 1);
    }
}

#[test]
fn vendor_prefixed_property() {
    let stmts = statements("QLabel { -qt-background-role: red; }");
    let StmtKind::Rule(rule) = &ruleset(&stmts[0]).rules[0].kind else {
        panic!("expected rule");
    };
    assert_eq!(rule.property.text, "-qt-background-role");
    assert_eq!(rule.value.iter().map(show).collect::<Vec<_>>(), vec!["red"]);
}

#[test]
fn mixin_definition() {
    let stmts = statements("@mixin error($a, $b){width:$a;}");
    let StmtKind::Mixin(mixin) = &stmts[0].kind else {
        panic!("expected mixin");
    };
    assert_eq!(mixin.name, "error");
    let params: Vec<_> = mixin.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["$a", "$b"]);
    assert_eq!(mixin.body.statements.len(), 1);
}

#[test]
fn include_inside_ruleset() {
    let stmts = statements("QPushButton{@include error(5)}");
    let outer = ruleset(&stmts[0]);
    let StmtKind::Include(include) = &outer.rules[0].kind else {
        panic!("expected include");
    };
    assert_eq!(include.mixin_name, "error");
    assert_eq!(include.args.iter().map(show).collect::<Vec<_>>(), vec!["5"]);
}

#[test]
fn include_without_arguments() {
    let stmts = statements("@mixin m(){ $a: 2; } @include m();");
    assert_eq!(stmts.len(), 2);
    let StmtKind::Include(include) = &stmts[1].kind else {
        panic!("expected include");
    };
    assert!(include.args.is_empty());
}

#[test]
fn import_strips_quotes() {
    let stmts = statements("@import \"theme/base\";");
    let StmtKind::Import(import) = &stmts[0].kind else {
        panic!("expected import");
    };
    assert_eq!(import.path, "theme/base");
}

#[test]
fn extend_records_target() {
    let stmts = statements("@extend .warning;");
    let StmtKind::Extend(extend) = &stmts[0].kind else {
        panic!("expected extend");
    };
    assert_eq!(extend.target[0].token.text, ".warning");
}

#[test]
fn if_else_chain() {
    let stmts =
        statements("@if $a > 5 { $b: 1; } @else @if $a < 0 { $b: 2; } @else { $b: 3; }");
    assert_eq!(stmts.len(), 1);
    let StmtKind::If(outer) = &stmts[0].kind else {
        panic!("expected if");
    };
    assert_eq!(show(&outer.condition), "($a > 5)");
    let Some(Block { statements: alt, .. }) = &outer.alternative else {
        panic!("expected else branch");
    };
    let StmtKind::If(inner) = &alt[0].kind else {
        panic!("expected chained if");
    };
    assert_eq!(show(&inner.condition), "($a < 0)");
    assert!(inner.alternative.is_some());
}

#[test]
fn keyword_alias() {
    let keywords = qss_lexer::Keywords::new().with_alias("@use", TokenKind::Import);
    let sheet = parse_with_keywords("@use \"base\";", keywords).unwrap();
    assert!(matches!(sheet.statements[0].kind, StmtKind::Import(_)));
}

#[test]
fn unclosed_brace() {
    let err = parse("QLabel { color: red;").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unclosed {
            delimiter: "`{`",
            span: Span::new(7, 8),
        }
    );
}

#[test]
fn unclosed_paren() {
    let err = parse("(1 + 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unclosed {
            delimiter: "`(`",
            span: Span::new(0, 1),
        }
    );
}

#[test]
fn missing_expression() {
    let err = parse("$a: ;").unwrap_err();
    assert_eq!(
        err,
        ParseError::ExpectedExpression {
            found: TokenKind::Semicolon,
            span: Span::new(4, 5),
        }
    );
}

#[test]
fn missing_semicolon() {
    let err = parse("$a: 1 $b: 2;").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unexpected {
            expected: "`;`",
            found: TokenKind::Identifier,
            span: Span::new(6, 8),
        }
    );
}

#[test]
fn lex_error_propagates() {
    let err = parse("~").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lex(LexError::TokenUnknown {
            lexeme: "~".to_owned(),
            span: Span::new(0, 1),
        })
    );
}
