use super::*;
use crate::MemoryLoader;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn compile_with(loader: &MemoryLoader, source: &str) -> Result<String, EvalError> {
    let sheet = qss_parse::parse(source).unwrap();
    Evaluator::new(loader).evaluate_program(&sheet)
}

fn compile(source: &str) -> Result<String, EvalError> {
    compile_with(&MemoryLoader::new(), source)
}

/// Evaluate `source` and return the global binding of `name`.
fn global_after(source: &str, name: &str) -> Option<Value> {
    let sheet = qss_parse::parse(source).unwrap();
    let loader = MemoryLoader::new();
    let mut evaluator = Evaluator::new(&loader);
    evaluator.evaluate_program(&sheet).unwrap();
    evaluator.environment().lookup_global(name)
}

fn first_statement_value(source: &str) -> Value {
    let sheet = qss_parse::parse(source).unwrap();
    let loader = MemoryLoader::new();
    let mut evaluator = Evaluator::new(&loader);
    evaluator.evaluate_statement(&sheet.statements[0]).unwrap()
}

#[test]
fn test_expression_precedence() {
    assert_eq!(first_statement_value("5+5*5;"), Value::Number(30.0));
    assert_eq!(first_statement_value("2*(1+3);"), Value::Number(8.0));
    assert_eq!(first_statement_value("-2 + 10 / 4;"), Value::Number(0.5));
}

#[test]
fn test_variable_in_declaration() {
    assert_eq!(
        compile("$w: 20px; QLabel { min-width: $w * 2; }").unwrap(),
        "QLabel{min-width:40.0px;}"
    );
}

#[test]
fn test_value_list_and_important() {
    assert_eq!(
        compile("QLabel { border: 1px solid red !important; }").unwrap(),
        "QLabel{border:1.0px solid red !important;}"
    );
}

#[test]
fn test_top_level_blocks_joined_by_newline() {
    assert_eq!(
        compile("QLabel{color:red;} QFrame{color:blue;}").unwrap(),
        "QLabel{color:red;}\nQFrame{color:blue;}"
    );
}

#[test]
fn test_parent_reference_flattens() {
    assert_eq!(
        compile("QCheckBox{ &::indicator{ background-color: yellow; } }").unwrap(),
        "QCheckBox{}\nQCheckBox::indicator{background-color:yellow;}"
    );
}

#[test]
fn test_nested_ruleset_is_descendant() {
    assert_eq!(
        compile("QFrame { QLabel { color: red; } }").unwrap(),
        "QFrame{}\nQFrame QLabel{color:red;}"
    );
}

#[test]
fn test_selector_groups_compose_with_each_parent() {
    assert_eq!(
        compile("QPushButton, QToolButton { &:hover { color: red; } }").unwrap(),
        "QPushButton, QToolButton{}\nQPushButton:hover, QToolButton:hover{color:red;}"
    );
}

#[test]
fn test_mixin_splices_into_ruleset() {
    assert_eq!(
        compile("@mixin error($a){width:$a;} QPushButton{@include error(5)}").unwrap(),
        "QPushButton{width:5.0;}"
    );
}

#[test]
fn test_mixin_args_use_caller_scope() {
    assert_eq!(
        compile("@mixin m($v){ width: $v; } QLabel{ $w: 3; @include m($w * 2); }").unwrap(),
        "QLabel{width:6.0;}"
    );
}

#[test]
fn test_mixin_body_sees_declaring_scope() {
    assert_eq!(
        compile("$c: red; @mixin m(){ color: $c; } QLabel{ $c: blue; @include m(); }").unwrap(),
        "QLabel{color:red;}"
    );
}

#[test]
fn test_local_assignment_does_not_leak() {
    let source = "$a: 1; @mixin m(){ $a: 2; } @include m();";
    assert_eq!(global_after(source, "$a"), Some(Value::Number(1.0)));
}

#[test]
fn test_global_flag_writes_global_scope() {
    let source = "$a: 1; @mixin m(){ $a: 2 !global; } @include m();";
    assert_eq!(global_after(source, "$a"), Some(Value::Number(2.0)));
}

#[test]
fn test_default_flag_keeps_existing_binding() {
    let source = "$a: 1; $a: 2 !default; $b: 3 !default;";
    assert_eq!(global_after(source, "$a"), Some(Value::Number(1.0)));
    assert_eq!(global_after(source, "$b"), Some(Value::Number(3.0)));
}

#[test]
fn test_if_else_selects_branch() {
    let source = "$dark: true; QLabel { @if $dark { color: white; } @else { color: black; } }";
    assert_eq!(compile(source).unwrap(), "QLabel{color:white;}");

    let source = "$dark: false; QLabel { @if $dark { color: white; } @else { color: black; } }";
    assert_eq!(compile(source).unwrap(), "QLabel{color:black;}");
}

#[test]
fn test_if_condition_must_be_boolean() {
    let err = compile("@if 1 { }").unwrap_err();
    assert!(matches!(err, EvalError::TypeMismatch { op: "@if", .. }));
}

#[test]
fn test_import_shares_globals_and_mixins() {
    let loader = MemoryLoader::new().with_file(
        "base",
        "$accent: #ff0000; @mixin warn(){ color: $accent; }",
    );
    assert_eq!(
        compile_with(&loader, "@import \"base\"; QLabel { @include warn(); }").unwrap(),
        "QLabel{color:#ff0000;}"
    );
}

#[test]
fn test_empty_import_is_noop() {
    let loader = MemoryLoader::new().with_file("empty", "");
    let plain = compile_with(&loader, "QLabel{color:red;}").unwrap();
    let imported = compile_with(&loader, "@import \"empty\"; QLabel{color:red;}").unwrap();
    assert_eq!(plain, imported);
}

#[test]
fn test_import_inside_ruleset_nests() {
    let loader = MemoryLoader::new().with_file("part", "&:hover { color: red; }");
    assert_eq!(
        compile_with(&loader, "QLabel { @import \"part\"; }").unwrap(),
        "QLabel{}\nQLabel:hover{color:red;}"
    );
}

#[test]
fn test_import_cycle_is_reported() {
    let loader = MemoryLoader::new()
        .with_file("a", "@import \"b\";")
        .with_file("b", "@import \"a\";");
    let err = compile_with(&loader, "@import \"a\";").unwrap_err();
    assert!(matches!(err, EvalError::InImport { .. }));
    assert!(matches!(
        err.root_cause(),
        EvalError::ImportCycle { path, .. } if path == "a"
    ));
}

#[test]
fn test_missing_import() {
    let err = compile("@import \"nowhere\";").unwrap_err();
    assert!(matches!(err, EvalError::Load { .. }));
    assert_eq!(err.span(), Span::new(0, 17));
}

#[test]
fn test_undefined_variable() {
    let err = compile("$x: $missing;").unwrap_err();
    assert!(matches!(
        err,
        EvalError::UndefinedVariable { ref name, .. } if name == "$missing"
    ));
    assert_eq!(err.span(), Span::new(4, 12));
}

#[test]
fn test_undefined_mixin() {
    let err = compile("QLabel { @include nope; }").unwrap_err();
    assert!(matches!(err, EvalError::UndefinedMixin { ref name, .. } if name == "nope"));
}

#[test]
fn test_arity_mismatch() {
    let err = compile("@mixin m($a){} QLabel{@include m();}").unwrap_err();
    assert!(matches!(
        err,
        EvalError::ArityMismatch {
            expected: 1,
            got: 0,
            ..
        }
    ));
}

#[test]
fn test_division_by_zero() {
    let err = compile("$x: 1 / 0;").unwrap_err();
    assert!(matches!(err, EvalError::DivisionByZero { .. }));
}

#[test]
fn test_parent_reference_at_top_level() {
    let err = compile("&:hover { color: red; }").unwrap_err();
    assert!(matches!(err, EvalError::ParentReferenceOutsideRuleset { .. }));
}

#[test]
fn test_declaration_outside_ruleset() {
    let err = compile("@mixin m(){ width: 1; } @include m();").unwrap_err();
    assert!(matches!(err, EvalError::DeclarationOutsideRuleset { .. }));
}

#[test]
fn test_failed_ruleset_restores_scope() {
    let sheet = qss_parse::parse("QLabel { $x: 1; color: $missing; }").unwrap();
    let loader = MemoryLoader::new();
    let mut evaluator = Evaluator::new(&loader);
    assert!(evaluator.evaluate_program(&sheet).is_err());
    assert_eq!(evaluator.environment().depth(), 1);
    assert_eq!(evaluator.environment().lookup("$x"), None);
}

#[test]
fn test_failed_program_discards_partial_output() {
    let loader = MemoryLoader::new();
    let mut evaluator = Evaluator::new(&loader);

    let failing = qss_parse::parse("QLabel{width:1;} QFrame{width:$missing;}").unwrap();
    assert!(evaluator.evaluate_program(&failing).is_err());
    assert_eq!(evaluator.take_output(), "");

    let next = qss_parse::parse("QSlider{width:2;}").unwrap();
    assert_eq!(
        evaluator.evaluate_program(&next).unwrap(),
        "QSlider{width:2.0;}"
    );
}

proptest! {
    #[test]
    fn integer_assignment_renders_one_decimal(n in 0u32..1_000_000) {
        let value = global_after(&format!("$x: {n};"), "$x").unwrap();
        prop_assert_eq!(value.to_string(), format!("{n}.0"));
    }

    #[test]
    fn tenths_render_exactly(whole in 0u32..10_000, tenth in 0u32..10) {
        let value = global_after(&format!("$x: {whole}.{tenth};"), "$x").unwrap();
        prop_assert_eq!(value.to_string(), format!("{whole}.{tenth}"));
    }
}
