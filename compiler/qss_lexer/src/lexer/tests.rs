#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use TokenKind::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|tok| tok.kind)
        .collect()
}

fn texts(source: &str) -> Vec<std::string::String> {
    Lexer::new(source)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|tok| tok.text)
        .collect()
}

#[test]
fn arithmetic_assignment() {
    assert_eq!(
        kinds("$a: 5+5*5;"),
        vec![Identifier, Assign, Number, Plus, Number, Mul, Number, Semicolon, Eof]
    );
}

#[test]
fn descendant_combinator_keeps_whitespace() {
    assert_eq!(
        kinds("QWidget QPushButton {"),
        vec![TypeSelector, GeneralSelector, TypeSelector, LeftBrace, Eof]
    );
    assert_eq!(texts("QWidget \n QLabel{"), vec!["QWidget", " \n ", "QLabel", "{", ""]);
}

#[test]
fn comments_in_selector_header_are_trivia() {
    assert_eq!(
        kinds("QWidget /* c */ QLabel { w: 1; }"),
        vec![
            TypeSelector, GeneralSelector, TypeSelector, LeftBrace, Property, Assign, Number,
            Semicolon, RightBrace, Eof
        ]
    );
    assert_eq!(texts("QWidget/**/QLabel{")[1], "/**/");
    assert_eq!(
        kinds("QWidget /* c */ { w: 1; }"),
        vec![TypeSelector, LeftBrace, Property, Assign, Number, Semicolon, RightBrace, Eof]
    );
    assert_eq!(
        kinds("QWidget // c\n{ w: 1; }"),
        vec![TypeSelector, LeftBrace, Property, Assign, Number, Semicolon, RightBrace, Eof]
    );
}

#[test]
fn leading_dash_property() {
    assert_eq!(
        texts("QLabel { -qt-background-role: red; }"),
        vec!["QLabel", "{", "-qt-background-role", ":", "red", ";", "}", ""]
    );
    assert_eq!(kinds("QLabel { -qt-background-role: red; }")[2], Property);
    assert_eq!(kinds("-x;"), vec![Sub, String, Semicolon, Eof]);
    assert_eq!(kinds("$a: -b;"), vec![Identifier, Assign, Sub, String, Semicolon, Eof]);
}

#[test]
fn nested_subcontrol_with_parent_reference() {
    assert_eq!(
        kinds("QCheckBox{ &::indicator{ background-color: yellow; } }"),
        vec![
            TypeSelector,
            LeftBrace,
            ParentReference,
            SubwidgetSelector,
            LeftBrace,
            Property,
            Assign,
            Color,
            Semicolon,
            RightBrace,
            RightBrace,
            Eof,
        ]
    );
    assert_eq!(texts("a{&::indicator{}}")[3], "::indicator");
}

#[test]
fn selector_list_with_child_combinator() {
    let source = "QPushButton:hover, QLabel > .warning {";
    assert_eq!(
        kinds(source),
        vec![ProdoSelector, Comma, TypeSelector, ChildSelector, ClassSelector, LeftBrace, Eof]
    );
    assert_eq!(texts(source)[0], "QPushButton:hover");
}

#[test]
fn attribute_selector_with_quoted_value() {
    let source = r#"QPushButton[flat="false"] {"#;
    assert_eq!(kinds(source), vec![PropertySelector, LeftBrace, Eof]);
    assert_eq!(texts(source)[0], r#"QPushButton[flat="false"]"#);
}

#[test]
fn universal_selector() {
    assert_eq!(kinds("* { }"), vec![TypeSelector, LeftBrace, RightBrace, Eof]);
    assert_eq!(kinds("2 * 3"), vec![Number, Mul, Number, Eof]);
}

#[test]
fn declaration_words() {
    assert_eq!(
        kinds("color: #ff0000; background: red; border: solid;"),
        vec![
            Property, Assign, Color, Semicolon, Property, Assign, Color, Semicolon, Property,
            Assign, String, Semicolon, Eof,
        ]
    );
}

#[test]
fn number_units() {
    assert_eq!(texts("20px 1.5em 50% 3"), vec!["20px", "1.5em", "50%", "3", ""]);
}

#[test]
fn comparison_operators() {
    assert_eq!(
        kinds("@if $a > 5 { }"),
        vec![If, Identifier, Gt, Number, LeftBrace, RightBrace, Eof]
    );
    assert_eq!(
        kinds("$a == 1 != 2 < 3"),
        vec![Identifier, Eq, Number, NotEq, Number, Lt, Number, Eof]
    );
}

#[test]
fn booleans_and_quoted_strings() {
    assert_eq!(
        kinds("$flag: true; $s: 'it''s';"),
        vec![
            Identifier, Assign, True, Semicolon, Identifier, Assign, String, String, Semicolon,
            Eof,
        ]
    );
    assert_eq!(texts("\"a b\"")[0], "\"a b\"");
}

#[test]
fn hyphenated_identifier() {
    assert_eq!(texts("$main-color"), vec!["$main-color", ""]);
    assert_eq!(kinds("$a-5"), vec![Identifier, Sub, Number, Eof]);
}

#[test]
fn comments_are_trivia() {
    assert_eq!(
        kinds("// line\n$a /* block */ : 1; /* trailing"),
        vec![Identifier, Assign, Number, Semicolon, Eof]
    );
}

#[test]
fn mixin_and_include() {
    assert_eq!(
        kinds("@mixin error($a){width:$a;} QPushButton{@include error(5)}"),
        vec![
            Mixin,
            String,
            LeftParen,
            Identifier,
            RightParen,
            LeftBrace,
            Property,
            Assign,
            Identifier,
            Semicolon,
            RightBrace,
            TypeSelector,
            LeftBrace,
            Include,
            String,
            LeftParen,
            Number,
            RightParen,
            RightBrace,
            Eof,
        ]
    );
}

#[test]
fn unknown_character() {
    let err = Lexer::new("$a: 1 ~ 2;").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::TokenUnknown {
            lexeme: "~".to_owned(),
            span: Span::new(6, 7),
        }
    );
}

#[test]
fn unknown_directive() {
    let err = Lexer::new("@media screen").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::TokenUnknown {
            lexeme: "@media".to_owned(),
            span: Span::new(0, 6),
        }
    );
}

#[test]
fn unterminated_string() {
    let err = Lexer::new("\"abc").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::Unterminated {
            what: "string",
            span: Span::new(0, 4),
        }
    );
}

#[test]
fn keyword_alias() {
    let keywords = Keywords::new().with_alias("@use", TokenKind::Import);
    let tokens = Lexer::with_keywords("@use \"base\";", keywords)
        .tokenize()
        .unwrap();
    let kinds: Vec<_> = tokens.iter().map(|tok| tok.kind).collect();
    assert_eq!(kinds, vec![Import, String, Semicolon, Eof]);
}

#[test]
fn eof_repeats_and_is_end() {
    let mut lexer = Lexer::new("a /* only trivia left */ ");
    assert!(!lexer.is_end());
    lexer.next_token().unwrap();
    assert!(lexer.is_end());
    assert_eq!(lexer.next_token().unwrap().kind, Eof);
    assert_eq!(lexer.next_token().unwrap().kind, Eof);
}

#[test]
fn token_spans() {
    let tokens = Lexer::new("$a: 20px;").tokenize().unwrap();
    let spans: Vec<_> = tokens.iter().map(|tok| tok.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 2),
            Span::new(2, 3),
            Span::new(4, 8),
            Span::new(8, 9),
            Span::new(9, 9),
        ]
    );
}

#[test]
fn scan_stops_at_statement_end() {
    assert!(selector_context_ahead("QLabel > #ok:hover {"));
    assert!(selector_context_ahead("a[x=\"{\"] {"));
    assert!(!selector_context_ahead("width: 5;"));
    assert!(!selector_context_ahead("red }"));
    assert!(!selector_context_ahead("QLabel"));
    assert!(selector_context_ahead("QLabel /* } */ {"));
    assert!(!selector_context_ahead("QLabel / 2 {"));
}
