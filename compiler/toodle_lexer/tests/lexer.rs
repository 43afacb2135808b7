use pretty_assertions::assert_eq;
use toodle_lexer::{lex, LineTable, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.iter().map(|t| t.kind).collect()
}

fn texts(source: &str) -> Vec<&str> {
    lex(source).tokens.iter().map(|t| t.text(source)).collect()
}

#[test]
fn definition_with_annotations() {
    use TokenKind::*;
    assert_eq!(
        kinds("key id: int size(10, \"x\") { }"),
        vec![Ident, Ident, Colon, Ident, Ident, LParen, Number, Comma, String, RParen, LBrace, RBrace, Eof]
    );
}

#[test]
fn keywords_and_variables() {
    use TokenKind::*;
    assert_eq!(
        kinds("alias id = int\nlet $max = [1 -2.5e3 $other]"),
        vec![Alias, Ident, Eq, Ident, Let, Var, Eq, LBracket, Number, Number, Var, RBracket, Eof]
    );
    assert_eq!(texts("let $max = 1")[1], "$max");
}

#[test]
fn keyword_prefix_is_an_identifier() {
    assert_eq!(kinds("aliases letter")[..2], [TokenKind::Ident, TokenKind::Ident]);
}

#[test]
fn wildcard_is_an_identifier() {
    assert_eq!(kinds("*: type")[0], TokenKind::Ident);
    assert_eq!(texts("*: type")[0], "*");
}

#[test]
fn comments_are_skipped() {
    let source = "// leading\na: int # trailing\n# whole line\nb: string";
    assert_eq!(texts(source), vec!["a", ":", "int", "b", ":", "string", ""]);
}

#[test]
fn triple_quoted_string_spans_lines() {
    let source = "let $doc = \"\"\"\n  |one \"quoted\"\n  |two\n\"\"\"\nx: int";
    let tokens = lex(source);
    let triple = tokens.tokens[3];
    assert_eq!(triple.kind, TokenKind::TripleString);
    assert!(triple.text(source).starts_with("\"\"\"\n"));
    assert!(triple.text(source).ends_with("\n\"\"\""));
    assert_eq!(tokens.tokens[4].line, 5);
}

#[test]
fn empty_string_literal() {
    assert_eq!(kinds("a(\"\")")[2], TokenKind::String);
}

#[test]
fn unterminated_triple_string_is_an_error() {
    let tokens = lex("let $x = \"\"\"never closed");
    assert_eq!(tokens.errors().count(), 1);
    assert_eq!(tokens.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn invalid_characters_become_error_tokens() {
    let tokens = lex("a: int\nb: @");
    let error = tokens.errors().next().copied();
    assert_eq!(error.map(|t| t.line), Some(2));
}

#[test]
fn line_numbers() {
    let tokens = lex("a: int\n\n  b: string");
    let lines: Vec<u32> = tokens.tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 1, 1, 3, 3, 3, 3]);
}

#[test]
fn line_table_lookup() {
    let table = LineTable::build("ab\ncd\n");
    assert_eq!(table.line(0), 1);
    assert_eq!(table.line(2), 1);
    assert_eq!(table.line(3), 2);
    assert_eq!(table.line(6), 3);
    assert_eq!(table.line_count(), 3);
}
