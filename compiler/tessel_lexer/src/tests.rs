use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    match lex(source) {
        Ok(tokens) => tokens.into_iter().map(|t| t.kind).collect(),
        Err(err) => panic!("lex failed: {err}"),
    }
}

#[test]
fn test_field_declaration() {
    assert_eq!(
        kinds("private int x = 1;"),
        vec![
            TokenKind::Private,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Int,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_keywords_win_over_identifiers() {
    assert_eq!(
        kinds("class classy interface"),
        vec![TokenKind::Class, TokenKind::Ident, TokenKind::Interface]
    );
}

#[test]
fn test_comments_are_tokens() {
    assert_eq!(
        kinds("// line\n/* block * with star */ a / b"),
        vec![
            TokenKind::LineComment,
            TokenKind::BlockComment,
            TokenKind::Ident,
            TokenKind::Slash,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_spans() {
    let Ok(tokens) = lex("class A {}") else {
        panic!("lex failed");
    };
    let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![Span::new(0, 5), Span::new(6, 7), Span::new(8, 9), Span::new(9, 10)]
    );
}

#[test]
fn test_string_literal_with_escape() {
    assert_eq!(kinds(r#""a\"b""#), vec![TokenKind::String]);
}

#[test]
fn test_unexpected_character() {
    assert_eq!(
        lex("int #"),
        Err(LexError::UnexpectedCharacter {
            span: Span::new(4, 5)
        })
    );
}

#[test]
fn test_modifier_mapping() {
    assert_eq!(TokenKind::Static.modifier(), Some(Modifier::Static));
    assert_eq!(TokenKind::Class.modifier(), None);
}

#[test]
fn test_block_comment_shapes() {
    for source in ["/* x */", "/* a * b */", "/** doc */", "/* **/", "/**/", "/* a\n * b\n */"] {
        let Ok(tokens) = lex(source) else {
            panic!("lex failed on {source:?}");
        };
        assert_eq!(tokens.len(), 1, "{source:?}");
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(Span::try_from_range(0..source.len()), Ok(tokens[0].span));
    }
}

#[test]
fn test_block_comment_ends_at_first_close() {
    assert_eq!(
        kinds("/* a */ x /* b */"),
        vec![TokenKind::BlockComment, TokenKind::Ident, TokenKind::BlockComment]
    );
}
