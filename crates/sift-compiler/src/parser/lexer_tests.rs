use super::lexer::lex;
use super::token_kind::TokenKind;
use crate::error::LexErrorKind;

fn dump(source: &str) -> String {
    lex(source)
        .unwrap()
        .iter()
        .map(|t| format!("{:?} {} {:?}\n", t.kind, t.span, t.text(source)))
        .collect()
}

#[test]
fn framing_tokens() {
    insta::assert_snapshot!(dump("div"), @r#"
    Start 0..0 ""
    Ident 0..3 "div"
    End 3..3 ""
    Eof 3..3 ""
    "#);
}

#[test]
fn combinator_absorbs_whitespace() {
    insta::assert_snapshot!(dump("div > .a"), @r#"
    Start 0..0 ""
    Ident 0..3 "div"
    Greater 3..6 " > "
    Class 6..8 ".a"
    End 8..8 ""
    Eof 8..8 ""
    "#);
}

#[test]
fn lone_whitespace_is_kept() {
    insta::assert_snapshot!(dump("a b"), @r#"
    Start 0..0 ""
    Ident 0..1 "a"
    S 1..2 " "
    Ident 2..3 "b"
    End 3..3 ""
    Eof 3..3 ""
    "#);
}

#[test]
fn comma_absorbs_whitespace() {
    insta::assert_snapshot!(dump("a , b"), @r#"
    Start 0..0 ""
    Ident 0..1 "a"
    Comma 1..4 " , "
    Ident 4..5 "b"
    End 5..5 ""
    Eof 5..5 ""
    "#);
}

#[test]
fn attribute_tokens() {
    insta::assert_snapshot!(dump(r#"[href$=".png"]"#), @r#"
    Start 0..0 ""
    AttribOpen 0..1 "["
    Ident 1..5 "href"
    SuffixMatch 5..7 "$="
    StringLiteral 7..13 "\".png\""
    AttribClose 13..14 "]"
    End 14..14 ""
    Eof 14..14 ""
    "#);
}

#[test]
fn every_attribute_operator() {
    let source = "= ~= |= ^= $= *=";
    let kinds: Vec<_> = lex(source)
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .filter(|k| k.is_attr_operator())
        .collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Equal,
            TokenKind::Includes,
            TokenKind::DashMatch,
            TokenKind::PrefixMatch,
            TokenKind::SuffixMatch,
            TokenKind::SubstringMatch,
        ]
    );
}

#[test]
fn unknown_characters_become_letters() {
    insta::assert_snapshot!(dump("a!b"), @r#"
    Start 0..0 ""
    Ident 0..1 "a"
    Letter 1..2 "!"
    Ident 2..3 "b"
    End 3..3 ""
    Eof 3..3 ""
    "#);
}

#[test]
fn unterminated_string() {
    let err = lex(r#"[a="foo"#).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span.range(), 3..7);
    insta::assert_snapshot!(err, @"unterminated string at 3..7");
}

#[test]
fn token_values() {
    let source = r#"#main .note 'it\'s' "a\nb" -x"#;
    let values: Vec<_> = lex(source)
        .unwrap()
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::S | TokenKind::Start))
        .take(5)
        .map(|t| t.value(source).into_owned())
        .collect();
    assert_eq!(values, ["main", "note", "it's", r"a\nb", "-x"]);
}

#[test]
fn non_ascii_names() {
    insta::assert_snapshot!(dump("p.café[title=naïve]"), @r#"
    Start 0..0 ""
    Ident 0..1 "p"
    Class 1..7 ".café"
    AttribOpen 7..8 "["
    Ident 8..13 "title"
    Equal 13..14 "="
    Ident 14..20 "naïve"
    AttribClose 20..21 "]"
    End 21..21 ""
    Eof 21..21 ""
    "#);
}

#[test]
fn escaped_names() {
    let source = r".caf\e9 #\31 23 a\.b \2d x";
    let tokens = lex(source).unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Start,
            TokenKind::Class,
            TokenKind::Hash,
            TokenKind::S,
            TokenKind::Ident,
            TokenKind::S,
            TokenKind::Ident,
            TokenKind::End,
            TokenKind::Eof,
        ]
    );
    let values: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Class | TokenKind::Hash | TokenKind::Ident))
        .map(|t| t.value(source).into_owned())
        .collect();
    assert_eq!(values, ["café", "123", "a.b", "-x"]);
}

#[test]
fn out_of_range_escape_is_replacement_character() {
    let source = r"\110000 \0 a";
    let tokens = lex(source).unwrap();
    let values: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Ident)
        .map(|t| t.value(source).into_owned())
        .collect();
    assert_eq!(values, ["\u{FFFD}\u{FFFD}a"]);
}

#[test]
fn backslash_escapes_only_the_delimiter() {
    let source = r#""a\\"b" 'c\d'"#;
    let values: Vec<_> = lex(source)
        .unwrap()
        .iter()
        .filter(|t| t.kind == TokenKind::StringLiteral)
        .map(|t| t.value(source).into_owned())
        .collect();
    assert_eq!(values, [r#"a\"b"#, r"c\d"]);

    // The last backslash escapes the quote, leaving the string open.
    let err = lex(r#"[a="x\\"]"#).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span.range(), 3..9);

    let err = lex(r"[path='c:\dir\']").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}
