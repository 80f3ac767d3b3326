//! Token kinds for selector source.
//!
//! Logos is derived directly on this enum. Variants without a token or regex
//! attribute (`Start`, `End`, `Eof`, `Letter`) are synthesized by
//! [`lex`](super::lexer::lex) rather than matched.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Always the first token.
    Start = 0,

    /// Always follows the last real token.
    End,

    /// Terminal sentinel after `End`; lookahead past the stream yields it.
    Eof,

    /// Name characters are ASCII letters, digits, `_`, `-`, any non-ASCII character,
    /// or a CSS escape (`\` plus 1-6 hex digits and one optional whitespace, or `\`
    /// plus any other character). A name may not start with a digit.
    #[regex(r"-?(?:[_a-zA-Z]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}(?:\r\n|[ \t\r\n\f])?|\\[^\r\n\f0-9a-fA-F])(?:[_a-zA-Z0-9-]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}(?:\r\n|[ \t\r\n\f])?|\\[^\r\n\f0-9a-fA-F])*")]
    Ident,

    /// `#name`; unlike other names it may start with a digit.
    #[regex(r"#(?:[_a-zA-Z0-9-]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}(?:\r\n|[ \t\r\n\f])?|\\[^\r\n\f0-9a-fA-F])+")]
    Hash,

    /// `.name`
    #[regex(r"\.-?(?:[_a-zA-Z]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}(?:\r\n|[ \t\r\n\f])?|\\[^\r\n\f0-9a-fA-F])(?:[_a-zA-Z0-9-]|[^\x00-\x7F]|\\[0-9a-fA-F]{1,6}(?:\r\n|[ \t\r\n\f])?|\\[^\r\n\f0-9a-fA-F])*")]
    Class,

    /// Quoted text. A backslash escapes only the delimiter; any other backslash is
    /// literal, so a closing quote can never directly follow a backslash.
    #[regex(r#""(?:[^"\\]|\\+[^"\\]|\\+")*""#)]
    #[regex(r"'(?:[^'\\]|\\+[^'\\]|\\+')*'")]
    StringLiteral,

    /// Quoted text running off the end of input. Never leaves the lexer.
    #[regex(r#""(?:[^"\\]|\\+[^"\\]|\\+")*\\*"#)]
    #[regex(r"'(?:[^'\\]|\\+[^'\\]|\\+')*\\*")]
    UnterminatedString,

    #[token("[")]
    AttribOpen,

    #[token("]")]
    AttribClose,

    #[token("=")]
    Equal,

    #[token("~=")]
    Includes,

    #[token("|=")]
    DashMatch,

    #[token("^=")]
    PrefixMatch,

    #[token("$=")]
    SuffixMatch,

    #[token("*=")]
    SubstringMatch,

    #[token(",")]
    Comma,

    #[token("*")]
    Universal,

    /// Whitespace not adjacent to an operator, combinator, or comma.
    #[regex(r"[ \t\r\n\f]+")]
    S,

    #[token("+")]
    Plus,

    #[token(">")]
    Greater,

    #[token("~")]
    Tilde,

    /// Any single character no other rule accepts.
    Letter,
}

impl TokenKind {
    /// Returns `true` for tokens whose span swallows adjacent whitespace.
    #[inline]
    pub fn absorbs_whitespace(self) -> bool {
        self.is_attr_operator() || self.is_combinator() || self == Self::Comma
    }

    #[inline]
    pub fn is_attr_operator(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::Includes
                | Self::DashMatch
                | Self::PrefixMatch
                | Self::SuffixMatch
                | Self::SubstringMatch
        )
    }

    /// Explicit combinators. Whitespace (`S`) is the implicit one.
    #[inline]
    pub fn is_combinator(self) -> bool {
        matches!(self, Self::Plus | Self::Greater | Self::Tilde)
    }

    /// Human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Start => "start of selector",
            Self::End | Self::Eof => "end of selector",
            Self::Ident => "identifier",
            Self::Hash => "id selector",
            Self::Class => "class selector",
            Self::StringLiteral | Self::UnterminatedString => "string",
            Self::AttribOpen => "`[`",
            Self::AttribClose => "`]`",
            Self::Equal => "`=`",
            Self::Includes => "`~=`",
            Self::DashMatch => "`|=`",
            Self::PrefixMatch => "`^=`",
            Self::SuffixMatch => "`$=`",
            Self::SubstringMatch => "`*=`",
            Self::Comma => "`,`",
            Self::Universal => "`*`",
            Self::S => "whitespace",
            Self::Plus => "`+`",
            Self::Greater => "`>`",
            Self::Tilde => "`~`",
            Self::Letter => "character",
        }
    }
}
