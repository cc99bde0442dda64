use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP};

/// Receives the matched text; `None` means the text is skipped.
pub type RegexHandler = fn(&mut Lexer, String) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Patterns are anchored, so a match always starts at the lexer position.
macro_rules! pattern {
    ($regex:literal, $handler:expr) => {
        RegexPattern { regex: Regex::new(concat!("^(?:", $regex, ")")).unwrap(), handler: $handler }
    };
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern!("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern!("[0-9]+", number_handler),
        pattern!("\\s+", skip_handler),
        pattern!("//[^\\n]*", skip_handler),
        pattern!("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern!("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern!("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern!("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern!("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern!("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern!("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern!("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern!("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern!(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern!(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern!(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern!("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern!("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern!("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern!("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
    ];
}

/// On-demand scanner: each `next_token` call matches one pattern at the
/// current position.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn scan_token(&mut self) -> Token {
        while !self.at_eof() {
            let found = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|matched| (pattern.handler, matched.as_str().to_string()))
            });

            match found {
                Some((handler, matched)) => {
                    if let Some(token) = handler(self, matched) {
                        return token;
                    }
                }
                None => return illegal_handler(self),
            }
        }

        MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_of(0))
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        self.scan_token()
    }
}

/// A `TokenSource` over tokens that were already scanned.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let span = tokens.last().map(|token| Span {
            start: token.span.end.clone(),
            end: token.span.end.clone(),
        });

        TokenStream {
            eof: MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span.unwrap_or_else(Span::null)),
            tokens: tokens.into_iter(),
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        self.tokens.next().unwrap_or_else(|| self.eof.clone())
    }
}

fn number_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    Some(MK_TOKEN!(TokenKind::Number, matched, span))
}

fn skip_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    lexer.advance_n(matched.len());
    None
}

fn symbol_handler(lexer: &mut Lexer, matched: String) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(matched.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);
    let span = lexer.span_of(matched.len());
    lexer.advance_n(matched.len());

    Some(MK_TOKEN!(kind, matched, span))
}

fn illegal_handler(lexer: &mut Lexer) -> Token {
    let value: String = lexer.remainder().chars().take(1).collect();
    debug!(character = %value, position = lexer.pos, "unrecognised character");

    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());

    MK_TOKEN!(TokenKind::Illegal, value, span)
}

/// Scans the whole source eagerly, failing on the first unrecognised character.
///
/// The returned vector always ends with an `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();

        match token.kind {
            TokenKind::Illegal => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token: token.value },
                    token.span.start,
                ));
            }
            TokenKind::EOF => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}
