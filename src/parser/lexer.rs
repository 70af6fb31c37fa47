//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The lexer is total: unknown characters are skipped, an unterminated block
//! comment swallows the rest of the input, and string literals keep their
//! escape sequences as raw text. Every such event is recorded as a
//! [`Diagnostic`] but never interrupts tokenization.

use super::ast::SourceLocation;
use crate::diagnostics::{Diagnostic, Stage};
use std::fmt;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    /// String and character literals alike
    String,
    Operator,
    Delimiter,
    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{}", name)
    }
}

/// A single lexeme with its position.
///
/// `text` is `None` only for the end-of-input token. String tokens hold the
/// literal's contents without the surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            text: Some(text.into()),
            location,
        }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Token {
            kind: TokenKind::Eof,
            text: None,
            location,
        }
    }

    /// Lexeme text, empty for end-of-input
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True if this token is of `kind` and spelled exactly `text`
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text.as_deref() == Some(text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.text) {
            (TokenKind::Eof, _) | (_, None) => write!(f, "end of input"),
            (TokenKind::Newline, _) => write!(f, "{} \\n", self.kind),
            (TokenKind::String, Some(text)) => write!(f, "{} \"{}\"", self.kind, text),
            (_, Some(text)) => write!(f, "{} {}", self.kind, text),
        }
    }
}

/// Reserved words: types, control flow, I/O and storage/qualifier words
const KEYWORDS: &[&str] = &[
    // types
    "int", "float", "double", "char", "void", "long", "short", "unsigned", "signed", "bool",
    // control
    "if", "else", "while", "for", "do", "return", "break", "continue", "switch", "case",
    "default", "goto", "sizeof",
    // I/O
    "printf", "scanf",
    // storage and qualifiers
    "const", "static", "extern", "auto", "register", "volatile", "struct", "union", "enum",
    "typedef",
];

/// Keywords that open a declaration
const TYPE_KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "void", "long", "short", "unsigned", "signed", "bool",
];

/// Two-character operators, matched greedily after the first character
const TWO_CHAR_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "++", "--", "&&", "||", "+=", "-=", "*=", "/=", "%=", "<<", ">>",
];

const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~?:";
const DELIMITER_CHARS: &str = "(){}[];,#.";

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

pub fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.contains(&word)
}

/// Tokenize `source`, discarding diagnostics.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Lexer for C source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Tokenize the entire input. The result always ends with exactly one
    /// [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            let Some(ch) = self.peek() else {
                tokens.push(Token::eof(self.current_location()));
                break;
            };

            let loc = self.current_location();
            match ch {
                '\n' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Newline, "\n", loc));
                }
                '"' | '\'' => tokens.push(self.string_literal(ch)),
                '0'..='9' => tokens.push(self.number_literal()),
                'a'..='z' | 'A'..='Z' | '_' => tokens.push(self.identifier_or_keyword()),
                c if OPERATOR_CHARS.contains(c) => tokens.push(self.operator()),
                c if DELIMITER_CHARS.contains(c) => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Delimiter, c.to_string(), loc));
                }
                other => {
                    self.advance();
                    self.warn(format!("Skipped unrecognized character '{}'", other), loc);
                }
            }
        }

        tokens
    }

    /// Diagnostics recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parse string or character literal; escapes are kept verbatim
    fn string_literal(&mut self, quote: char) -> Token {
        let loc = self.current_location();
        self.advance(); // opening quote
        let mut text = String::new();

        loop {
            match self.advance() {
                None => {
                    self.warn("Unterminated string literal", loc);
                    break;
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    text.push('\\');
                    if let Some(escaped) = self.advance() {
                        text.push(escaped);
                    }
                }
                Some(c) => text.push(c),
            }
        }

        Token::new(TokenKind::String, text, loc)
    }

    /// Parse numeric literal: digits with at most one decimal point
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let mut text = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
            } else if ch == '.' && !seen_dot {
                seen_dot = true;
                text.push(ch);
            } else {
                break;
            }
            self.advance();
        }

        Token::new(TokenKind::Number, text, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_keyword(&ident) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, ident, loc)
    }

    /// Single operator character, greedily extended to a two-character operator
    fn operator(&mut self) -> Token {
        let loc = self.current_location();
        let mut text = String::new();
        if let Some(first) = self.advance() {
            text.push(first);
        }

        if let Some(next) = self.peek() {
            let mut pair = text.clone();
            pair.push(next);
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.advance();
                text = pair;
            }
        }

        Token::new(TokenKind::Operator, text, loc)
    }

    /// Skip whitespace (except newlines) and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() && c != '\n' => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Skip single-line comment, leaving the newline for its own token
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment; an unterminated one runs to end of input
    fn skip_block_comment(&mut self) {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }

        self.warn("Unterminated block comment", start_loc);
    }

    fn warn(&mut self, message: impl Into<String>, location: SourceLocation) {
        self.diagnostics
            .push(Diagnostic::new(Stage::Lexer, message, location));
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(tokens: &[Token]) -> Vec<(TokenKind, Option<String>)> {
        tokens.iter().map(|t| (t.kind, t.text.clone())).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("int main() { return 0; }");

        assert!(tokens[0].is(TokenKind::Keyword, "int"));
        assert!(tokens[1].is(TokenKind::Identifier, "main"));
        assert!(tokens[2].is(TokenKind::Delimiter, "("));
        assert!(tokens[3].is(TokenKind::Delimiter, ")"));
        assert!(tokens[4].is(TokenKind::Delimiter, "{"));
        assert!(tokens[5].is(TokenKind::Keyword, "return"));
        assert!(tokens[6].is(TokenKind::Number, "0"));
        assert!(tokens[7].is(TokenKind::Delimiter, ";"));
        assert!(tokens[8].is(TokenKind::Delimiter, "}"));
        assert_eq!(tokens[9].kind, TokenKind::Eof);
        assert_eq!(tokens[9].text, None);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("++ -- += -= == != && || %= << >> <= >=");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();

        assert_eq!(
            texts,
            vec!["++", "--", "+=", "-=", "==", "!=", "&&", "||", "%=", "<<", ">>", "<=", ">=", ""]
        );
        assert!(tokens[..13].iter().all(|t| t.kind == TokenKind::Operator));
    }

    #[test]
    fn test_operator_lookahead_is_greedy_but_bounded() {
        let tokens = tokenize("a+++b");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["a", "++", "+", "b", ""]);
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("int x; // comment\nint y; /* block\ncomment */ int z;");
        let texts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Newline)
            .map(|t| t.text())
            .collect();

        assert_eq!(texts, vec!["int", "x", ";", "int", "y", ";", "int", "z", ";", ""]);
    }

    #[test]
    fn test_newlines_are_tokens_with_positions() {
        let tokens = tokenize("a\n  b");

        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].location, SourceLocation::new(1, 2));
        assert!(tokens[2].is(TokenKind::Identifier, "b"));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_unterminated_block_comment_consumes_rest() {
        let mut lexer = Lexer::new("int x; /* never closed\nint y;");
        let tokens = lexer.tokenize();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["int", "x", ";", ""]);
        assert_eq!(lexer.diagnostics().len(), 1);
        assert_eq!(lexer.diagnostics()[0].message, "Unterminated block comment");
    }

    #[test]
    fn test_string_literal_keeps_escapes_raw() {
        let tokens = tokenize(r#""hello\nworld" 'c' '\''"#);

        assert!(tokens[0].is(TokenKind::String, "hello\\nworld"));
        assert_eq!(tokens[0].text().chars().count(), 12);
        assert!(tokens[1].is(TokenKind::String, "c"));
        assert!(tokens[2].is(TokenKind::String, "\\'"));
    }

    #[test]
    fn test_number_stops_at_second_dot() {
        let tokens = tokenize("1.2.3");
        assert_eq!(
            kinds_and_texts(&tokens),
            vec![
                (TokenKind::Number, Some("1.2".to_string())),
                (TokenKind::Delimiter, Some(".".to_string())),
                (TokenKind::Number, Some("3".to_string())),
                (TokenKind::Eof, None),
            ]
        );
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let mut lexer = Lexer::new("int @x = $5;");
        let tokens = lexer.tokenize();

        assert_eq!(
            kinds_and_texts(&tokens),
            kinds_and_texts(&tokenize("int x = 5;"))
        );
        assert_eq!(lexer.diagnostics().len(), 2);
    }

    #[test]
    fn test_preprocessor_tokens() {
        let tokens = tokenize("#include <stdio.h>");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["#", "include", "<", "stdio", ".", "h", ">", ""]);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_keyword_classification() {
        let tokens = tokenize("printf scanf const unsigned counter");
        assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Keyword));
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
    }
}
