//! Lexer for deskshell command lines.
//!
//! Converts a line into a stream of tokens using the logos lexer generator.
//! There are only three operators (`|`, `>`, `>>`); everything else is a
//! word. Quoted strings are words too, with their quotes removed, and
//! quoting is the only way to get an operator character into an argument.
//!
//! Pieces written back to back with no whitespace (`a"b c"'d'`) form a
//! single word, as in a POSIX shell.

use logos::{Logos, Span};
use std::fmt;

/// A token with its span in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub token: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(token: T, span: Span) -> Self {
        Self { token, span }
    }
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexerError {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::UnexpectedCharacter => write!(f, "unexpected character"),
            LexerError::UnterminatedString => write!(f, "unterminated quoted string"),
        }
    }
}

/// Raw token as logos produces it. Quoted and bare pieces are told apart
/// here and merged into [`Token::Word`] by [`tokenize`].
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexerError)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token(">>")]
    GtGt,

    #[token(">")]
    Gt,

    #[token("|")]
    Pipe,

    /// Double-quoted string; an unterminated one still matches and is
    /// rejected by the callback.
    #[regex(r#""([^"\\]|\\.)*"?"#, |lex| parse_string_literal(lex.slice()))]
    DoubleQuoted(String),

    #[regex(r"'[^']*'?", |lex| parse_single_quoted(lex.slice()))]
    SingleQuoted(String),

    #[regex(r#"[^ \t\r\n|><"']+"#, |lex| lex.slice().to_string())]
    Bare(String),
}

/// A command-line token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// An argument or command name, quotes already removed.
    Word(String),
    /// `|`
    Pipe,
    /// `>`
    Gt,
    /// `>>`
    GtGt,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "{}", w),
            Token::Pipe => write!(f, "|"),
            Token::Gt => write!(f, ">"),
            Token::GtGt => write!(f, ">>"),
        }
    }
}

/// Tokenize a command line.
///
/// Returns every lexer error found, not just the first.
pub fn tokenize(source: &str) -> Result<Vec<Spanned<Token>>, Vec<Spanned<LexerError>>> {
    let mut tokens: Vec<Spanned<Token>> = Vec::new();
    let mut errors = Vec::new();
    // True when the last pushed token is a word that ends where the next piece begins.
    let mut word_open_until: Option<usize> = None;

    for (result, span) in RawToken::lexer(source).spanned() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                errors.push(Spanned::new(err, span));
                word_open_until = None;
                continue;
            }
        };

        let piece = match raw {
            RawToken::GtGt => Token::GtGt,
            RawToken::Gt => Token::Gt,
            RawToken::Pipe => Token::Pipe,
            RawToken::DoubleQuoted(s) | RawToken::SingleQuoted(s) | RawToken::Bare(s) => {
                if word_open_until == Some(span.start)
                    && let Some(Spanned { token: Token::Word(word), span: prev }) = tokens.last_mut()
                {
                    word.push_str(&s);
                    prev.end = span.end;
                    word_open_until = Some(span.end);
                    continue;
                }
                word_open_until = Some(span.end);
                tokens.push(Spanned::new(Token::Word(s), span));
                continue;
            }
        };

        word_open_until = None;
        tokens.push(Spanned::new(piece, span));
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

/// Extract the content of a double-quoted string (removes quotes, processes escapes).
///
/// Only `\"` and `\\` are escapes; any other backslash is kept literally so
/// patterns like `"a\.b"` reach `grep` unchanged.
pub fn parse_string_literal(source: &str) -> Result<String, LexerError> {
    let Some(inner) = source.strip_prefix('"') else {
        return Err(LexerError::UnterminatedString);
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(c @ ('"' | '\\')) => result.push(c),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => return Err(LexerError::UnterminatedString),
            },
            // The regex only lets an unescaped quote through as the final char.
            '"' => return Ok(result),
            _ => result.push(ch),
        }
    }

    Err(LexerError::UnterminatedString)
}

fn parse_single_quoted(source: &str) -> Result<String, LexerError> {
    source
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .map(str::to_string)
        .ok_or(LexerError::UnterminatedString)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_words_and_operators() {
        assert_eq!(
            lex("ls -la | grep txt >> out.txt"),
            vec![
                word("ls"),
                word("-la"),
                Token::Pipe,
                word("grep"),
                word("txt"),
                Token::GtGt,
                word("out.txt"),
            ]
        );
    }

    #[test]
    fn test_operators_without_spaces() {
        assert_eq!(
            lex("echo hi>f|cat"),
            vec![word("echo"), word("hi"), Token::Gt, word("f"), Token::Pipe, word("cat")]
        );
    }

    #[rstest]
    #[case(r#"echo "a | b""#, "a | b")]
    #[case("echo 'x > y'", "x > y")]
    #[case(r#"echo "say \"hi\"""#, r#"say "hi""#)]
    #[case(r#"echo "back\\slash""#, r"back\slash")]
    #[case(r#"echo "a\.b""#, r"a\.b")]
    #[case("echo 'no $escapes\\'", "no $escapes\\")]
    #[case(r#"echo pre"mid"'post'"#, "premidpost")]
    #[case(r#"echo """#, "")]
    fn test_quoted_words(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(lex(source), vec![word("echo"), word(expected)]);
    }

    #[test]
    fn test_quotes_separated_by_space_stay_apart() {
        assert_eq!(lex(r#""a" "b""#), vec![word("a"), word("b")]);
    }

    #[rstest]
    #[case(r#"echo "open"#)]
    #[case("echo 'open")]
    #[case(r#"echo "trailing\""#)]
    fn test_unterminated(#[case] source: &str) {
        let errors = tokenize(source).expect_err("should fail");
        assert_eq!(errors[0].token, LexerError::UnterminatedString);
    }

    #[test]
    fn test_spans_cover_merged_word() {
        let tokens = tokenize(r#"cat a"b""#).expect("tokenize failed");
        assert_eq!(tokens[1].span, 4..8);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(lex("").is_empty());
        assert!(lex("   \t ").is_empty());
    }
}
