//! Parser for deskshell command lines.
//!
//! Transforms the lexer's token stream into a [`Pipeline`]. The grammar:
//!
//! ```text
//! line     := segment ('|' segment)* redirect?
//! segment  := WORD WORD*
//! redirect := ('>' | '>>') WORD
//! ```
//!
//! A redirect binds to the whole pipeline, so it can only come last:
//! `a > f | b` is a syntax error.

use crate::ast::{Command, Pipeline, Redirect, RedirectKind};
use crate::lexer::{self, Token};
use chumsky::{input::ValueInput, prelude::*};

/// Span type used throughout the parser.
pub type Span = SimpleSpan;

/// Parse error with location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

/// Parse one command line into a pipeline.
///
/// Reports the first error only.
#[tracing::instrument(level = "trace", err)]
pub fn parse(source: &str) -> Result<Pipeline, ParseError> {
    let tokens = lexer::tokenize(source).map_err(|errs| {
        let first = errs.into_iter().next();
        ParseError {
            span: first.as_ref().map(|e| e.span.clone()).unwrap_or(0..source.len()).into(),
            message: first.map(|e| e.token.to_string()).unwrap_or_default(),
        }
    })?;

    let tokens: Vec<(Token, Span)> = tokens
        .into_iter()
        .map(|spanned| (spanned.token, (spanned.span.start..spanned.span.end).into()))
        .collect();

    let end_span: Span = (source.len()..source.len()).into();

    let result = line_parser().parse(tokens.as_slice().map(end_span, |(t, s)| (t, s)));

    result.into_result().map_err(|errs| {
        match errs.into_iter().next() {
            Some(e) => ParseError {
                span: *e.span(),
                message: match e.found() {
                    Some(token) => format!("unexpected '{}'", token),
                    None => "unexpected end of input".to_string(),
                },
            },
            None => ParseError {
                span: end_span,
                message: "invalid command line".to_string(),
            },
        }
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Parser Combinators - generic over input type
// ═══════════════════════════════════════════════════════════════════════════

fn line_parser<'tokens, I>() -> impl Parser<'tokens, I, Pipeline, extra::Err<Rich<'tokens, Token, Span>>>
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    command_parser()
        .separated_by(just(Token::Pipe))
        .at_least(1)
        .collect::<Vec<_>>()
        .then(redirect_parser().or_not())
        .then_ignore(end())
        .map(|(commands, redirect)| Pipeline { commands, redirect })
        .labelled("pipeline")
}

fn word_parser<'tokens, I>() -> impl Parser<'tokens, I, String, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! { Token::Word(w) => w }.labelled("word")
}

/// Command: `name args...`
fn command_parser<'tokens, I>() -> impl Parser<'tokens, I, Command, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    word_parser()
        .then(word_parser().repeated().collect::<Vec<_>>())
        .map(|(name, args)| Command { name, args })
        .labelled("command")
}

/// Redirect: `> target` or `>> target`
fn redirect_parser<'tokens, I>() -> impl Parser<'tokens, I, Redirect, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    select! {
        Token::GtGt => RedirectKind::Append,
        Token::Gt => RedirectKind::Overwrite,
    }
    .then(word_parser())
    .map(|(kind, target)| Redirect { kind, target })
    .labelled("redirect")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_single_command() {
        let pipeline = parse("ls -la Documents").expect("parse");
        assert_eq!(pipeline.commands, vec![Command::new("ls", ["-la", "Documents"])]);
        assert!(pipeline.redirect.is_none());
    }

    #[test]
    fn test_pipeline_with_redirect() {
        let pipeline = parse("cat notes.txt | grep todo >> todo.txt").expect("parse");
        assert_eq!(
            pipeline.commands,
            vec![
                Command::new("cat", ["notes.txt"]),
                Command::new("grep", ["todo"]),
            ]
        );
        assert_eq!(
            pipeline.redirect,
            Some(Redirect {
                kind: RedirectKind::Append,
                target: "todo.txt".into(),
            })
        );
    }

    #[test]
    fn test_quoted_operators_are_words() {
        let pipeline = parse(r#"echo "a | b" '>' x"#).expect("parse");
        assert_eq!(pipeline.commands, vec![Command::new("echo", ["a | b", ">", "x"])]);
        assert!(pipeline.redirect.is_none());
    }

    #[test]
    fn test_display_roundtrips_structure() {
        let pipeline = parse("echo hi | cat > out").expect("parse");
        assert_eq!(pipeline.to_string(), "echo hi | cat > out");
    }

    #[rstest]
    #[case("echo a > f | cat", "unexpected '|'")]
    #[case("| cat", "unexpected '|'")]
    #[case("echo > a > b", "unexpected '>'")]
    #[case("a || b", "unexpected '|'")]
    #[case("> f", "unexpected '>'")]
    #[case(r#"echo "open"#, "unterminated quoted string")]
    fn test_syntax_errors(#[case] source: &str, #[case] message: &str) {
        let err = parse(source).expect_err("should fail");
        assert_eq!(err.message, message);
    }

    #[rstest]
    #[case("cat |")]
    #[case("echo >")]
    #[case("")]
    fn test_incomplete_lines(#[case] source: &str) {
        let err = parse(source).expect_err("should fail");
        assert!(err.message.starts_with("unexpected"), "{}", err.message);
    }
}
