//! Pipeline execution.
//!
//! Runs the segments of a pipeline in order, feeding each command's `out`
//! into the next command's stdin, then applies the redirect (if any) to the
//! final output.

use std::sync::Arc;

use deskshell_types::{ExecResult, ToolArgs, ToolSchema};

use crate::ast::{Pipeline, RedirectKind};
use crate::tools::{ExecContext, ToolRegistry};

/// What happened to a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Every segment ran locally. Carries the combined result: the last
    /// segment's output and code, plus every segment's error text.
    Completed(ExecResult),
    /// `command` is not a builtin. Nothing ran; the whole line belongs to
    /// the gateway.
    Delegate { command: String },
}

/// Runs pipelines against the tool registry.
pub struct PipelineRunner {
    tools: Arc<ToolRegistry>,
}

impl PipelineRunner {
    /// Create a new pipeline runner with the given tool registry.
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self { tools }
    }

    /// The first command name in the pipeline with no builtin, if any.
    pub fn unresolved<'a>(&self, pipeline: &'a Pipeline) -> Option<&'a str> {
        pipeline
            .commands
            .iter()
            .map(|c| c.name.as_str())
            .find(|name| !self.tools.contains(name))
    }

    /// Execute a pipeline.
    ///
    /// Names are resolved up front, so a delegated line has no local side
    /// effects: `touch f | frobnicate` never creates `f`.
    #[tracing::instrument(level = "debug", skip_all, fields(segments = pipeline.commands.len()))]
    pub fn run(&self, pipeline: &Pipeline, ctx: &mut ExecContext) -> PipelineOutcome {
        if let Some(command) = self.unresolved(pipeline) {
            tracing::debug!(command, "unresolved command, delegating");
            return PipelineOutcome::Delegate {
                command: command.to_string(),
            };
        }

        let mut errors: Vec<String> = Vec::new();
        let mut clear = false;
        let mut last = ExecResult::default();

        for (i, command) in pipeline.commands.iter().enumerate() {
            let Some(tool) = self.tools.get(&command.name) else {
                return PipelineOutcome::Delegate {
                    command: command.name.clone(),
                };
            };

            ctx.stdin = if i == 0 { None } else { Some(std::mem::take(&mut last.out)) };

            let schema = tool.schema();
            last = match build_tool_args(&schema, &command.args) {
                Ok(args) => tool.execute(args, ctx),
                Err(message) => ExecResult::failure(2, message),
            };
            ctx.stdin = None;

            tracing::trace!(command = %command.name, code = last.code, "segment finished");
            if !last.err.is_empty() {
                errors.push(std::mem::take(&mut last.err));
            }
            clear |= last.clear;
        }

        if let Some(redirect) = &pipeline.redirect {
            let target = ctx.resolve_path(&redirect.target);
            let written = match redirect.kind {
                RedirectKind::Overwrite => ctx.vfs.write_file(&target, &last.out),
                RedirectKind::Append => ctx.vfs.append_file(&target, &last.out),
            };
            if let Err(e) = written {
                errors.push(format!("deskshell: {}: {}", redirect.target, e.unix_message()));
                last.code = 1;
            }
            last.out.clear();
            last.rendered = None;
        }

        PipelineOutcome::Completed(ExecResult {
            err: errors.join("\n"),
            clear,
            ..last
        })
    }
}

/// Turn a command's words into [`ToolArgs`] using its schema.
///
/// Follows getopt conventions: short flags cluster (`-la`), a value option
/// takes the rest of its cluster or the next word (`-n5`, `-n 5`), long
/// options take `--name=value` or `--name value`, and `--` ends option
/// parsing. A lone `-` and negative numbers stay positional. Tools with
/// `raw_args` get every word untouched.
pub fn build_tool_args(schema: &ToolSchema, words: &[String]) -> Result<ToolArgs, String> {
    if schema.raw_args {
        return Ok(ToolArgs::positional(words.iter().cloned()));
    }

    let mut args = ToolArgs::new();
    let mut words = words.iter();
    let mut options_done = false;

    while let Some(word) = words.next() {
        if options_done || !is_option(word) {
            args.positional.push(word.clone());
            continue;
        }
        if word == "--" {
            options_done = true;
            continue;
        }

        if let Some(long) = word.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (long, None),
            };
            let flag = format!("--{}", name);
            let param = schema
                .param_for_flag(&flag)
                .ok_or_else(|| format!("{}: unrecognized option '{}'", schema.name, word))?;

            if param.is_bool() {
                if inline.is_some() {
                    return Err(format!("{}: option '{}' doesn't allow an argument", schema.name, flag));
                }
                args.flags.insert(param.name.clone());
            } else {
                let value = match inline {
                    Some(value) => value.to_string(),
                    None => words
                        .next()
                        .cloned()
                        .ok_or_else(|| format!("{}: option '{}' requires an argument", schema.name, flag))?,
                };
                args.named.insert(param.name.clone(), value);
            }
            continue;
        }

        let cluster = &word[1..];
        for (i, c) in cluster.char_indices() {
            let param = schema
                .param_for_flag(&format!("-{}", c))
                .ok_or_else(|| format!("{}: invalid option -- '{}'", schema.name, c))?;
            if param.is_bool() {
                args.flags.insert(param.name.clone());
                continue;
            }

            let rest = &cluster[i + c.len_utf8()..];
            let value = if rest.is_empty() {
                words
                    .next()
                    .cloned()
                    .ok_or_else(|| format!("{}: option requires an argument -- '{}'", schema.name, c))?
            } else {
                rest.to_string()
            };
            args.named.insert(param.name.clone(), value);
            break;
        }
    }

    Ok(args)
}

/// `-x`, `--long`, `--`; not `-`, `-5` or plain words.
fn is_option(word: &str) -> bool {
    match word.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::tools::test_support::{make_ctx, read, write};
    use crate::tools::{ParamSchema, register_builtins};
    use rstest::rstest;

    fn runner() -> PipelineRunner {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry);
        PipelineRunner::new(Arc::new(registry))
    }

    fn run(ctx: &mut ExecContext, line: &str) -> PipelineOutcome {
        let pipeline = parse(line).expect("parse");
        runner().run(&pipeline, ctx)
    }

    fn completed(ctx: &mut ExecContext, line: &str) -> ExecResult {
        match run(ctx, line) {
            PipelineOutcome::Completed(result) => result,
            other => panic!("expected local execution, got {:?}", other),
        }
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn schema() -> ToolSchema {
        ToolSchema::new("t", "test")
            .param(ParamSchema::flag("all", "").with_aliases(["-a", "--all"]))
            .param(ParamSchema::flag("long", "").with_aliases(["-l"]))
            .param(ParamSchema::optional("lines", "int", None, "").with_aliases(["-n", "--lines"]))
    }

    #[test]
    fn test_pipe_feeds_stdin() {
        let mut ctx = make_ctx();
        assert_eq!(completed(&mut ctx, "echo X | grep X").out, "X");
        assert_eq!(completed(&mut ctx, "echo X | grep Y").out, "");
    }

    #[test]
    fn test_three_stage_pipeline() {
        let mut ctx = make_ctx();
        write(&ctx, "list", "apple\nbanana\navocado\ncherry");
        let result = completed(&mut ctx, "cat list | grep a | head -n 2");
        assert_eq!(result.out, "apple\nbanana");
    }

    #[test]
    fn test_redirect_overwrite_and_append() {
        let mut ctx = make_ctx();
        let result = completed(&mut ctx, "echo hello > f.txt");
        assert!(result.out.is_empty());
        assert_eq!(read(&ctx, "f.txt").as_deref(), Some("hello"));

        completed(&mut ctx, "echo world >> f.txt");
        assert_eq!(read(&ctx, "f.txt").as_deref(), Some("hello\nworld"));

        completed(&mut ctx, "echo reset > f.txt");
        assert_eq!(read(&ctx, "f.txt").as_deref(), Some("reset"));
    }

    #[test]
    fn test_redirect_writes_plain_text() {
        let mut ctx = make_ctx();
        write(&ctx, "src", "needle here");
        completed(&mut ctx, "grep needle src > hits");
        assert_eq!(read(&ctx, "hits").as_deref(), Some("needle here"));
    }

    #[test]
    fn test_redirect_into_missing_directory() {
        let mut ctx = make_ctx();
        let result = completed(&mut ctx, "echo hi > nope/f");
        assert_eq!(result.code, 1);
        assert_eq!(result.err, "deskshell: nope/f: No such file or directory");
    }

    #[test]
    fn test_errors_are_not_piped_or_redirected() {
        let mut ctx = make_ctx();
        let result = completed(&mut ctx, "cat missing | grep cat > out");
        assert_eq!(result.err, "cat: missing: No such file or directory");
        assert_eq!(read(&ctx, "out").as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_command_delegates_without_side_effects() {
        let mut ctx = make_ctx();
        let outcome = run(&mut ctx, "touch made | frobnicate --now > f.txt");
        assert_eq!(
            outcome,
            PipelineOutcome::Delegate {
                command: "frobnicate".into()
            }
        );
        assert!(read(&ctx, "made").is_none());
        assert!(read(&ctx, "f.txt").is_none());
    }

    #[test]
    fn test_bad_option_reports_usage_error() {
        let mut ctx = make_ctx();
        let result = completed(&mut ctx, "ls -z");
        assert_eq!(result.code, 2);
        assert_eq!(result.err, "ls: invalid option -- 'z'");
    }

    #[test]
    fn test_clear_propagates() {
        let mut ctx = make_ctx();
        assert!(completed(&mut ctx, "clear").clear);
    }

    #[rstest]
    #[case("-la", &["all", "long"], &[], &[])]
    #[case("-a --all", &["all"], &[], &[])]
    #[case("-n5 x", &[], &[("lines", "5")], &["x"])]
    #[case("-n 5 x", &[], &[("lines", "5")], &["x"])]
    #[case("-ln 3", &["long"], &[("lines", "3")], &[])]
    #[case("--lines=7", &[], &[("lines", "7")], &[])]
    #[case("--lines 7", &[], &[("lines", "7")], &[])]
    #[case("- -5 x", &[], &[], &["-", "-5", "x"])]
    #[case("-- -a", &[], &[], &["-a"])]
    fn test_build_tool_args(
        #[case] input: &str,
        #[case] flags: &[&str],
        #[case] named: &[(&str, &str)],
        #[case] positional: &[&str],
    ) {
        let args = build_tool_args(&schema(), &words(input)).expect("valid args");
        for flag in flags {
            assert!(args.has_flag(flag), "missing flag {}", flag);
        }
        assert_eq!(args.flags.len(), flags.len());
        for (key, value) in named {
            assert_eq!(args.get_named(key), Some(*value));
        }
        assert_eq!(args.positional, positional.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    #[rstest]
    #[case("-x", "t: invalid option -- 'x'")]
    #[case("--bogus", "t: unrecognized option '--bogus'")]
    #[case("-n", "t: option requires an argument -- 'n'")]
    #[case("--lines", "t: option '--lines' requires an argument")]
    #[case("--all=yes", "t: option '--all' doesn't allow an argument")]
    fn test_build_tool_args_errors(#[case] input: &str, #[case] message: &str) {
        assert_eq!(build_tool_args(&schema(), &words(input)).unwrap_err(), message);
    }

    #[test]
    fn test_raw_args_untouched() {
        let schema = ToolSchema::new("echo", "").with_raw_args();
        let args = build_tool_args(&schema, &words("-n -e hi")).expect("raw");
        assert_eq!(args.positional, words("-n -e hi"));
        assert!(args.flags.is_empty());
    }
}
