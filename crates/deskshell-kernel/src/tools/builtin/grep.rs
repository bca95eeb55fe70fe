//! grep — Search for a literal string in a file or piped input.

use deskshell_types::{ExecResult, ParamSchema, ToolArgs, ToolSchema};

use crate::tools::markup::{find_literal, highlight_literal};
use crate::tools::{ExecContext, Tool};

/// Grep tool: line-by-line literal substring match.
pub struct Grep;

impl Tool for Grep {
    fn name(&self) -> &str {
        "grep"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("grep", "Search for lines containing a string")
            .param(ParamSchema::required("pattern", "string", "Literal text to search for"))
            .param(ParamSchema::optional("path", "string", None, "File to search (piped input if not provided)"))
            .param(ParamSchema::flag("ignore_case", "Case-insensitive matching (-i)").with_aliases(["-i"]))
            .param(ParamSchema::flag("invert", "Select non-matching lines (-v)").with_aliases(["-v"]))
            .param(ParamSchema::flag("count", "Only print count of matching lines (-c)").with_aliases(["-c"]))
            .param(ParamSchema::flag("line_number", "Prefix output with line numbers (-n)").with_aliases(["-n"]))
            .example("Filter piped output", "ls | grep txt")
            .example("Count matches ignoring case", "grep -ic hello notes.txt")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let Some(pattern) = args.get_positional(0) else {
            return ExecResult::failure(2, "grep: missing pattern");
        };

        let opts = GrepOptions {
            ignore_case: args.has_flag("ignore_case"),
            invert: args.has_flag("invert"),
            line_number: args.has_flag("line_number"),
        };

        // Get input: from file or stdin
        let input = match args.get_positional(1) {
            Some(path) => match ctx.vfs.read_file(&ctx.resolve_path(path)) {
                Ok(content) => content,
                Err(e) => return ExecResult::failure(2, format!("grep: {}: {}", path, e.unix_message())),
            },
            None => ctx.take_stdin().unwrap_or_default(),
        };

        let matches = grep_lines(&input, pattern, &opts);

        // grep returns exit code 1 if no matches (but not an error)
        let code = if matches.plain.is_empty() { 1 } else { 0 };

        if args.has_flag("count") {
            return ExecResult {
                code,
                out: matches.plain.len().to_string(),
                ..ExecResult::default()
            };
        }

        ExecResult {
            code,
            out: matches.plain.join("\n"),
            rendered: Some(matches.rendered.join("\n")),
            ..ExecResult::default()
        }
    }
}

struct GrepOptions {
    ignore_case: bool,
    invert: bool,
    line_number: bool,
}

/// Selected lines, plain and with matches highlighted.
struct Matches {
    plain: Vec<String>,
    rendered: Vec<String>,
}

fn grep_lines(input: &str, pattern: &str, opts: &GrepOptions) -> Matches {
    let mut matches = Matches {
        plain: Vec::new(),
        rendered: Vec::new(),
    };

    for (i, line) in input.lines().enumerate() {
        let hit = find_literal(line, pattern, opts.ignore_case).is_some();
        if hit == opts.invert {
            continue;
        }

        let prefix = if opts.line_number {
            format!("{}:", i + 1)
        } else {
            String::new()
        };
        let marked = if opts.invert {
            line.to_string()
        } else {
            highlight_literal(line, pattern, opts.ignore_case)
        };

        matches.plain.push(format!("{}{}", prefix, line));
        matches.rendered.push(format!("{}{}", prefix, marked));
    }

    matches
}
