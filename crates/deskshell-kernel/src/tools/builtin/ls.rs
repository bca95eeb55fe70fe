//! ls — List directory contents.

use deskshell_types::{DirEntry, ExecResult, ParamSchema, ToolArgs, ToolSchema};

use crate::tools::markup;
use crate::tools::{ExecContext, Tool};

/// Ls tool: list directory contents.
pub struct Ls;

impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents")
            .param(ParamSchema::flag("all", "Show hidden entries starting with . (-a)").with_aliases(["-a", "--all"]))
            .param(ParamSchema::flag("long", "Long format with permissions, owner and size (-l)").with_aliases(["-l"]))
            .param(ParamSchema::optional("path", "string", Some("."), "Directory or file to list"))
            .example("List current directory", "ls")
            .example("Show hidden files with details", "ls -la ~")
    }

    fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> ExecResult {
        let operand = args.get_positional(0).unwrap_or(".");
        let show_all = args.has_flag("all");
        let long_format = args.has_flag("long");

        let path = ctx.resolve_path(operand);
        let target = match ctx.vfs.stat(&path) {
            Ok(entry) => entry,
            Err(e) => {
                return ExecResult::failure(2, format!("ls: cannot access '{}': {}", operand, e.unix_message()));
            }
        };

        let mut entries = if target.is_dir() {
            match ctx.vfs.read_dir(&path) {
                Ok(entries) => entries
                    .into_iter()
                    .filter(|e| show_all || !e.is_hidden())
                    .collect(),
                Err(e) => {
                    return ExecResult::failure(2, format!("ls: cannot open directory '{}': {}", operand, e.unix_message()));
                }
            }
        } else {
            // Listing a file shows the file itself, under the name given.
            vec![DirEntry {
                name: operand.to_string(),
                ..target
            }]
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let (plain, rendered): (Vec<String>, Vec<String>) = if long_format {
            let widths = ColumnWidths::of(&entries);
            entries
                .iter()
                .map(|e| {
                    let prefix = widths.prefix(e);
                    (format!("{} {}", prefix, e.name), format!("{} {}", prefix, styled_name(e)))
                })
                .unzip()
        } else {
            entries.iter().map(|e| (e.name.clone(), styled_name(e))).unzip()
        };

        ExecResult::success_rendered(plain.join("\n"), rendered.join("\n"))
    }
}

fn styled_name(entry: &DirEntry) -> String {
    if entry.is_dir() {
        markup::directory(&entry.name)
    } else {
        entry.name.clone()
    }
}

/// Column widths for `-l`, so owner, group and size line up.
struct ColumnWidths {
    owner: usize,
    group: usize,
    size: usize,
}

impl ColumnWidths {
    fn of(entries: &[DirEntry]) -> Self {
        let mut widths = Self {
            owner: 0,
            group: 0,
            size: 0,
        };
        for e in entries {
            widths.owner = widths.owner.max(e.owner.len());
            widths.group = widths.group.max(e.group.len());
            widths.size = widths.size.max(e.size.to_string().len());
        }
        widths
    }

    /// Everything on a long-format line before the name.
    fn prefix(&self, e: &DirEntry) -> String {
        format!(
            "{} 1 {:<ow$} {:<gw$} {:>sw$} {}",
            e.permissions,
            e.owner,
            e.group,
            e.size,
            e.created_at.format("%b %e %H:%M"),
            ow = self.owner,
            gw = self.group,
            sw = self.size,
        )
    }
}
