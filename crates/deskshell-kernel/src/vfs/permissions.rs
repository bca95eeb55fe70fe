//! Cosmetic Unix permission strings.
//!
//! Nothing is enforced: permissions exist so `ls -l` and `chmod` look right.
//! The stored form is a type character plus nine mode bits, which keeps the
//! rendered string on the `[-d]([r-][w-][x-]){3}` pattern by construction.

use std::fmt;

use deskshell_types::NodeKind;

use super::error::{VfsError, VfsResult};

const FILE_DEFAULT: u16 = 0o644;
const DIR_DEFAULT: u16 = 0o755;

/// Permission bits for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    kind: NodeKind,
    bits: u16,
}

impl Permissions {
    /// `-rw-r--r--` for files, `drwxr-xr-x` for directories.
    pub fn default_for(kind: NodeKind) -> Self {
        let bits = match kind {
            NodeKind::File => FILE_DEFAULT,
            NodeKind::Directory => DIR_DEFAULT,
        };
        Self { kind, bits }
    }

    /// Parse a rendered 10-character string such as `drwxr-xr-x`.
    pub fn parse(s: &str) -> VfsResult<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 10 {
            return Err(VfsError::InvalidMode(s.to_string()));
        }
        let kind = match chars[0] {
            '-' => NodeKind::File,
            'd' => NodeKind::Directory,
            _ => return Err(VfsError::InvalidMode(s.to_string())),
        };
        let mut bits = 0u16;
        for (i, c) in chars[1..].iter().enumerate() {
            let expected = ['r', 'w', 'x'][i % 3];
            bits <<= 1;
            if *c == expected {
                bits |= 1;
            } else if *c != '-' {
                return Err(VfsError::InvalidMode(s.to_string()));
            }
        }
        Ok(Self { kind, bits })
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The nine mode bits, e.g. `0o755`.
    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Apply a `chmod` mode: three octal digits, or comma-separated
    /// symbolic clauses of the form `[ugoa]*[+-=][rwx]*`.
    pub fn apply_mode(&self, mode: &str) -> VfsResult<Self> {
        let invalid = || VfsError::InvalidMode(mode.to_string());

        if mode.len() == 3 && mode.chars().all(|c| c.is_ascii_digit()) {
            let bits = u16::from_str_radix(mode, 8).map_err(|_| invalid())?;
            return Ok(Self {
                kind: self.kind,
                bits,
            });
        }

        let mut bits = self.bits;
        for clause in mode.split(',') {
            let op_at = clause.find(['+', '-', '=']).ok_or_else(invalid)?;
            let (who, rest) = clause.split_at(op_at);
            let mut rest = rest.chars();
            let op = rest.next().ok_or_else(invalid)?;

            let mut who_mask = 0u16;
            for c in who.chars() {
                who_mask |= match c {
                    'u' => 0o700,
                    'g' => 0o070,
                    'o' => 0o007,
                    'a' => 0o777,
                    _ => return Err(invalid()),
                };
            }
            if who_mask == 0 {
                who_mask = 0o777;
            }

            let mut perm = 0u16;
            for c in rest {
                perm |= match c {
                    'r' => 0o444,
                    'w' => 0o222,
                    'x' => 0o111,
                    _ => return Err(invalid()),
                };
            }
            let selected = perm & who_mask;

            bits = match op {
                '+' => bits | selected,
                '-' => bits & !selected,
                _ => (bits & !who_mask) | selected,
            };
        }

        Ok(Self {
            kind: self.kind,
            bits,
        })
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_char = match self.kind {
            NodeKind::File => '-',
            NodeKind::Directory => 'd',
        };
        let mut out = String::with_capacity(10);
        out.push(type_char);
        for i in (0..9).rev() {
            let set = self.bits & (1 << i) != 0;
            out.push(if set { ['x', 'w', 'r'][i % 3] } else { '-' });
        }
        f.write_str(&out)
    }
}
