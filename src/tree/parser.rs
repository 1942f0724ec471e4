use super::{Node, NodeKind, ParseWarning, WarningReason};
use crate::rules;
use tracing::warn;

/// Best-effort, line-local parser for freeform tree sketches. Never fails:
/// lines that cannot be attached are skipped and reported as warnings.
pub struct TreeParser;

pub struct ParseResult {
    pub roots: Vec<Node>,
    pub warnings: Vec<ParseWarning>,
}

impl TreeParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str) -> ParseResult {
        let text = strip_decorations(raw);
        let mut roots = Vec::new();
        let mut warnings = Vec::new();
        // Open frames, shallowest first. A frame's node collects its
        // children and attaches to the frame below it when popped.
        let mut stack: Vec<(usize, Node)> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_number = idx + 1;
            let (level, rest) = indent_level(line);

            // blank lines and bare connector lines carry no entry
            if rest.trim().is_empty() {
                continue;
            }

            let label = strip_annotation(rest);
            let Some((name, kind)) = classify(label) else {
                warn!(line_number, line = line.trim(), "skipping line with no usable name");
                warnings.push(ParseWarning {
                    line_number,
                    line: line.trim().to_string(),
                    reason: WarningReason::EmptyName,
                });
                continue;
            };

            while stack.last().map_or(false, |(l, _)| *l >= level) {
                if let Some((_, done)) = stack.pop() {
                    attach(done, &mut stack, &mut roots);
                }
            }

            // a file cannot hold children; drop the line, keep parsing
            if let Some((_, parent)) = stack.last() {
                if parent.kind == NodeKind::File {
                    warn!(line_number, parent = %parent.name, "skipping child of file entry");
                    warnings.push(ParseWarning {
                        line_number,
                        line: line.trim().to_string(),
                        reason: WarningReason::ChildOfFile,
                    });
                    continue;
                }
            }

            let node = match kind {
                NodeKind::Folder => Node::folder(name),
                NodeKind::File => Node::file(name),
            };
            stack.push((level, node));
        }

        while let Some((_, done)) = stack.pop() {
            attach(done, &mut stack, &mut roots);
        }

        ParseResult { roots, warnings }
    }
}

fn attach(done: Node, stack: &mut Vec<(usize, Node)>, roots: &mut Vec<Node>) {
    match stack.last_mut() {
        Some((_, parent)) => parent.children.push(done),
        None => roots.push(done),
    }
}

/// Folder and file glyphs people paste in front of names.
const DECORATIVE: &[char] = &[
    '📁', '📂', '📄', '🗂', '🗃', '🗄', '📦', '⚙', '🔧', '📝', '📃', '🌳', '\u{FE0F}',
];

fn strip_decorations(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .chars()
        .filter(|c| !DECORATIVE.contains(c))
        .collect()
}

/// Measures the leading run of whitespace and tree-drawing glyphs in
/// two-character units. Branch connectors count toward the run, so
/// `├── src/` sits one unit deeper than an unindented parent and glyph
/// trees line up with two-space trees.
fn indent_level(line: &str) -> (usize, &str) {
    let mut width = 0usize;

    for (i, ch) in line.char_indices() {
        match ch {
            ' ' | '\u{00A0}' | '│' | '|' | '├' | '└' | '─' | '┬' | '┼' | '┤' => width += 1,
            '\t' => width += 2,
            _ => return (width / 2, &line[i..]),
        }
    }

    (width / 2, "")
}

/// Drops trailing inline commentary: `#`, `//`, `--` after whitespace, or a
/// parenthetical. The remainder is the entry's raw label.
fn strip_annotation(label: &str) -> &str {
    let mut cut = label.len();

    for marker in ["#", "//", "--"] {
        if let Some(i) = find_marker(label, marker) {
            cut = cut.min(i);
        }
    }
    if let Some(i) = label.find('(') {
        cut = cut.min(i);
    }

    &label[..cut]
}

fn find_marker(label: &str, marker: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(pos) = label[start..].find(marker) {
        let i = start + pos;
        if i == 0 || label[..i].ends_with(char::is_whitespace) {
            return Some(i);
        }
        start = i + marker.len();
    }
    None
}

fn classify(label: &str) -> Option<(String, NodeKind)> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let had_slash = label.ends_with('/') || label.ends_with('\\');
    let name = label
        .trim_end_matches(|c| c == '/' || c == '\\')
        .trim()
        .to_string();
    if name.is_empty() {
        return None;
    }

    let kind = if had_slash {
        NodeKind::Folder
    } else if rules::is_known_extensionless_file(&name) {
        NodeKind::File
    } else if rules::is_known_folder(&name) || !name.contains('.') {
        NodeKind::Folder
    } else {
        NodeKind::File
    };

    Some((name, kind))
}
