//! Text format
//!
//! The todo file is line oriented and meant to be edited by hand:
//!
//! ```text
//! # Todo
//!
//! ## Work
//!
//! 1. Write report
//! 2. Review PR
//!
//! # Done
//!
//! ## Home
//!
//! 1. Dishes
//! ```
//!
//! Task numbers are regenerated on every write and ignored on read; order
//! comes from line order. Parsing never fails. Lines that do not fit the
//! structure (unknown sections, tasks outside any list) are reported as
//! warnings and skipped.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::models::{Document, Section, TaskLists};

/// Content of a freshly created todo file
pub const SKELETON: &str = "# Todo\n\n# Done\n";

const SECTION_PREFIX: &str = "# ";
const LIST_PREFIX: &str = "## ";

fn task_marker() -> &'static Regex {
    static TASK_MARKER: OnceLock<Regex> = OnceLock::new();
    TASK_MARKER.get_or_init(|| Regex::new(r"^\d+\.\s(.*)$").expect("task marker regex is valid"))
}

/// A parsed file together with everything that was skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub document: Document,
    pub warnings: Vec<ParseWarning>,
}

/// A line that could not be placed in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// `# Something` other than Todo or Done
    UnknownSection(String),
    /// A task line with no list header before it
    OrphanTask(String),
    /// A list header before any section header
    ListOutsideSection(String),
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnknownSection(name) => {
                write!(f, "line {}: unknown section '{}'", self.line, name)
            }
            WarningKind::OrphanTask(task) => {
                write!(f, "line {}: task '{}' found without a list", self.line, task)
            }
            WarningKind::ListOutsideSection(name) => {
                write!(f, "line {}: list '{}' found outside of a section", self.line, name)
            }
        }
    }
}

/// Parse the text of a todo file
pub fn parse(text: &str) -> Parsed {
    let mut parsed = Parsed::default();
    let mut section: Option<Section> = None;
    let mut list: Option<String> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(SECTION_PREFIX) {
            let header = header.trim();
            match Section::from_header(header) {
                Some(found) => {
                    section = Some(found);
                    list = None;
                }
                None => parsed.warn(line_no, WarningKind::UnknownSection(header.to_string())),
            }
        } else if let Some(name) = line.strip_prefix(LIST_PREFIX) {
            let name = name.trim().to_string();
            match section {
                Some(current) => {
                    parsed
                        .document
                        .section_mut(current)
                        .insert(name.clone(), Vec::new());
                    list = Some(name);
                }
                None => {
                    parsed.warn(line_no, WarningKind::ListOutsideSection(name));
                    list = None;
                }
            }
        } else {
            let task = match task_marker().captures(line) {
                Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
                None => line.to_string(),
            };

            let target = match (section, list.as_deref()) {
                (Some(current), Some(name)) => parsed.document.section_mut(current).get_mut(name),
                _ => None,
            };
            match target {
                Some(tasks) => tasks.push(task),
                None => parsed.warn(line_no, WarningKind::OrphanTask(task)),
            }
        }
    }

    parsed
}

impl Parsed {
    fn warn(&mut self, line: usize, kind: WarningKind) {
        let warning = ParseWarning { line, kind };
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Serialize a document to the text format
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    write_section(&mut out, Section::Todo, &doc.todo);
    write_section(&mut out, Section::Done, &doc.done);
    out
}

fn write_section(out: &mut String, section: Section, lists: &TaskLists) {
    out.push_str(SECTION_PREFIX);
    out.push_str(section.header());
    out.push_str("\n\n");

    for (name, tasks) in lists {
        out.push_str(LIST_PREFIX);
        out.push_str(name);
        out.push_str("\n\n");
        for (i, task) in tasks.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, task));
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_skeleton() {
        let parsed = parse(SKELETON);
        assert!(parsed.document.todo.is_empty());
        assert!(parsed.document.done.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_parse_sections_and_lists() {
        let text = "# Todo\n\n## Work\n\n1. Write report\n2. Review PR\n\n## Empty\n\n\
                    # Done\n\n## Home\n\n1. Dishes\n";
        let parsed = parse(text);

        assert!(parsed.warnings.is_empty());
        let doc = parsed.document;
        assert_eq!(doc.todo["Work"], tasks(&["Write report", "Review PR"]));
        assert!(doc.todo["Empty"].is_empty());
        assert_eq!(doc.done["Home"], tasks(&["Dishes"]));
        assert_eq!(doc.todo.keys().collect::<Vec<_>>(), vec!["Work", "Empty"]);
    }

    #[test]
    fn test_numbers_are_not_trusted() {
        let text = "# Todo\n## Work\n7. first\n3. second\n3. third\n";
        let doc = parse(text).document;
        assert_eq!(doc.todo["Work"], tasks(&["first", "second", "third"]));
    }

    #[test]
    fn test_plain_lines_are_tasks() {
        let text = "# Todo\n## Work\n  just some text  \n- bullet\n1.no space\n";
        let doc = parse(text).document;
        assert_eq!(
            doc.todo["Work"],
            tasks(&["just some text", "- bullet", "1.no space"])
        );
    }

    #[test]
    fn test_marker_content_is_kept_verbatim() {
        let doc = parse("# Todo\n## Work\n1. 2. nested\n").document;
        assert_eq!(doc.todo["Work"], tasks(&["2. nested"]));
    }

    #[test]
    fn test_unknown_section_keeps_previous_section() {
        let text = "# Todo\n## Work\n1. A\n# Later\n2. B\n## Ideas\n1. C\n";
        let parsed = parse(text);

        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].line, 4);
        assert_eq!(
            parsed.warnings[0].kind,
            WarningKind::UnknownSection("Later".to_string())
        );
        assert_eq!(parsed.document.todo["Work"], tasks(&["A", "B"]));
        assert_eq!(parsed.document.todo["Ideas"], tasks(&["C"]));
        assert!(parsed.document.done.is_empty());
    }

    #[test]
    fn test_section_headers_are_case_sensitive() {
        let parsed = parse("# todo\n## Work\n1. A\n");
        assert_eq!(parsed.warnings.len(), 3);
        assert!(parsed.document.todo.is_empty());
    }

    #[test]
    fn test_orphan_tasks_are_dropped() {
        let text = "# Todo\n1. stray\n## Work\n1. A\n# Done\nalso stray\n";
        let parsed = parse(text);

        assert_eq!(
            parsed.warnings,
            vec![
                ParseWarning {
                    line: 2,
                    kind: WarningKind::OrphanTask("stray".to_string())
                },
                ParseWarning {
                    line: 6,
                    kind: WarningKind::OrphanTask("also stray".to_string())
                },
            ]
        );
        assert_eq!(parsed.document.todo["Work"], tasks(&["A"]));
        assert!(parsed.document.done.is_empty());
    }

    #[test]
    fn test_list_before_any_section() {
        let parsed = parse("## Loose\n1. A\n# Todo\n## Work\n");

        assert_eq!(
            parsed.warnings[0].kind,
            WarningKind::ListOutsideSection("Loose".to_string())
        );
        assert_eq!(
            parsed.warnings[1].kind,
            WarningKind::OrphanTask("A".to_string())
        );
        assert!(parsed.document.todo.contains_key("Work"));
        assert!(!parsed.document.todo.contains_key("Loose"));
    }

    #[test]
    fn test_repeated_list_header_resets_list() {
        let doc = parse("# Todo\n## Work\n1. A\n## Work\n1. B\n").document;
        assert_eq!(doc.todo["Work"], tasks(&["B"]));
    }

    #[test]
    fn test_same_list_name_in_both_sections() {
        let doc = parse("# Todo\n## Work\n1. A\n# Done\n## Work\n1. B\n").document;
        assert_eq!(doc.todo["Work"], tasks(&["A"]));
        assert_eq!(doc.done["Work"], tasks(&["B"]));
    }

    #[test]
    fn test_serialize_format() {
        let mut doc = Document::new();
        doc.todo.insert("Work".to_string(), tasks(&["A", "B"]));
        doc.todo.insert("Empty".to_string(), Vec::new());
        doc.done.insert("Home".to_string(), tasks(&["Dishes"]));

        assert_eq!(
            serialize(&doc),
            "# Todo\n\n## Work\n\n1. A\n2. B\n\n## Empty\n\n\n# Done\n\n## Home\n\n1. Dishes\n\n"
        );
    }

    #[test]
    fn test_serialize_empty_document() {
        assert_eq!(serialize(&Document::new()), "# Todo\n\n# Done\n\n");
    }

    #[test]
    fn test_parse_serialize_preserves_content() {
        let mut doc = Document::new();
        doc.todo.insert(
            "Work & Play".to_string(),
            tasks(&["3. looks numbered", "# not a header", "## not a list", "dup", "dup"]),
        );
        doc.todo.insert("Empty".to_string(), Vec::new());
        doc.todo.insert("Ünïcödé".to_string(), tasks(&["日本語のタスク"]));
        doc.done.insert("Work & Play".to_string(), tasks(&["finished"]));
        doc.done.insert("Archive".to_string(), Vec::new());

        let parsed = parse(&serialize(&doc));

        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.document, doc);
        assert_eq!(
            parsed.document.todo.keys().collect::<Vec<_>>(),
            doc.todo.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_serialization_is_stable() {
        let text = "# Todo\n## Work\n9. A\nB\n# Done\n";
        let once = serialize(&parse(text).document);
        let twice = serialize(&parse(&once).document);
        assert_eq!(once, twice);
    }
}
