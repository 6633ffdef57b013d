//! Plain-text display blocks
//!
//! Produces the text shown by `view`. Styling and paging are left to the
//! presentation layer.

use crate::models::{Document, Section, TaskLists};

/// One section: its header followed by every list
pub fn render_section(section: Section, lists: &TaskLists) -> String {
    let mut out = format!("# {}\n", section);
    for (name, tasks) in lists {
        push_list(&mut out, name, tasks);
    }
    out
}

/// Both sections, Todo first
pub fn render_all(doc: &Document) -> String {
    let mut out = render_section(Section::Todo, &doc.todo);
    out.push('\n');
    out.push_str(&render_section(Section::Done, &doc.done));
    out
}

/// A single list under its section header
pub fn render_list(section: Section, name: &str, tasks: &[String]) -> String {
    let mut out = format!("# {}\n", section);
    push_list(&mut out, name, tasks);
    out
}

fn push_list(out: &mut String, name: &str, tasks: &[String]) {
    out.push_str(&format!("\n## {}\n", name));
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.todo
            .insert("Work".to_string(), vec!["A".to_string(), "B".to_string()]);
        doc.done.insert("Home".to_string(), vec!["Dishes".to_string()]);
        doc
    }

    #[test]
    fn test_render_section() {
        let doc = doc();
        assert_eq!(
            render_section(Section::Todo, &doc.todo),
            "# Todo\n\n## Work\n1. A\n2. B\n"
        );
        assert_eq!(render_section(Section::Done, &TaskLists::new()), "# Done\n");
    }

    #[test]
    fn test_render_all() {
        assert_eq!(
            render_all(&doc()),
            "# Todo\n\n## Work\n1. A\n2. B\n\n# Done\n\n## Home\n1. Dishes\n"
        );
    }

    #[test]
    fn test_render_list() {
        let doc = doc();
        let tasks = doc.list(Section::Done, "Home").unwrap();
        assert_eq!(
            render_list(Section::Done, "Home", tasks),
            "# Done\n\n## Home\n1. Dishes\n"
        );
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(Section::Todo, "Empty", &[]), "# Todo\n\n## Empty\n");
    }
}
