//! Checkbox substitution.

use super::Transform;

/// `<en-todo>` variants Evernote writes, with their text replacement.
const TODO_MARKERS: &[(&str, &str)] = &[
    (r#"<en-todo checked="true"/>"#, "[x] "),
    (r#"<en-todo checked="false"/>"#, "[ ] "),
    (r#"<en-todo checked="true" />"#, "[x] "),
    (r#"<en-todo checked="false" />"#, "[ ] "),
];

/// Replaces checked/unchecked `<en-todo>` markers with `[x] ` / `[ ] `.
pub struct TaskCheckboxes;

impl Transform for TaskCheckboxes {
    fn transform(&mut self, content: &mut String) {
        if !content.contains("<en-todo") {
            return;
        }
        for (marker, replacement) in TODO_MARKERS {
            if content.contains(marker) {
                *content = content.replace(marker, replacement);
            }
        }
    }
}
