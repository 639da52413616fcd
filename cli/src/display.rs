use std::fmt::Write;

use todo_core::{Status, Todo};

/// Render the todos the filter lets through, one per line.
pub fn render(todos: &[Todo], filter: Option<Status>) -> String {
    let mut out = String::new();
    let visible = todos
        .iter()
        .filter(|t| filter.map_or(true, |status| t.status == status));
    for todo in visible {
        let mark = match todo.status {
            Status::Done => 'x',
            Status::NotDone => ' ',
        };
        let id = todo.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        let _ = writeln!(out, "[{mark}] {id}  {}", todo.text);
    }
    if out.is_empty() {
        out.push_str("no todos\n");
    }
    out
}
