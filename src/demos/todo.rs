//! To-do list kept client side; the server logs and echoes what it receives

use serde_json::json;

use crate::logger;
use crate::wires::{fields, FieldSet, Reply, Wires, WiresError};

const TAILWIND: &str = "https://cdnjs.cloudflare.com/ajax/libs/tailwindcss/1.2.0/tailwind.min.css";

pub fn handler(wires: &mut Wires<'_>) -> Result<String, WiresError> {
    let page = wires.page();
    page.title = "To Do List".to_string();
    page.add_style(TAILWIND);

    let defaults = fields::from_json(json!({
        "todos": [
            {"todo": "Item one", "completed": false},
            {"todo": "Item two", "completed": false},
            {"todo": "Item three", "completed": true},
        ],
        "new_todo": "",
    }));
    wires.handle(defaults, echo)
}

fn echo(res: FieldSet) -> Reply {
    match serde_json::to_string(&res) {
        Ok(json) => logger::log_info(&format!("[todo] {json}")),
        Err(e) => logger::log_warning(&format!("[todo] unprintable params: {e}")),
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_keeps_params() {
        let res = fields::from_json(json!({"todos": [{"todo": "x", "completed": true}]}));
        assert_eq!(echo(res), Ok(None));
    }
}
