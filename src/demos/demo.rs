//! Basic demo: a name and a list that the first API call replaces

use serde_json::json;

use crate::wires::{fields, FieldSet, Reply, Wires, WiresError};

pub fn handler(wires: &mut Wires<'_>) -> Result<String, WiresError> {
    wires.page().title = "Wires Demo".to_string();

    let defaults = fields::from_json(json!({
        "name": "Joe",
        "list": ["One", "Two", "Three"],
    }));
    wires.handle(defaults, load_more)
}

fn load_more(mut res: FieldSet) -> Reply {
    res.insert("list".to_string(), json!(["Four", "Five"]));
    Ok(Some(res))
}
