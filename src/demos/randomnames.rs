//! Random names: each call shows a different name from a fixed list

use rand::Rng;
use serde_json::{json, Value};

use crate::wires::{fields, FieldSet, Reply, Wires, WiresError};

const NAMES: [(&str, &str); 7] = [
    ("David", "Bowie"),
    ("Janis", "Joplin"),
    ("Freddie", "Mercury"),
    ("Joni", "Mitchell"),
    ("Jimi", "Hendrix"),
    ("Debbie", "Harry"),
    ("Elton", "John"),
];

pub fn handler(wires: &mut Wires<'_>) -> Result<String, WiresError> {
    wires.page().title = "Wires Demo: Random Names".to_string();

    let defaults = fields::from_json(json!({
        "fname": "",
        "lname": "",
        "last_index": -1,
    }));
    wires.handle(defaults, |res| next_name(res, &mut rand::thread_rng()))
}

fn next_name<R: Rng>(mut res: FieldSet, rng: &mut R) -> Reply {
    let last = res.get("last_index").and_then(as_index);

    let mut index = rng.gen_range(0..NAMES.len());
    while Some(index) == last {
        index = rng.gen_range(0..NAMES.len());
    }

    let (fname, lname) = NAMES[index];
    res.insert("fname".to_string(), Value::from(fname));
    res.insert("lname".to_string(), Value::from(lname));
    res.insert("last_index".to_string(), Value::from(index));
    Ok(Some(res))
}

/// Posted indexes may come back as numbers or numeric strings
fn as_index(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_never_repeats_last_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut res = fields::from_json(json!({"fname": "", "lname": "", "last_index": -1}));
        for _ in 0..200 {
            let last = res["last_index"].clone();
            res = next_name(res, &mut rng).unwrap().unwrap();
            assert_ne!(res["last_index"], last);

            let index = as_index(&res["last_index"]).unwrap();
            assert_eq!(res["fname"], NAMES[index].0);
            assert_eq!(res["lname"], NAMES[index].1);
        }
    }

    #[test]
    fn test_string_index_is_honored() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let res = fields::from_json(json!({"last_index": "3"}));
            let out = next_name(res, &mut rng).unwrap().unwrap();
            assert_ne!(out["last_index"], json!(3));
        }
    }

    #[test]
    fn test_as_index() {
        assert_eq!(as_index(&json!(-1)), None);
        assert_eq!(as_index(&json!(6)), Some(6));
        assert_eq!(as_index(&json!(" 2 ")), Some(2));
        assert_eq!(as_index(&Value::Null), None);
    }
}
