//! Text inputs bound to fields, plus a button that randomizes the age

use rand::Rng;
use serde_json::{json, Value};

use crate::wires::{fields, FieldSet, Reply, Wires, WiresError};

const AGES: std::ops::RangeInclusive<u32> = 18..=72;

pub fn handler(wires: &mut Wires<'_>) -> Result<String, WiresError> {
    wires.page().title = "Wires Demo: Inputs".to_string();

    let defaults = fields::from_json(json!({
        "name": "Joe",
        "age": "27",
    }));
    wires.handle(defaults, |res| randomize(res, &mut rand::thread_rng()))
}

/// Pick a new age when the caller asked for one; otherwise no changes
fn randomize<R: Rng>(mut res: FieldSet, rng: &mut R) -> Reply {
    if !res.contains_key("random") {
        return Ok(None);
    }
    res.insert("age".to_string(), Value::from(rng.gen_range(AGES)));
    Ok(Some(res))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_changes_without_random() {
        let mut rng = StdRng::seed_from_u64(7);
        let res = fields::from_json(json!({"name": "Ann", "age": "30"}));
        assert_eq!(randomize(res, &mut rng), Ok(None));
    }

    #[test]
    fn test_random_age_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let res = fields::from_json(json!({"name": "Ann", "age": "30", "random": "1"}));
            let out = randomize(res, &mut rng).unwrap().unwrap();
            let age = out["age"].as_u64().unwrap();
            assert!((18..=72).contains(&age), "{age}");
            assert_eq!(out["name"], "Ann");
        }
    }
}
