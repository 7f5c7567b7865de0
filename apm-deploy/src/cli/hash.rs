use serde_json::json;

use crate::domain::{label_hash, namehash, normalize};
use crate::error::Result;

use super::print_json;

pub fn run(name: &str, json: bool) -> Result<i32> {
    let name = normalize(name);
    let label = name.split('.').next().unwrap_or_default();
    let node = namehash(&name);
    let label_hash = label_hash(label);

    if json {
        print_json(&json!({
            "name": name,
            "namehash": node,
            "label": label,
            "labelhash": label_hash,
        }))?;
    } else {
        println!("Name:  {name} ({node})");
        println!("Label: {label} ({label_hash})");
    }

    Ok(0)
}
