//! Blueprint text output and sharing

use crate::blueprint::types::Blueprint;
use crate::core::BlueprintResult;
use base64::Engine;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+$").expect("Invalid trailing number regex"));

/// Pretty JSON with four-space indentation
pub fn to_pretty_json(blueprint: &Blueprint) -> BlueprintResult<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    blueprint.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Playground URL that boots straight into the blueprint
pub fn playground_link(blueprint: &Blueprint, playground_url: &str) -> BlueprintResult<String> {
    let json = to_pretty_json(blueprint)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(json.as_bytes());
    Ok(format!(
        "{}?blueprint-url=data:application/json;base64,{}",
        playground_url,
        urlencoding::encode(&encoded)
    ))
}

/// Next name in a series: `Site 3` becomes `Site 4`, `Site` becomes `Site V2`
pub fn suggest_name(name: &str) -> String {
    if let Some(m) = TRAILING_NUMBER.find(name) {
        if let Ok(n) = m.as_str().parse::<u64>() {
            if let Some(next) = n.checked_add(1) {
                return format!("{}{}", &name[..m.start()], next);
            }
        }
    }
    format!("{} V2", name)
}
