//! `gitsap convert`: rewrites the keys of a JSON document.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use client::KeyCase;
use serde_json::Value;

/// Reads the document from `file`, or from stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = file {
        let text = std::fs::read_to_string(path);
        return text.with_context(|| format!("failed to read {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

/// Converts every key of the JSON document in `text` to `case`, pretty-printed.
pub fn convert_document(text: &str, case: KeyCase) -> anyhow::Result<String> {
    let document: Value = serde_json::from_str(text).context("input is not JSON")?;
    let converted = case.convert(document);
    Ok(serde_json::to_string_pretty(&converted)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_keys_to_camel_case() {
        let text = r#"{"user_id": 1, "recent_items": [{"item_id": 7}]}"#;

        let output = convert_document(text, KeyCase::Camel).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!({"userId": 1, "recentItems": [{"itemId": 7}]})
        );
    }

    #[test]
    fn snake_case_output_is_pretty_printed() {
        let text = r#"{"pageSize": 10}"#;
        let output = convert_document(text, KeyCase::Snake).unwrap();
        assert_eq!(output, "{\n  \"page_size\": 10\n}");
    }

    #[test]
    fn rejects_invalid_json() {
        let input = "{user_id: 1}";
        let error = convert_document(input, KeyCase::Camel).unwrap_err();
        assert_eq!(error.to_string(), "input is not JSON");
    }

    #[test]
    fn reads_input_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("gitsap-convert-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"user_id": 1}"#).unwrap();

        let text = read_input(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, r#"{"user_id": 1}"#);

        let missing = dir.join("gitsap-convert-missing.json");
        let error = read_input(Some(&missing)).unwrap_err();
        assert!(error.to_string().starts_with("failed to read"));
    }
}
