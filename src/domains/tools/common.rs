//! Helpers shared by the tool definitions: argument parsing and validation,
//! and result formatting.

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;

/// Language used when a tool argument leaves it out.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default and ceiling for `maxResults`.
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const MAX_RESULTS_LIMIT: u32 = 100;

/// Checks run on tool parameters after deserialization and before any
/// remote call.
pub trait ValidateParams {
    fn validate(&self) -> Result<(), ToolError>;
}

/// Deserialize and validate raw tool arguments.
pub fn parse_params<P>(arguments: Option<JsonObject>) -> Result<P, ToolError>
where
    P: DeserializeOwned + ValidateParams,
{
    let params: P = serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
    params.validate()?;
    Ok(params)
}

/// Check that a string looks like an Android application id.
///
/// Application ids have at least two dot-separated segments; each segment
/// starts with a letter and continues with letters, digits or underscores.
/// Example: `com.example.app`
pub fn is_package_name(name: &str) -> bool {
    let segments: Vec<&str> = name.split('.').collect();
    segments.len() >= 2
        && segments.iter().all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

pub fn validate_package_name(name: &str) -> Result<(), ToolError> {
    if is_package_name(name) {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(format!(
            "packageName '{}' is not a valid application id (expected e.g. com.example.app)",
            name
        )))
    }
}

/// Check a BCP-47 style language tag such as `en-US` or `de`.
pub fn validate_language(language: &str) -> Result<(), ToolError> {
    let valid = !language.is_empty()
        && language.len() <= 35
        && language.split('-').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric())
        });
    if valid {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(format!(
            "language '{}' is not a language code (expected e.g. en-US)",
            language
        )))
    }
}

/// Check that an optional text field stays within `max` characters.
pub fn validate_text_length(field: &str, value: Option<&str>, max: usize) -> Result<(), ToolError> {
    match value {
        Some(text) if text.chars().count() > max => Err(ToolError::invalid_arguments(format!(
            "{} must be at most {} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

/// Create a success result with text content.
pub fn success_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Create a success result holding pretty-printed JSON.
pub fn json_result(value: &Value) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ToolError::internal(format!("cannot serialize response: {}", e)))?;
    Ok(success_result(text))
}

/// Text of the first content item of a result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> String {
    use rmcp::model::RawContent;

    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {:?}", other),
    }
}
