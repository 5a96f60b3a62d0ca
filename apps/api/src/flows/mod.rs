// Generation flows: trend watcher, profile creation, post generation, suggested comments.
// All model calls go through llm_client::ModelInvoker: no direct API calls here.
//
// The trend flow is lenient (normalize and degrade to an empty list).
// The bilingual flows are strict (any malformed answer is an LLM error).

pub mod clock;
pub mod comments;
pub mod handlers;
pub mod normalize;
pub mod post;
pub mod profile;
pub mod prompts;
pub mod schema;
pub mod trends;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::ModelInvoker;

/// Output of a strict flow: a Japanese and an English text, both required.
pub trait BilingualOutput: DeserializeOwned {
    /// `(field name, value)` pairs, in schema order.
    fn texts(&self) -> [(&'static str, &str); 2];
}

/// Invokes the model and deserializes a bilingual answer, rejecting blank texts.
pub(crate) async fn run_bilingual_flow<T: BilingualOutput>(
    llm: &dyn ModelInvoker,
    flow: &str,
    prompt: &str,
    role: &str,
) -> Result<T, AppError> {
    let raw = llm
        .invoke(prompt, &system_prompt(role))
        .await
        .map_err(|e| AppError::Llm(format!("{flow} failed: {e}")))?;

    let output: T = serde_json::from_value(raw)
        .map_err(|e| AppError::Llm(format!("{flow} returned an unexpected shape: {e}")))?;

    if let Some((field, _)) = output.texts().into_iter().find(|(_, text)| text.trim().is_empty()) {
        return Err(AppError::Llm(format!("{flow} returned an empty '{field}'")));
    }

    info!("{flow} completed");
    Ok(output)
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
///
/// Inserted values are never rescanned, so a value that itself contains
/// `{name}` ends up in the output verbatim. Unknown placeholders are kept.
pub(crate) fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = after.find('}').and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match hit {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Rejects values whose trimmed length (in characters) falls outside `min..=max`.
pub(crate) fn require_length(
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), AppError> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(AppError::Validation(if min <= 1 {
            format!("{field} cannot be empty")
        } else {
            format!("{field} must be at least {min} characters")
        }));
    }
    if let Some(max) = max {
        if len > max {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}
