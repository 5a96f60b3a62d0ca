//! Trend watcher: keyword in, normalized trend analyses out.
//!
//! Flow: build_trend_prompt → ModelInvoker::invoke → normalize_trends.
//!
//! This flow never fails. An invocation error is logged and treated as an
//! empty model response, so the caller sees the same `{ trends: [] }` it would
//! see for a garbage or empty answer.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::flows::clock::Clock;
use crate::flows::normalize::{normalize_trends, TrendItem};
use crate::flows::prompts::{TREND_PROMPT_TEMPLATE, TREND_SYSTEM};
use crate::flows::render_template;
use crate::flows::schema::{ANALYZED_TRENDS, TREND_OUTPUT_SCHEMA};
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::ModelInvoker;

#[derive(Debug, Clone, Deserialize)]
pub struct TrendInput {
    pub keywords: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendOutput {
    pub trends: Vec<TrendItem>,
}

/// Renders the trend prompt. Keywords are inserted verbatim.
pub fn build_trend_prompt(input: &TrendInput) -> String {
    let keywords = [("keywords", input.keywords.as_str())];
    let output_schema = render_template(&TREND_OUTPUT_SCHEMA.render(), &keywords);

    render_template(
        TREND_PROMPT_TEMPLATE,
        &[keywords[0], ("output_schema", output_schema.as_str())],
    )
}

/// Runs the trend watcher end to end.
pub async fn analyze_trends(
    llm: &dyn ModelInvoker,
    clock: &dyn Clock,
    input: &TrendInput,
) -> TrendOutput {
    let prompt = build_trend_prompt(input);

    let raw = match llm.invoke(&prompt, &system_prompt(TREND_SYSTEM)).await {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Trend analysis call failed for '{}': {e}", input.keywords);
            None
        }
    };

    let trends = normalize_trends(raw.as_ref(), &ANALYZED_TRENDS, clock);
    info!(
        "Trend analysis for '{}' produced {} trends",
        input.keywords,
        trends.len()
    );

    TrendOutput { trends }
}
