// Shared prompt constants and prompt-building utilities.
// Each flow defines its own templates in flows/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every bilingual generation prompt.
pub const BILINGUAL_INSTRUCTION: &str = "\
    Write the Japanese text first, in natural and polite business Japanese suited to Japanese corporate culture. \
    Then write the English text as a faithful, idiomatic rendering for a global business audience. \
    Both texts must carry the same facts. Do NOT invent achievements, numbers, or names that were not provided.";

/// Joins a role description with the JSON-only rule into a full system prompt.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}
