//! Post generation: a Japanese long-form LinkedIn post and its English translation.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::prompts::{POST_PROMPT_TEMPLATE, POST_SYSTEM};
use crate::flows::schema::POST_OUTPUT_SCHEMA;
use crate::flows::{render_template, require_length, run_bilingual_flow, BilingualOutput};
use crate::llm_client::prompts::BILINGUAL_INSTRUCTION;
use crate::llm_client::ModelInvoker;

#[derive(Debug, Clone, Deserialize)]
pub struct PostInput {
    pub topic: String,
    pub keywords: String,
    /// e.g. professional, friendly, authoritative
    pub tone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOutput {
    pub japanese_post: String,
    pub english_post: String,
}

impl BilingualOutput for PostOutput {
    fn texts(&self) -> [(&'static str, &str); 2] {
        [
            ("japanesePost", self.japanese_post.as_str()),
            ("englishPost", self.english_post.as_str()),
        ]
    }
}

impl PostInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_length("topic", &self.topic, 1, None)?;
        require_length("keywords", &self.keywords, 1, None)?;
        require_length("tone", &self.tone, 1, None)
    }
}

pub fn build_post_prompt(input: &PostInput) -> String {
    let output_schema = POST_OUTPUT_SCHEMA.render();

    render_template(
        POST_PROMPT_TEMPLATE,
        &[
            ("topic", input.topic.as_str()),
            ("keywords", input.keywords.as_str()),
            ("tone", input.tone.as_str()),
            ("bilingual_instruction", BILINGUAL_INSTRUCTION),
            ("output_schema", output_schema.as_str()),
        ],
    )
}

pub async fn generate_post(llm: &dyn ModelInvoker, input: &PostInput) -> Result<PostOutput, AppError> {
    let prompt = build_post_prompt(input);
    run_bilingual_flow(llm, "Post generation", &prompt, POST_SYSTEM).await
}
