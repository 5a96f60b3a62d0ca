//! Suggested comments: a reply to someone else's LinkedIn post, in the CEO's voice.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::prompts::{COMMENT_PROMPT_TEMPLATE, COMMENT_SYSTEM};
use crate::flows::schema::COMMENT_OUTPUT_SCHEMA;
use crate::flows::{render_template, require_length, run_bilingual_flow, BilingualOutput};
use crate::llm_client::prompts::BILINGUAL_INSTRUCTION;
use crate::llm_client::ModelInvoker;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub post_content: String,
    pub ceo_profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentOutput {
    pub english_comment: String,
    pub japanese_comment: String,
}

impl BilingualOutput for CommentOutput {
    fn texts(&self) -> [(&'static str, &str); 2] {
        [
            ("englishComment", self.english_comment.as_str()),
            ("japaneseComment", self.japanese_comment.as_str()),
        ]
    }
}

impl CommentInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_length("postContent", &self.post_content, 1, None)?;
        require_length("ceoProfile", &self.ceo_profile, 1, None)
    }
}

pub fn build_comment_prompt(input: &CommentInput) -> String {
    let output_schema = COMMENT_OUTPUT_SCHEMA.render();

    render_template(
        COMMENT_PROMPT_TEMPLATE,
        &[
            ("post_content", input.post_content.as_str()),
            ("ceo_profile", input.ceo_profile.as_str()),
            ("bilingual_instruction", BILINGUAL_INSTRUCTION),
            ("output_schema", output_schema.as_str()),
        ],
    )
}

pub async fn suggest_comments(
    llm: &dyn ModelInvoker,
    input: &CommentInput,
) -> Result<CommentOutput, AppError> {
    let prompt = build_comment_prompt(input);
    run_bilingual_flow(llm, "Comment suggestion", &prompt, COMMENT_SYSTEM).await
}
