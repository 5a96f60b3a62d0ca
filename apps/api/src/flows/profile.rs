//! Profile creation: questionnaire answers in, a bilingual LinkedIn "About" section out.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::prompts::{PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM};
use crate::flows::schema::PROFILE_OUTPUT_SCHEMA;
use crate::flows::{render_template, require_length, run_bilingual_flow, BilingualOutput};
use crate::llm_client::prompts::BILINGUAL_INSTRUCTION;
use crate::llm_client::ModelInvoker;

pub const DEFAULT_PROFILE_TONE: &str = "professional";

fn default_tone() -> String {
    DEFAULT_PROFILE_TONE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: String,
    pub title: String,
    pub company: String,
    pub company_profile: String,
    pub role_and_responsibilities: String,
    pub key_achievements: String,
    pub leadership_philosophy: String,
    pub vision_for_company: String,
    /// Comma separated.
    pub skills: String,
    #[serde(default)]
    pub call_to_action: Option<String>,
    #[serde(default = "default_tone")]
    pub desired_profile_tone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOutput {
    pub english_profile: String,
    pub japanese_profile: String,
}

impl BilingualOutput for ProfileOutput {
    fn texts(&self) -> [(&'static str, &str); 2] {
        [
            ("englishProfile", self.english_profile.as_str()),
            ("japaneseProfile", self.japanese_profile.as_str()),
        ]
    }
}

impl ProfileInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_length("name", &self.name, 1, None)?;
        require_length("title", &self.title, 2, None)?;
        require_length("company", &self.company, 1, None)?;
        require_length("companyProfile", &self.company_profile, 20, Some(500))?;
        require_length(
            "roleAndResponsibilities",
            &self.role_and_responsibilities,
            20,
            Some(1000),
        )?;
        require_length("keyAchievements", &self.key_achievements, 20, Some(1000))?;
        require_length(
            "leadershipPhilosophy",
            &self.leadership_philosophy,
            20,
            Some(1000),
        )?;
        require_length("visionForCompany", &self.vision_for_company, 20, Some(1000))?;
        require_length("skills", &self.skills, 2, None)?;
        Ok(())
    }

    /// Trimmed, non-empty skills from the comma separated list.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split([',', '、'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn tone(&self) -> &str {
        let tone = self.desired_profile_tone.trim();
        if tone.is_empty() {
            DEFAULT_PROFILE_TONE
        } else {
            tone
        }
    }
}

pub fn build_profile_prompt(input: &ProfileInput) -> String {
    let call_to_action = input
        .call_to_action
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("（指定なし）");

    let skills = input.skill_list().join(", ");
    let output_schema = PROFILE_OUTPUT_SCHEMA.render();

    render_template(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("name", input.name.as_str()),
            ("title", input.title.as_str()),
            ("company", input.company.as_str()),
            ("company_profile", input.company_profile.as_str()),
            ("role_and_responsibilities", input.role_and_responsibilities.as_str()),
            ("key_achievements", input.key_achievements.as_str()),
            ("leadership_philosophy", input.leadership_philosophy.as_str()),
            ("vision_for_company", input.vision_for_company.as_str()),
            ("skills", skills.as_str()),
            ("call_to_action", call_to_action),
            ("tone", input.tone()),
            ("bilingual_instruction", BILINGUAL_INSTRUCTION),
            ("output_schema", output_schema.as_str()),
        ],
    )
}

pub async fn generate_profile(
    llm: &dyn ModelInvoker,
    input: &ProfileInput,
) -> Result<ProfileOutput, AppError> {
    let prompt = build_profile_prompt(input);
    run_bilingual_flow(llm, "Profile generation", &prompt, PROFILE_SYSTEM).await
}
