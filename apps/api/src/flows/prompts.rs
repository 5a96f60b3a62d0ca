// All LLM prompt constants for the generation flows.
// Templates use `{placeholder}` substitution; values are inserted verbatim.
// `{output_schema}` is replaced with the rendered `OutputSchema` of the flow.

// ────────────────────────────────────────────────────────────────────────────
// Trend watcher
// ────────────────────────────────────────────────────────────────────────────

pub const TREND_SYSTEM: &str = "You are a senior business analyst who helps Japanese CEOs \
    understand global business trends. You write objective analysis reports, not social media posts.";

/// Replace: {keywords}, {output_schema}
pub const TREND_PROMPT_TEMPLATE: &str = r#"あなたは、日本のCEOがグローバル市場のビジネストレンドを理解するのを支援するシニア・ビジネスアナリストです。
以下のキーワードに基づいて、現在注目すべき具体的なビジネストレンドの分析結果を3～5件生成してください。

キーワード: {keywords}

出力形式（このJSON構造のみを返すこと）:
{output_schema}

ルール:
1. 分析はLinkedIn投稿の形式ではなく、客観的なビジネス分析レポートとして書くこと
2. 「LinkedIn上の注目トピック」のような文言は使用しないこと
3. potentialNextSteps はAIによる提案であり、実在の企業リスト等を保証するものではないこと
4. imageUrl と imageHint は画像が本当に役立つ場合のみ含めること
5. CEOが迅速に状況を把握し、次の行動を検討できる実用的な内容にすること"#;

// ────────────────────────────────────────────────────────────────────────────
// Profile creation
// ────────────────────────────────────────────────────────────────────────────

pub const PROFILE_SYSTEM: &str =
    "You are an expert at writing compelling LinkedIn profiles for CEOs in Japanese and English.";

/// Replace: {name}, {title}, {company}, {company_profile}, {role_and_responsibilities},
///          {key_achievements}, {leadership_philosophy}, {vision_for_company}, {skills},
///          {call_to_action}, {tone}, {bilingual_instruction}, {output_schema}
pub const PROFILE_PROMPT_TEMPLATE: &str = r#"以下の情報をもとに、LinkedInの「自己紹介（About）」セクションにそのまま使える、説得力のある物語調のプロフィールを日本語と英語で作成してください。
主要な成果とスキルを強調し、関連性の高いコンタクトや機会を引き付ける内容にしてください。

基本情報:
- 氏名: {name}
- 役職: {title}
- 会社名: {company}

詳細情報:
- 会社概要: {company_profile}
- CEOとしての役割と責任: {role_and_responsibilities}
- 主要な成果: {key_achievements}
- リーダーシップ哲学: {leadership_philosophy}
- 会社の将来ビジョン: {vision_for_company}
- スキル: {skills}
- LinkedInでの希望する繋がり: {call_to_action}
- プロフィールの希望トーン: {tone}

{bilingual_instruction}

OUTPUT SCHEMA (return exactly this structure):
{output_schema}"#;

// ────────────────────────────────────────────────────────────────────────────
// Post generation
// ────────────────────────────────────────────────────────────────────────────

pub const POST_SYSTEM: &str =
    "You are an expert content creator specializing in engaging LinkedIn posts for CEOs.";

/// Replace: {topic}, {keywords}, {tone}, {bilingual_instruction}, {output_schema}
pub const POST_PROMPT_TEMPLATE: &str = r#"Generate an original long-form LinkedIn post in Japanese based on the topic, keywords, and tone below.
Then translate the Japanese post into English.

Topic: {topic}
Keywords: {keywords}
Tone: {tone}

The content must be appropriate for LinkedIn and reflect the CEO's expertise.

{bilingual_instruction}

OUTPUT SCHEMA (return exactly this structure):
{output_schema}"#;

// ────────────────────────────────────────────────────────────────────────────
// Suggested comments
// ────────────────────────────────────────────────────────────────────────────

pub const COMMENT_SYSTEM: &str =
    "You are a personal assistant to a CEO, helping them engage thoughtfully on LinkedIn.";

/// Replace: {post_content}, {ceo_profile}, {bilingual_instruction}, {output_schema}
pub const COMMENT_PROMPT_TEMPLATE: &str = r#"Write a thoughtful, relevant comment on the following LinkedIn post, in both English and Japanese.

POST CONTENT:
{post_content}

CEO PROFILE (align the comment with this expertise and perspective):
{ceo_profile}

The Japanese comment must be natural and appropriate for a business context.

{bilingual_instruction}

OUTPUT SCHEMA (return exactly this structure):
{output_schema}"#;
