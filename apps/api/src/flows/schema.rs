//! Declarative output shapes for every generative flow.
//!
//! An `OutputSchema` is rendered into the prompt so the model knows what to
//! return. It is guidance only: nothing on the model side enforces it, which is
//! why the trend flow re-validates everything through `TrendFieldMap`.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextList,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
    pub guidance: &'static str,
}

impl FieldSpec {
    pub const fn text(name: &'static str, guidance: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            optional: false,
            guidance,
        }
    }

    pub const fn list(name: &'static str, guidance: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::TextList,
            optional: false,
            guidance,
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }
}

/// Shape of one flow's JSON answer. With `collection` set, the fields describe
/// the elements of an array stored under that key.
#[derive(Debug, Clone, Copy)]
pub struct OutputSchema {
    pub collection: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

impl OutputSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Renders the schema as an annotated JSON skeleton for embedding in a prompt.
    pub fn render(&self) -> String {
        let indent = if self.collection.is_some() { "      " } else { "  " };
        let mut body = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            let value = match field.kind {
                FieldKind::Text => "\"string\"",
                FieldKind::TextList => "[\"string\"]",
            };
            let comma = if i + 1 < self.fields.len() { "," } else { "" };
            let optional = if field.optional { " (optional)" } else { "" };
            let _ = writeln!(
                body,
                "{indent}\"{}\": {value}{comma}  // {}{optional}",
                field.name, field.guidance
            );
        }

        match self.collection {
            Some(key) => format!("{{\n  \"{key}\": [\n    {{\n{body}    }}\n  ]\n}}"),
            None => format!("{{\n{body}}}"),
        }
    }
}

/// Names the raw keys the trend normalizer reads. One map per trend-flow
/// variant; the normalizer itself is shared.
#[derive(Debug, Clone, Copy)]
pub struct TrendFieldMap {
    pub collection: &'static str,
    pub id: &'static str,
    pub title: &'static str,
    pub points: &'static str,
    pub analysis: &'static str,
    pub next_steps: &'static str,
    pub search_query: &'static str,
    pub image_url: &'static str,
    pub image_hint: &'static str,
    /// Prefix for ids synthesized when the model omits one.
    pub id_prefix: &'static str,
}

/// Field map for the trend-watcher flow.
pub const ANALYZED_TRENDS: TrendFieldMap = TrendFieldMap {
    collection: "analyzedTrends",
    id: "id",
    title: "trendTitle",
    points: "keyTrendPoints",
    analysis: "trendAnalysis",
    next_steps: "potentialNextSteps",
    search_query: "sampleSearchQuery",
    image_url: "imageUrl",
    image_hint: "imageHint",
    id_prefix: "trend",
};

pub const TREND_OUTPUT_SCHEMA: OutputSchema = OutputSchema {
    collection: Some(ANALYZED_TRENDS.collection),
    fields: &[
        FieldSpec::text(ANALYZED_TRENDS.id, "ユニークなID（例: \"trend-analysis-1\"）"),
        FieldSpec::text(ANALYZED_TRENDS.title, "このトレンドを簡潔に表す日本語のタイトル"),
        FieldSpec::list(ANALYZED_TRENDS.points, "トレンドの主要なポイントを日本語で3～5点"),
        FieldSpec::text(
            ANALYZED_TRENDS.analysis,
            "キーワード「{keywords}」に関心を持つ日本のCEOにとっての意味を日本語で2～3文",
        ),
        FieldSpec::list(
            ANALYZED_TRENDS.next_steps,
            "CEOが検討しうる具体的な次のステップを日本語で1～2点。難しければ省略",
        )
        .optional(),
        FieldSpec::text(
            ANALYZED_TRENDS.search_query,
            "追加調査用の検索クエリ例（日本語または英語、URLエンコード不要）",
        ),
        FieldSpec::text(
            ANALYZED_TRENDS.image_url,
            "補足画像が必要な場合のみ https://placehold.co/600x300.png",
        )
        .optional(),
        FieldSpec::text(
            ANALYZED_TRENDS.image_hint,
            "imageUrl を返す場合、「{keywords}」に関連する2語以内の画像ヒント",
        )
        .optional(),
    ],
};

pub const PROFILE_OUTPUT_SCHEMA: OutputSchema = OutputSchema {
    collection: None,
    fields: &[
        FieldSpec::text("englishProfile", "The finished LinkedIn About section in English"),
        FieldSpec::text("japaneseProfile", "完成した日本語のLinkedIn自己紹介（About）セクション"),
    ],
};

pub const POST_OUTPUT_SCHEMA: OutputSchema = OutputSchema {
    collection: None,
    fields: &[
        FieldSpec::text("japanesePost", "The original long-form LinkedIn post in Japanese"),
        FieldSpec::text("englishPost", "The English translation of the Japanese post"),
    ],
};

pub const COMMENT_OUTPUT_SCHEMA: OutputSchema = OutputSchema {
    collection: None,
    fields: &[
        FieldSpec::text("englishComment", "A suggested comment in English"),
        FieldSpec::text("japaneseComment", "A suggested comment in Japanese"),
    ],
};
