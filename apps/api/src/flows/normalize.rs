//! Trend response normalizer: turns whatever the model sent back into a
//! well-formed `Vec<TrendItem>`.
//!
//! The requested output shape is guidance, not a contract. Every field is
//! decoded independently and tolerates absence, `null` and wrong types by
//! falling back to a default. Only two things make an item unrecoverable: no
//! usable title, or no usable analysis. Such items are dropped; the rest of
//! the collection survives.
//!
//! Truthiness and stringification follow the loose rules of the JSON producer
//! (`0`, `""`, `false`, `null` are falsy; objects stringify as
//! `[object Object]`) so that a value the model meant as text is kept as text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::flows::clock::Clock;
use crate::flows::schema::TrendFieldMap;

/// A validated trend analysis item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItem {
    pub id: String,
    pub title: String,
    pub points: Vec<String>,
    pub analysis: String,
    /// `Some(vec![])` when the model sent an empty list, `None` when it sent none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,
    pub search_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
}

/// Why a raw element could not become a `TrendItem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("item {index} has no usable title")]
    MissingTitle { index: usize },

    /// Every emitted item carries a non-empty title and a non-empty analysis,
    /// so an item with a title but a blank or missing analysis is dropped too.
    #[error("item {index} has no usable analysis")]
    MissingAnalysis { index: usize },
}

/// Normalizes a raw model response into trend items.
///
/// `raw` is `None` when the invocation produced nothing. An absent envelope, a
/// non-object envelope, or a collection field that is not an array all yield an
/// empty result without looking at any element.
pub fn normalize_trends(
    raw: Option<&Value>,
    fields: &TrendFieldMap,
    clock: &dyn Clock,
) -> Vec<TrendItem> {
    let Some(elements) = raw
        .and_then(|envelope| envelope.get(fields.collection))
        .and_then(Value::as_array)
    else {
        debug!(
            "Trend response has no '{}' array; returning no trends",
            fields.collection
        );
        return Vec::new();
    };

    let decoder = TrendDecoder::new(fields, clock.now_millis());

    let trends: Vec<TrendItem> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| match decoder.decode(index, element) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("Dropping malformed trend: {e}");
                None
            }
        })
        .collect();

    debug!(
        "Normalized {} of {} raw trends",
        trends.len(),
        elements.len()
    );

    trends
}

/// Decodes single raw elements. Holds the timestamp shared by every id
/// synthesized in one pass; the element index keeps those ids distinct.
pub struct TrendDecoder<'a> {
    fields: &'a TrendFieldMap,
    stamp_millis: i64,
}

impl<'a> TrendDecoder<'a> {
    pub fn new(fields: &'a TrendFieldMap, stamp_millis: i64) -> Self {
        Self {
            fields,
            stamp_millis,
        }
    }

    pub fn decode(&self, index: usize, raw: &Value) -> Result<TrendItem, DecodeError> {
        // Non-objects (null included) read as an object with no fields.
        let object = raw.as_object();
        let f = self.fields;

        let title = decode_text(field(object, f.title)).ok_or(DecodeError::MissingTitle { index })?;
        let analysis =
            decode_text(field(object, f.analysis)).ok_or(DecodeError::MissingAnalysis { index })?;

        Ok(TrendItem {
            id: decode_text(field(object, f.id)).unwrap_or_else(|| self.synthesize_id(index)),
            title,
            points: decode_list(field(object, f.points)).unwrap_or_default(),
            analysis,
            next_steps: decode_list(field(object, f.next_steps)),
            search_query: decode_loose_text(field(object, f.search_query)),
            image_url: decode_exact_string(field(object, f.image_url)),
            image_hint: decode_exact_string(field(object, f.image_hint)),
        })
    }

    fn synthesize_id(&self, index: usize) -> String {
        format!("{}-{}-{}", self.fields.id_prefix, self.stamp_millis, index)
    }
}

fn field<'v>(object: Option<&'v Map<String, Value>>, key: &str) -> Option<&'v Value> {
    object.and_then(|o| o.get(key))
}

// ────────────────────────────────────────────────────────────────────────────
// Per-field decoders
// ────────────────────────────────────────────────────────────────────────────

/// Truthy value stringified; `None` if falsy or if the text is blank.
fn decode_text(value: Option<&Value>) -> Option<String> {
    value
        .filter(|v| is_truthy(v))
        .map(coerce_string)
        .filter(|s| !s.trim().is_empty())
}

/// Truthy value stringified, otherwise the empty string.
fn decode_loose_text(value: Option<&Value>) -> String {
    value
        .filter(|v| is_truthy(v))
        .map(coerce_string)
        .unwrap_or_default()
}

/// Array with every element stringified; `None` for anything that is not an array.
fn decode_list(value: Option<&Value>) -> Option<Vec<String>> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(coerce_string).collect())
}

/// Kept only when already a string. No coercion.
fn decode_exact_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn coerce_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => coerce_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn coerce_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => format_shortest(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip digits, laid out in plain decimal for `1e-7 < |f| < 1e21`
/// and in exponent form (`1e+21`, `1.5e-7`) outside that range.
fn format_shortest(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return f.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.2345e23`.
    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(-n as usize))
    } else {
        let (lead, tail) = digits.split_at(1);
        let sign = if exp < 0 { '-' } else { '+' };
        if tail.is_empty() {
            format!("{lead}e{sign}{}", exp.abs())
        } else {
            format!("{lead}.{tail}e{sign}{}", exp.abs())
        }
    };

    if f < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::clock::FixedClock;
    use crate::flows::schema::ANALYZED_TRENDS;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000_000;

    fn normalize(raw: Value) -> Vec<TrendItem> {
        normalize_trends(Some(&raw), &ANALYZED_TRENDS, &FixedClock(NOW))
    }

    fn valid(title: &str) -> Value {
        json!({ "trendTitle": title, "trendAnalysis": "analysis" })
    }

    // ── envelope guard ──────────────────────────────────────────────────────

    #[test]
    fn test_absent_response_yields_empty() {
        assert!(normalize_trends(None, &ANALYZED_TRENDS, &FixedClock(NOW)).is_empty());
    }

    #[test]
    fn test_missing_or_non_array_collection_yields_empty() {
        for raw in [
            json!({}),
            json!({ "analyzedTrends": null }),
            json!({ "analyzedTrends": "trends" }),
            json!({ "analyzedTrends": 3 }),
            json!({ "analyzedTrends": { "trendTitle": "X", "trendAnalysis": "Y" } }),
            json!({ "trends": [valid("wrong key")] }),
        ] {
            assert!(normalize(raw.clone()).is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn test_non_object_envelope_yields_empty() {
        for raw in [json!(null), json!("text"), json!([valid("X")]), json!(true)] {
            assert!(normalize(raw.clone()).is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn test_empty_collection_yields_empty() {
        assert!(normalize(json!({ "analyzedTrends": [] })).is_empty());
    }

    // ── item drops ──────────────────────────────────────────────────────────

    #[test]
    fn test_primitive_and_null_items_never_survive() {
        let out = normalize(json!({
            "analyzedTrends": [null, 1, "text", true, [], valid("Kept")]
        }));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Kept");
    }

    #[test]
    fn test_empty_object_is_dropped_and_valid_item_kept() {
        let out = normalize(json!({
            "analyzedTrends": [{}, { "trendTitle": "Valid", "trendAnalysis": "Ok" }]
        }));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Valid");
        assert_eq!(out[0].analysis, "Ok");
    }

    #[test]
    fn test_falsy_titles_are_dropped() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "trendTitle": "", "trendAnalysis": "a" },
                { "trendTitle": null, "trendAnalysis": "a" },
                { "trendTitle": 0, "trendAnalysis": "a" },
                { "trendTitle": false, "trendAnalysis": "a" },
                { "trendTitle": "   ", "trendAnalysis": "a" },
                { "trendTitle": [], "trendAnalysis": "a" },
                { "trendAnalysis": "a" }
            ]
        }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_analysis_is_dropped() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "trendTitle": "No analysis" },
                { "trendTitle": "Blank analysis", "trendAnalysis": "" },
                valid("Kept")
            ]
        }));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Kept");
    }

    #[test]
    fn test_title_equal_to_old_placeholder_text_is_kept() {
        let out = normalize(json!({
            "analyzedTrends": [{ "trendTitle": "タイトル未設定", "trendAnalysis": "分析未提供" }]
        }));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "タイトル未設定");
        assert_eq!(out[0].analysis, "分析未提供");
    }

    #[test]
    fn test_all_malformed_yields_empty_not_error() {
        let out = normalize(json!({ "analyzedTrends": [{}, null, { "id": "x" }] }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_survivors_keep_relative_order() {
        let out = normalize(json!({
            "analyzedTrends": [valid("A"), {}, valid("B"), null, valid("C")]
        }));
        let titles: Vec<_> = out.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    // ── field decoding ──────────────────────────────────────────────────────

    #[test]
    fn test_minimal_item_defaults() {
        let out = normalize(json!({
            "analyzedTrends": [{
                "trendTitle": "X",
                "keyTrendPoints": ["a", "b"],
                "trendAnalysis": "Y"
            }]
        }));
        assert_eq!(out.len(), 1);
        let item = &out[0];
        assert_eq!(item.title, "X");
        assert_eq!(item.points, vec!["a", "b"]);
        assert_eq!(item.analysis, "Y");
        assert_eq!(item.next_steps, None);
        assert_eq!(item.search_query, "");
        assert_eq!(item.image_url, None);
        assert_eq!(item.image_hint, None);
        assert_eq!(item.id, format!("trend-{NOW}-0"));
    }

    #[test]
    fn test_non_array_points_default_to_empty() {
        let out = normalize(json!({
            "analyzedTrends": [{
                "trendTitle": "X",
                "trendAnalysis": "Y",
                "keyTrendPoints": "not-an-array"
            }]
        }));
        assert!(out[0].points.is_empty());
    }

    #[test]
    fn test_points_are_stringified() {
        let out = normalize(json!({
            "analyzedTrends": [{
                "trendTitle": "X",
                "trendAnalysis": "Y",
                "keyTrendPoints": ["a", 2, 1.5, true, null, {"k": "v"}, ["x", "y"]]
            }]
        }));
        assert_eq!(
            out[0].points,
            vec!["a", "2", "1.5", "true", "null", "[object Object]", "x,y"]
        );
    }

    #[test]
    fn test_next_steps_present_only_for_arrays() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "trendTitle": "list", "trendAnalysis": "a", "potentialNextSteps": ["visit", 3] },
                { "trendTitle": "empty", "trendAnalysis": "a", "potentialNextSteps": [] },
                { "trendTitle": "string", "trendAnalysis": "a", "potentialNextSteps": "visit" },
                { "trendTitle": "null", "trendAnalysis": "a", "potentialNextSteps": null },
                { "trendTitle": "object", "trendAnalysis": "a", "potentialNextSteps": {} }
            ]
        }));
        assert_eq!(out[0].next_steps, Some(vec!["visit".to_string(), "3".to_string()]));
        assert_eq!(out[1].next_steps, Some(vec![]));
        assert_eq!(out[2].next_steps, None);
        assert_eq!(out[3].next_steps, None);
        assert_eq!(out[4].next_steps, None);
    }

    #[test]
    fn test_empty_next_steps_serializes_as_empty_array() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "trendTitle": "empty", "trendAnalysis": "a", "potentialNextSteps": [] },
                { "trendTitle": "absent", "trendAnalysis": "a" }
            ]
        }));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json[0]["nextSteps"], json!([]));
        assert!(json[1].get("nextSteps").is_none());
    }

    #[test]
    fn test_search_query_coerced_or_empty() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "trendTitle": "s", "trendAnalysis": "a", "sampleSearchQuery": "日本酒 欧州市場" },
                { "trendTitle": "n", "trendAnalysis": "a", "sampleSearchQuery": 2025 },
                { "trendTitle": "z", "trendAnalysis": "a", "sampleSearchQuery": 0 },
                { "trendTitle": "x", "trendAnalysis": "a", "sampleSearchQuery": null }
            ]
        }));
        assert_eq!(out[0].search_query, "日本酒 欧州市場");
        assert_eq!(out[1].search_query, "2025");
        assert_eq!(out[2].search_query, "");
        assert_eq!(out[3].search_query, "");
    }

    #[test]
    fn test_image_fields_require_exact_strings() {
        let out = normalize(json!({
            "analyzedTrends": [
                {
                    "trendTitle": "strings",
                    "trendAnalysis": "a",
                    "imageUrl": "https://placehold.co/600x300.png",
                    "imageHint": "市場 グラフ"
                },
                {
                    "trendTitle": "wrong types",
                    "trendAnalysis": "a",
                    "imageUrl": 42,
                    "imageHint": ["市場"]
                }
            ]
        }));
        assert_eq!(
            out[0].image_url.as_deref(),
            Some("https://placehold.co/600x300.png")
        );
        assert_eq!(out[0].image_hint.as_deref(), Some("市場 グラフ"));
        assert_eq!(out[1].image_url, None);
        assert_eq!(out[1].image_hint, None);
    }

    #[test]
    fn test_non_string_title_and_analysis_are_stringified() {
        let out = normalize(json!({
            "analyzedTrends": [{ "trendTitle": 2030, "trendAnalysis": { "summary": "x" } }]
        }));
        assert_eq!(out[0].title, "2030");
        assert_eq!(out[0].analysis, "[object Object]");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let out = normalize(json!({
            "analyzedTrends": [{ "trendTitle": "X", "trendAnalysis": "Y", "confidence": 0.9 }]
        }));
        assert_eq!(out.len(), 1);
    }

    // ── ids ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_supplied_ids_are_kept_and_stringified() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "id": "trend-analysis-1", "trendTitle": "A", "trendAnalysis": "a" },
                { "id": 7, "trendTitle": "B", "trendAnalysis": "b" }
            ]
        }));
        assert_eq!(out[0].id, "trend-analysis-1");
        assert_eq!(out[1].id, "7");
    }

    #[test]
    fn test_synthesized_ids_use_original_index_and_are_unique() {
        let out = normalize(json!({
            "analyzedTrends": [valid("A"), {}, valid("B"), { "id": "", "trendTitle": "C", "trendAnalysis": "c" }]
        }));
        let ids: Vec<_> = out.iter().map(|t| t.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                format!("trend-{NOW}-0"),
                format!("trend-{NOW}-2"),
                format!("trend-{NOW}-3"),
            ]
        );
    }

    #[test]
    fn test_duplicate_supplied_ids_pass_through() {
        let out = normalize(json!({
            "analyzedTrends": [
                { "id": "dup", "trendTitle": "A", "trendAnalysis": "a" },
                { "id": "dup", "trendTitle": "B", "trendAnalysis": "b" }
            ]
        }));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|t| t.id == "dup"));
    }

    #[test]
    fn test_normalization_is_idempotent_apart_from_synthesized_ids() {
        let raw = json!({
            "analyzedTrends": [
                { "trendTitle": "A", "trendAnalysis": "a", "keyTrendPoints": [1, "two"] },
                { "id": "fixed", "trendTitle": "B", "trendAnalysis": "b", "potentialNextSteps": [] }
            ]
        });
        let first = normalize_trends(Some(&raw), &ANALYZED_TRENDS, &FixedClock(1));
        let second = normalize_trends(Some(&raw), &ANALYZED_TRENDS, &FixedClock(2));

        assert_eq!(first.len(), second.len());
        assert_ne!(first[0].id, second[0].id);
        assert_eq!(first[1], second[1]);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.title, b.title);
            assert_eq!(a.points, b.points);
            assert_eq!(a.analysis, b.analysis);
            assert_eq!(a.next_steps, b.next_steps);
            assert_eq!(a.search_query, b.search_query);
        }
    }

    // ── decoder and field map ──────────────────────────────────────────────

    #[test]
    fn test_decoder_reports_which_field_is_missing() {
        let decoder = TrendDecoder::new(&ANALYZED_TRENDS, NOW);
        assert_eq!(
            decoder.decode(4, &json!(null)),
            Err(DecodeError::MissingTitle { index: 4 })
        );
        assert_eq!(
            decoder.decode(1, &json!({ "trendTitle": "X" })),
            Err(DecodeError::MissingAnalysis { index: 1 })
        );
    }

    #[test]
    fn test_alternate_field_map_reuses_normalizer() {
        let topics = TrendFieldMap {
            collection: "topics",
            id: "topicId",
            title: "headline",
            points: "bullets",
            analysis: "summary",
            next_steps: "actions",
            search_query: "query",
            image_url: "image",
            image_hint: "hint",
            id_prefix: "topic",
        };
        let raw = json!({
            "topics": [
                { "headline": "GX", "summary": "Decarbonisation", "bullets": ["a"], "actions": [] },
                { "trendTitle": "ignored", "trendAnalysis": "wrong keys" }
            ]
        });
        let out = normalize_trends(Some(&raw), &topics, &FixedClock(5));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "topic-5-0");
        assert_eq!(out[0].points, vec!["a"]);
        assert_eq!(out[0].next_steps, Some(vec![]));
    }

    // ── loose-typing helpers ───────────────────────────────────────────────

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_string(&json!(3)), "3");
        assert_eq!(coerce_string(&json!(-12)), "-12");
        assert_eq!(coerce_string(&json!(2.0)), "2");
        assert_eq!(coerce_string(&json!(-0.0)), "0");
        assert_eq!(coerce_string(&json!(0.25)), "0.25");
        assert_eq!(coerce_string(&json!(-123.456)), "-123.456");
        assert_eq!(coerce_string(&json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn test_coerce_numbers_switches_to_exponent_form_at_the_edges() {
        assert_eq!(coerce_string(&json!(1e21)), "1e+21");
        assert_eq!(coerce_string(&json!(-1e21)), "-1e+21");
        assert_eq!(coerce_string(&json!(1.2345678901234568e23)), "1.2345678901234568e+23");
        assert_eq!(coerce_string(&json!(1e-7)), "1e-7");
        assert_eq!(coerce_string(&json!(1.5e-7)), "1.5e-7");
        assert_eq!(coerce_string(&json!(0.000001)), "0.000001");
        assert_eq!(coerce_string(&json!(0.0000123)), "0.0000123");
    }

    #[test]
    fn test_coerce_nested_arrays() {
        assert_eq!(coerce_string(&json!([1, null, ["a", [true]]])), "1,,a,true");
        assert_eq!(coerce_string(&json!([])), "");
    }
}
