//! Data models that flow through a run.
//!
//! - [`InputRecord`]: one row of the input sheet
//! - [`ArticleText`]: extracted page text, consumed immediately by the calculator
//! - [`TextMetrics`]: the scores computed for one text
//! - [`MetricsRecord`]: one row of the output table
//! - [`FailedRecord`]: a record that produced no row, kept for the run report

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of an input row (`URL_ID` column).
///
/// The text is kept verbatim and written back unchanged. Ordering is numeric
/// when both sides parse as numbers, so `2` sorts before `10`. Numeric ids sort
/// before non-numeric ones, and non-numeric ids compare as plain strings.
#[derive(Debug, Clone)]
pub struct UrlId {
    raw: String,
    numeric: Option<f64>,
}

impl UrlId {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let numeric = raw.parse::<f64>().ok().filter(|n| n.is_finite());
        Self { raw, numeric }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for UrlId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for UrlId {}

impl Hash for UrlId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl Ord for UrlId {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_kind = match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_kind.then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for UrlId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for UrlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UrlId {
    fn from(s: &str) -> Self {
        UrlId::new(s)
    }
}

impl From<u64> for UrlId {
    fn from(n: u64) -> Self {
        UrlId::new(n.to_string())
    }
}

impl Serialize for UrlId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for UrlId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UrlId::new(raw))
    }
}

/// One row of the input sheet. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "URL_ID")]
    pub id: UrlId,
    #[serde(rename = "URL")]
    pub url: String,
}

impl InputRecord {
    #[cfg(test)]
    pub fn new(id: impl Into<UrlId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Text extracted from a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleText {
    /// Text of the `<title>` element, empty when the page has none.
    pub title: String,
    /// Every visible text node of the page, concatenated in document order.
    pub body: String,
}

/// Scores computed for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub avg_words_per_sentence: f64,
    pub positive_score: usize,
    pub negative_score: usize,
    pub polarity_score: f64,
    pub subjectivity_score: f64,
    pub personal_pronoun_count: usize,
}

/// One row of the output table.
///
/// Field order is the column order of the written sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    #[serde(rename = "URL_ID")]
    pub id: UrlId,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "WORD COUNT")]
    pub word_count: usize,
    #[serde(rename = "AVG WORD LENGTH")]
    pub avg_word_length: f64,
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    pub avg_words_per_sentence: f64,
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: usize,
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: usize,
    #[serde(rename = "POLARITY SCORE")]
    pub polarity_score: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity_score: f64,
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronoun_count: usize,
}

impl MetricsRecord {
    pub fn from_metrics(record: &InputRecord, metrics: &TextMetrics) -> Self {
        Self {
            id: record.id.clone(),
            url: record.url.clone(),
            word_count: metrics.word_count,
            avg_word_length: metrics.avg_word_length,
            avg_words_per_sentence: metrics.avg_words_per_sentence,
            positive_score: metrics.positive_score,
            negative_score: metrics.negative_score,
            polarity_score: metrics.polarity_score,
            subjectivity_score: metrics.subjectivity_score,
            personal_pronoun_count: metrics.personal_pronoun_count,
        }
    }
}

/// A record that was dropped from the table, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecord {
    pub id: UrlId,
    pub url: String,
    pub error: String,
}
