//! Lexicon-based readability and sentiment scoring.
//!
//! [`compute`] is a pure function of the text and the lexicon. Sentences and
//! words are segmented with the Unicode text segmentation rules (UAX #29).
//! Word matching is done on lower-cased tokens after stopwords and lone
//! punctuation marks have been removed.

use crate::lexicon::Lexicon;
use crate::models::TextMetrics;
use unicode_segmentation::UnicodeSegmentation;

/// Added to denominators so that empty inputs score 0 instead of NaN.
pub const EPSILON: f64 = 0.000001;

/// First-person pronouns, matched against lower-cased words.
///
/// Most of these are also stopwords in the default list and are removed
/// before counting, so with the built-in lexicon only "us" contributes.
pub const PERSONAL_PRONOUNS: [&str; 5] = ["i", "we", "my", "ours", "us"];

/// Score `text` against `lexicon`.
///
/// # Arguments
///
/// * `text` - Raw article text, typically the visible text of a page
/// * `lexicon` - Stopwords and opinion word lists, all lower-case
///
/// # Returns
///
/// The [`TextMetrics`] for the text. Empty or whitespace-only text yields
/// all-zero metrics; no input makes this fail.
///
/// # Scores
///
/// ```text
/// polarity     = (positive - negative) / (positive + negative + EPSILON)
/// subjectivity = (positive + negative) / (word_count + EPSILON)
/// ```
pub fn compute(text: &str, lexicon: &Lexicon) -> TextMetrics {
    let sentence_count = count_sentences(text);
    let words = clean_words(text, lexicon);
    let word_count = words.len();

    let positive_score = words
        .iter()
        .filter(|w| lexicon.positive.contains(w.as_str()))
        .count();
    let negative_score = words
        .iter()
        .filter(|w| lexicon.negative.contains(w.as_str()))
        .count();
    let personal_pronoun_count = words
        .iter()
        .filter(|w| PERSONAL_PRONOUNS.contains(&w.as_str()))
        .count();

    let pos = positive_score as f64;
    let neg = negative_score as f64;
    let polarity_score = (pos - neg) / (pos + neg + EPSILON);
    let subjectivity_score = (pos + neg) / (word_count as f64 + EPSILON);

    let avg_words_per_sentence = if sentence_count > 0 {
        word_count as f64 / sentence_count as f64
    } else {
        0.0
    };
    let avg_word_length = if word_count > 0 {
        let chars: usize = words.iter().map(|w| w.chars().count()).sum();
        chars as f64 / word_count as f64
    } else {
        0.0
    };

    TextMetrics {
        word_count,
        sentence_count,
        avg_word_length,
        avg_words_per_sentence,
        positive_score,
        negative_score,
        polarity_score,
        subjectivity_score,
        personal_pronoun_count,
    }
}

/// Count sentences ended by terminal punctuation.
///
/// Line breaks always end a sentence under UAX #29, and page text is mostly
/// short newline-separated fragments, so whitespace runs are collapsed first.
fn count_sentences(text: &str) -> usize {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    flattened
        .split_sentence_bounds()
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Lower-cased word tokens with stopwords and lone punctuation removed.
///
/// Typographic apostrophes are folded to `'` so that contractions such as
/// "don’t" match the stopword list.
fn clean_words(text: &str, lexicon: &Lexicon) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split_word_bounds()
        .filter(|token| !token.trim().is_empty())
        .filter(|token| !is_punctuation(token))
        .filter(|token| !lexicon.stopwords.contains(*token))
        .map(str::to_string)
        .collect()
}

/// A single character that is neither a letter nor a digit.
fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric(),
        _ => false,
    }
}
