//! Three-band feature extraction.
//!
//! The vector is split into equal bands:
//!
//! | Band | Content |
//! |------|---------|
//! | term | token frequencies hashed into slots |
//! | n-gram | character n-gram frequencies hashed into slots |
//! | auxiliary | sentiment, entities, text length, word count |
//!
//! Hash collisions inside a band are expected and simply add up.

use tabgroup_core::capability::TextAnalysis;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::EmbeddingConfig;
use crate::embedder::{EmbeddingError, EmbeddingResult};

/// Divisor applied to the raw sentiment score before squashing.
const SENTIMENT_SCALE: f32 = 5.0;

/// Lowercase and strip everything that is not a word character or whitespace.
pub fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Tokens of the cleaned text at least `min_len` characters long.
pub fn tokenize(cleaned: &str, min_len: usize) -> Vec<&str> {
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= min_len)
        .collect()
}

/// Slot in `0..band` for a feature string.
#[inline]
pub(crate) fn slot(feature: &str, band: usize) -> usize {
    (xxh3_64(feature.as_bytes()) % band as u64) as usize
}

/// Accumulate `1 / total` per token occurrence.
fn term_band(band: &mut [f32], tokens: &[&str]) {
    if tokens.is_empty() {
        return;
    }
    let weight = 1.0 / tokens.len() as f32;
    let size = band.len();
    for token in tokens {
        band[slot(token, size)] += weight;
    }
}

/// Accumulate `1 / total` per character n-gram of the cleaned text.
fn ngram_band(band: &mut [f32], cleaned: &str, n: usize) {
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() < n {
        return;
    }
    let total = chars.len() - n + 1;
    let weight = 1.0 / total as f32;
    let size = band.len();
    let mut gram = String::with_capacity(n * 4);
    for window in chars.windows(n) {
        gram.clear();
        gram.extend(window);
        band[slot(&gram, size)] += weight;
    }
}

/// Sentiment in the first two slots, entities scattered over the middle,
/// structural features in the last two slots.
fn auxiliary_band(
    band: &mut [f32],
    analysis: Option<&TextAnalysis>,
    text: &str,
    config: &EmbeddingConfig,
) {
    let size = band.len();

    if let Some(analysis) = analysis {
        if let Some(sentiment) = analysis.sentiment {
            band[0] = (sentiment.score / SENTIMENT_SCALE).tanh();
            band[1] = sentiment.comparative;
        }
        if let Some(entities) = &analysis.entities {
            let span = size - 4;
            for entity in entities {
                let name = entity.name.to_lowercase();
                band[2 + slot(&name, span)] += entity.confidence;
            }
        }
    }

    let length = text.chars().count() as f32;
    let words = text.split_whitespace().count() as f32;
    band[size - 2] = (length / config.length_scale).min(1.0);
    band[size - 1] = (words / config.word_scale).min(1.0);
}

/// Build the unnormalized feature vector for `text`.
///
/// Fails with [`EmbeddingError::NonFinite`] if any slot ends up NaN or
/// infinite, which callers treat as a pipeline failure.
pub fn extract_features(
    text: &str,
    analysis: Option<&TextAnalysis>,
    config: &EmbeddingConfig,
) -> EmbeddingResult<Vec<f32>> {
    let band = config.band_size();
    let mut vector = vec![0.0f32; config.dimension];

    let cleaned = clean_text(text);
    let tokens = tokenize(&cleaned, config.min_token_len);

    let (terms, rest) = vector.split_at_mut(band);
    let (ngrams, aux) = rest.split_at_mut(band);

    term_band(terms, &tokens);
    ngram_band(ngrams, &cleaned, config.ngram_size);
    auxiliary_band(&mut aux[..band], analysis, text, config);

    if let Some(idx) = vector.iter().position(|v| !v.is_finite()) {
        return Err(EmbeddingError::NonFinite(idx));
    }

    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabgroup_core::capability::{Entity, Sentiment};

    #[test]
    fn test_clean_and_tokenize() {
        let cleaned = clean_text("Hello, World! It's a RUST_lang day.");
        assert_eq!(cleaned, "hello world its a rust_lang day");
        let tokens = tokenize(&cleaned, 3);
        assert_eq!(tokens, vec!["hello", "world", "its", "rust_lang", "day"]);
    }

    #[test]
    fn test_term_band_sums_to_one() {
        let config = EmbeddingConfig::default();
        let v = extract_features("alpha beta gamma alpha", None, &config).unwrap();
        let sum: f32 = v[..config.band_size()].iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ngram_band_sums_to_one() {
        let config = EmbeddingConfig::default();
        let band = config.band_size();
        let v = extract_features("abcdef", None, &config).unwrap();
        let sum: f32 = v[band..2 * band].iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_short_text_has_no_ngrams() {
        let config = EmbeddingConfig::default();
        let band = config.band_size();
        let v = extract_features("ab", None, &config).unwrap();
        assert!(v[..2 * band].iter().all(|&x| x == 0.0));
        // Structural features are still present.
        assert!(v[3 * band - 2] > 0.0);
        assert!(v[3 * band - 1] > 0.0);
    }

    #[test]
    fn test_structural_features_saturate() {
        let config = EmbeddingConfig::default();
        let long = "word ".repeat(500);
        let v = extract_features(&long, None, &config).unwrap();
        assert_eq!(v[config.dimension - 2], 1.0);
        assert_eq!(v[config.dimension - 1], 1.0);
    }

    #[test]
    fn test_analysis_fills_auxiliary_band() {
        let config = EmbeddingConfig::default();
        let band = config.band_size();
        let analysis = TextAnalysis {
            sentiment: Some(Sentiment {
                score: 3.0,
                comparative: 0.5,
            }),
            entities: Some(vec![Entity::new("Berlin", 0.8)]),
        };

        let v = extract_features("I love Berlin", Some(&analysis), &config).unwrap();
        let aux = &v[2 * band..];
        assert!(aux[0] > 0.0 && aux[0] < 1.0);
        assert_eq!(aux[1], 0.5);
        let entity_mass: f32 = aux[2..band - 2].iter().sum();
        assert!((entity_mass - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_is_error() {
        let config = EmbeddingConfig::default();
        let analysis = TextAnalysis {
            sentiment: Some(Sentiment {
                score: f32::NAN,
                comparative: 0.0,
            }),
            entities: None,
        };
        let err = extract_features("text", Some(&analysis), &config).unwrap_err();
        assert!(matches!(err, EmbeddingError::NonFinite(_)));
    }
}
