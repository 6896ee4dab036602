//! Local text analysis: word-valence sentiment and capitalized-run entities.
//!
//! A small, dependency-free stand-in for a real NLP service. Sentiment uses
//! an AFINN-style valence table: `score` is the sum of word valences and
//! `comparative` is that sum divided by the token count. Entities are runs of
//! capitalized words; the more often a run appears, the higher its
//! confidence.

use async_trait::async_trait;
use std::collections::HashMap;
use tabgroup_core::capability::{Entity, Sentiment, TextAnalysis, TextAnalyzer};
use tabgroup_core::error::CapabilityError;

/// Words that start sentences often enough to never count as entities alone.
const SENTENCE_STARTERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "it", "its", "we", "i", "you", "he",
    "she", "they", "our", "my", "in", "on", "at", "for", "and", "but", "or", "if", "when",
    "how", "what", "why", "where", "who", "there", "here", "with", "from", "to", "of", "as",
];

/// Valence of a lowercase word, if it carries one.
fn valence(word: &str) -> Option<i32> {
    let v = match word {
        "outstanding" | "superb" | "breathtaking" => 5,
        "amazing" | "awesome" | "brilliant" | "excellent" | "fantastic" | "wonderful"
        | "love" | "loved" | "loves" => 4,
        "great" | "happy" | "beautiful" | "best" | "perfect" | "delightful" | "win" => 3,
        "good" | "nice" | "like" | "enjoy" | "helpful" | "fun" | "success" | "successful"
        | "easy" | "better" | "useful" | "fast" | "clean" | "safe" => 2,
        "ok" | "okay" | "fine" | "interesting" | "fair" => 1,
        "slow" | "hard" | "difficult" | "confusing" | "unclear" | "boring" => -1,
        "bad" | "poor" | "problem" | "problems" | "bug" | "bugs" | "broken" | "wrong" | "sad"
        | "fail" | "failed" | "failure" | "error" | "errors" => -2,
        "awful" | "terrible" | "hate" | "hated" | "ugly" | "crash" | "worse" => -3,
        "horrible" | "disaster" | "worst" => -4,
        _ => return None,
    };
    Some(v)
}

/// Strip leading/trailing punctuation from a raw word.
fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_uppercase() && word.chars().count() > 1,
        None => false,
    }
}

/// Dictionary-based analyzer. Always available, never fails.
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    /// Entities returned per text, most confident first.
    max_entities: usize,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self { max_entities: 10 }
    }

    /// Set the maximum number of entities returned.
    pub fn with_max_entities(mut self, max: usize) -> Self {
        self.max_entities = max;
        self
    }

    /// Sentiment over all words of the text; `None` if it has no words.
    pub fn sentiment(&self, text: &str) -> Option<Sentiment> {
        let mut tokens = 0usize;
        let mut score = 0i32;
        for raw in text.split_whitespace() {
            let word = trim_word(raw).to_lowercase();
            if word.is_empty() {
                continue;
            }
            tokens += 1;
            score += valence(&word).unwrap_or(0);
        }
        if tokens == 0 {
            return None;
        }
        Some(Sentiment {
            score: score as f32,
            comparative: score as f32 / tokens as f32,
        })
    }

    /// Runs of capitalized words, ranked by frequency then first appearance.
    pub fn entities(&self, text: &str) -> Vec<Entity> {
        let mut counts: HashMap<String, (usize, usize, usize)> = HashMap::new();
        let mut run: Vec<&str> = Vec::new();
        let mut sentence_start = true;
        let mut order = 0usize;

        let mut flush = |run: &mut Vec<&str>, counts: &mut HashMap<String, (usize, usize, usize)>| {
            if run.is_empty() {
                return;
            }
            let name = run.join(" ");
            let words = run.len();
            let entry = counts.entry(name).or_insert((0, order, words));
            entry.0 += 1;
            order += 1;
            run.clear();
        };

        for raw in text.split_whitespace() {
            let word = trim_word(raw);
            let ends_sentence = raw.ends_with(['.', '!', '?']);
            let starter = sentence_start
                && SENTENCE_STARTERS.contains(&word.to_lowercase().as_str());

            if is_capitalized(word) && !starter {
                run.push(word);
            } else {
                flush(&mut run, &mut counts);
            }
            if ends_sentence || raw.ends_with([',', ';', ':']) {
                flush(&mut run, &mut counts);
            }
            sentence_start = ends_sentence;
        }
        flush(&mut run, &mut counts);

        let mut ranked: Vec<(String, (usize, usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

        ranked
            .into_iter()
            .take(self.max_entities)
            .map(|(name, (count, _, words))| {
                let confidence = 0.5 + 0.1 * (count - 1) as f32 + if words > 1 { 0.1 } else { 0.0 };
                Entity::new(name, confidence.min(0.95))
            })
            .collect()
    }
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextAnalyzer for LexiconAnalyzer {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn analyze(&self, text: &str) -> Result<TextAnalysis, CapabilityError> {
        let entities = self.entities(text);
        Ok(TextAnalysis {
            sentiment: self.sentiment(text),
            entities: (!entities.is_empty()).then_some(entities),
        })
    }
}
