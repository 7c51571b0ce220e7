// Extractive summary: the K most central sentences, in document order.
//
// Each sentence is treated as its own document for TF-IDF. A sentence's
// importance is the summed TF-IDF weight of its distinct content words, so
// sentences carrying many distinctive terms win over boilerplate. The
// winners are put back in their original order before joining.

use std::collections::{HashMap, HashSet};

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use stop_words::{get, LANGUAGE};

use super::traits::FieldExtractor;

/// Fragments shorter than this (headings, bullet labels) are not sentences.
const MIN_SENTENCE_WORDS: usize = 4;

#[derive(Debug, Clone)]
pub struct SummaryExtractor {
    /// How many sentences make up the summary (K)
    pub sentences: usize,
}

impl Default for SummaryExtractor {
    fn default() -> Self {
        Self { sentences: 3 }
    }
}

impl FieldExtractor for SummaryExtractor {
    type Output = Option<String>;

    fn extract(&self, text: &str) -> Option<String> {
        let sentences = split_sentences(text);
        if sentences.is_empty() || self.sentences == 0 {
            return None;
        }

        if sentences.len() <= self.sentences {
            return Some(sentences.join(" "));
        }

        let scores = sentence_scores(&sentences);
        let mut ranked: Vec<usize> = (0..sentences.len()).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

        let mut chosen: Vec<usize> = ranked.into_iter().take(self.sentences).collect();
        chosen.sort_unstable();

        Some(
            chosen
                .into_iter()
                .map(|i| sentences[i].as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// Split on sentence terminators and line breaks, keeping the terminator.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' || c == '\r' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |next| next.is_whitespace()) {
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current
        .trim()
        .trim_start_matches(['-', '*', '•'])
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if sentence.split_whitespace().count() >= MIN_SENTENCE_WORDS {
        sentences.push(sentence);
    }
    current.clear();
}

fn sentence_scores(sentences: &[String]) -> Vec<f64> {
    let stop_words: Vec<String> = get(LANGUAGE::English);
    let params = TfIdfParams::UnprocessedDocuments(sentences, &stop_words, None);
    let tfidf = TfIdf::new(params);

    let word_bound: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
    let weights: HashMap<String, f32> = tfidf
        .get_ranked_word_scores(word_bound)
        .into_iter()
        .map(|(word, score)| (word.to_lowercase(), score))
        .collect();

    sentences
        .iter()
        .map(|sentence| {
            let terms: HashSet<String> = sentence
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_lowercase)
                .filter(|w| !stop_words.contains(w))
                .collect();
            terms
                .iter()
                .map(|t| weights.get(t).copied().unwrap_or(0.0) as f64)
                .sum()
        })
        .collect()
}
