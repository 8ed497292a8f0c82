//! Per-speaker distinguishing vocabulary
//!
//! Each identity's messages together form one document. A word scores high
//! for a speaker who uses it often while few others use it at all. Words
//! used by a single speaker are left out: they are mostly typos, links and
//! other noise rather than vocabulary.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;

use tracing::debug;

use crate::models::Message;
use crate::models::TfIdfTable;

/// Number of words shown per identity
pub const DEFAULT_TOP_TERMS: usize = 10;

/// Score every word for every identity.
///
/// `tf` counts every occurrence; `df` counts distinct identities. The
/// identity total includes speakers whose messages had no tokens, but those
/// speakers get no entry in the table.
pub fn calc_tfidf(messages: &[Message]) -> TfIdfTable {
    let mut tf: BTreeMap<&str, HashMap<&str, usize>> = BTreeMap::new();
    let mut df: HashMap<&str, BTreeSet<&str>> = HashMap::new();

    for message in messages {
        let counts = tf.entry(message.id.as_str()).or_default();
        for token in &message.tokens {
            *counts.entry(token.value()).or_insert(0) += 1;
            df.entry(token.value())
                .or_default()
                .insert(message.id.as_str());
        }
    }

    let identities = tf.len() as f64;
    let mut table = TfIdfTable::new();

    for (id, counts) in &tf {
        let total: usize = counts.values().sum();
        if total == 0 {
            continue;
        }

        let scores: BTreeMap<String, f64> = counts
            .iter()
            .filter_map(|(word, &count)| {
                let speakers = df.get(word).map_or(0, BTreeSet::len);
                if speakers <= 1 {
                    return None;
                }
                let idf = (identities / (speakers as f64 + 1.0)).ln();
                Some(((*word).to_string(), count as f64 / total as f64 * idf))
            })
            .collect();

        table.insert((*id).to_string(), scores);
    }

    debug!(
        "TF-IDF over {} identities and {} distinct words",
        tf.len(),
        df.len()
    );

    table
}

/// Top `n` words for `id`, highest score first, ties by word
pub fn ranked_terms(table: &TfIdfTable, id: &str, n: usize) -> Vec<(String, f64)> {
    let Some(scores) = table.get(id) else {
        return Vec::new();
    };

    let mut ranked: Vec<(String, f64)> = scores
        .iter()
        .map(|(word, score)| (word.clone(), *score))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
