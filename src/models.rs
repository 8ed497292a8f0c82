use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Stable key for one chat participant (numeric account id or email-like contact)
pub type Identity = String;

/// Per-identity token scores: identity -> token value -> score
pub type TfIdfTable = BTreeMap<Identity, BTreeMap<String, f64>>;

/// Lexical unit produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Two adjacent Han characters
    Bigram(String),
    /// Lowercased run of ASCII Latin letters
    English(String),
}

impl Token {
    pub fn value(&self) -> &str {
        match self {
            Token::Bigram(value) | Token::English(value) => value,
        }
    }
}

/// Parsed header line, before the timestamp is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Timestamp text exactly as it appeared in the line
    pub time: String,
    pub name: String,
    pub id: Identity,
}

/// One chat message with its tokenized body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Seconds since the Unix epoch
    pub time: i64,
    pub id: Identity,
    pub tokens: Vec<Token>,
}

impl Message {
    pub fn new(time: i64, id: impl Into<Identity>) -> Self {
        Self {
            time,
            id: id.into(),
            tokens: Vec::new(),
        }
    }
}

/// Display name observed for an identity, with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

/// identity -> observed display names
///
/// Display names keep first-seen order so that ties on count resolve to the
/// earliest name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRegistry {
    entries: BTreeMap<Identity, Vec<NameCount>>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `name` for `id`.
    ///
    /// Returns `true` when the name had not been seen for this identity before.
    pub fn record(&mut self, id: &str, name: &str) -> bool {
        let names = self.entries.entry(id.to_string()).or_default();
        match names.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.count += 1;
                false
            }
            None => {
                names.push(NameCount {
                    name: name.to_string(),
                    count: 1,
                });
                true
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Vec<NameCount>> {
        self.entries.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn names(&self, id: &str) -> Option<&[NameCount]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &Identity> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identity, &[NameCount])> {
        self.entries.iter().map(|(id, names)| (id, names.as_slice()))
    }

    /// Every display name seen for every identity
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .flat_map(|names| names.iter().map(|entry| entry.name.as_str()))
    }

    /// Sum of name occurrences, i.e. the number of headers seen for `id`
    pub fn total_count(&self, id: &str) -> usize {
        self.entries
            .get(id)
            .map_or(0, |names| names.iter().map(|entry| entry.count).sum())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Graph node; `group` is the node's index, used by renderers for coloring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: Identity,
    pub group: usize,
}

/// Undirected weighted edge, `value` in (0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: Identity,
    pub target: Identity,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Counters collected while assembling and cleaning messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines: usize,
    pub messages: usize,
    /// Header lines dropped because their timestamp was not a real date-time
    pub rejected_headers: usize,
    /// Body lines with no open message to attach to
    pub discarded_lines: usize,
    /// Messages removed by identity cleaning
    pub removed_messages: usize,
}
