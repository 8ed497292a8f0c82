//! Views over the analysis results for display and export

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::models::AliasRegistry;
use crate::models::Identity;
use crate::models::InteractionGraph;
use crate::models::ParseStats;
use crate::models::TfIdfTable;
use crate::tfidf::ranked_terms;

/// Most frequent display name per identity; ties go to the name seen first
pub fn representative_aliases(aliases: &AliasRegistry) -> BTreeMap<Identity, String> {
    aliases
        .iter()
        .filter_map(|(id, names)| {
            let mut best = names.first()?;
            for entry in names {
                if entry.count > best.count {
                    best = entry;
                }
            }
            Some((id.clone(), best.name.clone()))
        })
        .collect()
}

/// Identities ordered by number of messages, most active first
pub fn ids_by_activity(aliases: &AliasRegistry) -> Vec<Identity> {
    let mut ids: Vec<(&Identity, usize)> = aliases
        .ids()
        .map(|id| (id, aliases.total_count(id)))
        .collect();
    ids.sort_by(|a, b| b.1.cmp(&a.1));
    ids.into_iter().map(|(id, _)| id.clone()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub word: String,
    pub score: f64,
}

/// One participant's line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub id: Identity,
    pub name: String,
    pub messages: usize,
    pub top_terms: Vec<RankedTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub stats: ParseStats,
    pub graph: InteractionGraph,
    /// In activity order
    pub participants: Vec<ParticipantSummary>,
}

impl Report {
    pub fn build(
        aliases: &AliasRegistry,
        graph: &InteractionGraph,
        table: &TfIdfTable,
        stats: ParseStats,
        top_n: usize,
    ) -> Self {
        let names = representative_aliases(aliases);

        let participants = ids_by_activity(aliases)
            .into_iter()
            .map(|id| ParticipantSummary {
                name: names.get(&id).cloned().unwrap_or_default(),
                messages: aliases.total_count(&id),
                top_terms: ranked_terms(table, &id, top_n)
                    .into_iter()
                    .map(|(word, score)| RankedTerm { word, score })
                    .collect(),
                id,
            })
            .collect();

        Self {
            stats,
            graph: graph.clone(),
            participants,
        }
    }

    /// Display name for an identity, falling back to the identity itself
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map_or(id, |p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AliasRegistry {
        let mut aliases = AliasRegistry::new();
        for (id, name) in [
            ("1", "Bob"),
            ("1", "Bobby"),
            ("1", "Bobby"),
            ("2", "Ann"),
            ("2", "Annie"),
            ("3", "Cat"),
            ("3", "Cat"),
            ("3", "Cat"),
            ("3", "Cat"),
        ] {
            aliases.record(id, name);
        }
        aliases
    }

    #[test]
    fn test_representative_alias_prefers_count() {
        let names = representative_aliases(&registry());
        assert_eq!(names["1"], "Bobby");
        assert_eq!(names["3"], "Cat");
    }

    #[test]
    fn test_representative_alias_tie_goes_to_first_seen() {
        let names = representative_aliases(&registry());
        assert_eq!(names["2"], "Ann");
    }

    #[test]
    fn test_ids_by_activity() {
        assert_eq!(ids_by_activity(&registry()), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_report_skips_terms_for_unscored_ids() {
        let mut table = TfIdfTable::new();
        table.insert(
            "1".to_string(),
            BTreeMap::from([("hello".to_string(), 0.4), ("world".to_string(), 0.2)]),
        );

        let report = Report::build(
            &registry(),
            &InteractionGraph::default(),
            &table,
            ParseStats::default(),
            1,
        );

        assert_eq!(report.participants.len(), 3);
        let bob = &report.participants[1];
        assert_eq!(bob.name, "Bobby");
        assert_eq!(bob.messages, 3);
        assert_eq!(bob.top_terms.len(), 1);
        assert_eq!(bob.top_terms[0].word, "hello");
        assert!(report.participants[0].top_terms.is_empty());
        assert_eq!(report.display_name("1"), "Bobby");
        assert_eq!(report.display_name("unknown"), "unknown");
    }
}
