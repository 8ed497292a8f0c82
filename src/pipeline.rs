//! End-to-end analysis of one chat export
//!
//! parse -> clean -> { interaction graph, tf-idf }

use tracing::info;

use crate::cleaner::clean;
use crate::cleaner::CleanOptions;
use crate::config::AnalysisConfig;
use crate::interaction::build_graph;
use crate::interaction::InteractionOptions;
use crate::models::AliasRegistry;
use crate::models::InteractionGraph;
use crate::models::Message;
use crate::models::ParseStats;
use crate::models::TfIdfTable;
use crate::parser::parse_with;
use crate::parser::TimestampPolicy;
use crate::report::Report;
use crate::tfidf::calc_tfidf;
use crate::Result;

/// Everything one run needs besides the text
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub clean: CleanOptions,
    pub interaction: InteractionOptions,
    pub timestamps: TimestampPolicy,
}

impl From<&AnalysisConfig> for AnalysisOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            clean: CleanOptions {
                interactive_bots: config.interactive_bots.clone(),
                non_interactive_bots: config.non_interactive_bots.clone(),
                extra_blacklist: config.extra_blacklist.clone(),
            },
            interaction: InteractionOptions {
                gaps: vec![config.short_gap_secs, config.long_gap_secs],
                link_threshold: config.link_threshold,
            },
            timestamps: TimestampPolicy::from_strict(config.strict_timestamps),
        }
    }
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Messages left after cleaning, in export order
    pub messages: Vec<Message>,
    pub aliases: AliasRegistry,
    pub graph: InteractionGraph,
    pub tfidf: TfIdfTable,
    pub stats: ParseStats,
}

impl Analysis {
    pub fn report(&self, top_n: usize) -> Report {
        Report::build(&self.aliases, &self.graph, &self.tfidf, self.stats, top_n)
    }
}

/// Parse and clean an export without scoring it
pub fn prepare(
    text: &str,
    options: &AnalysisOptions,
) -> Result<(Vec<Message>, AliasRegistry, ParseStats)> {
    let transcript = parse_with(text, options.timestamps)?;
    let mut aliases = transcript.aliases;
    let mut stats = transcript.stats;

    let before = transcript.messages.len();
    let messages = clean(transcript.messages, &mut aliases, &options.clean);
    stats.removed_messages = before - messages.len();

    Ok((messages, aliases, stats))
}

/// Run the whole pipeline over one export
pub fn analyze(text: &str, options: &AnalysisOptions) -> Result<Analysis> {
    let (messages, aliases, stats) = prepare(text, options)?;

    let graph = build_graph(&messages, &aliases, &options.interaction);
    let tfidf = calc_tfidf(&messages);

    info!(
        "Analyzed {} messages from {} participants: {} links",
        messages.len(),
        aliases.len(),
        graph.links.len()
    );

    Ok(Analysis {
        messages,
        aliases,
        graph,
        tfidf,
        stats,
    })
}
