//! Interaction graph
//!
//! Two people interact when they talk in the same session. Within a session
//! each participant gets a share of the messages; a pair accumulates the
//! product of their shares. Sessions are detected at a short and a long gap
//! limit and both contributions are summed, so quick back-and-forth and
//! slower conversations both count.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::AliasRegistry;
use crate::models::GraphLink;
use crate::models::GraphNode;
use crate::models::Identity;
use crate::models::InteractionGraph;
use crate::models::Message;
use crate::session::detect_sessions;

/// Gap limit for rapid exchanges, in seconds
pub const SHORT_GAP_SECS: i64 = 30;
/// Gap limit for slow conversations, in seconds
pub const LONG_GAP_SECS: i64 = 30 * 60;
/// Pairs whose summed weight does not exceed this are dropped
pub const DEFAULT_LINK_THRESHOLD: f64 = 1.0;

/// Unordered identity pair, smaller identity first
pub type Pair = (Identity, Identity);

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionOptions {
    pub gaps: Vec<i64>,
    pub link_threshold: f64,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            gaps: vec![SHORT_GAP_SECS, LONG_GAP_SECS],
            link_threshold: DEFAULT_LINK_THRESHOLD,
        }
    }
}

/// Sum of share products for every pair that shared a session
pub fn pair_weights(messages: &[Message], gaps: &[i64]) -> BTreeMap<Pair, f64> {
    let mut weights: BTreeMap<Pair, f64> = BTreeMap::new();

    for &gap in gaps {
        for session in detect_sessions(messages, gap) {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for message in session {
                *counts.entry(message.id.as_str()).or_insert(0) += 1;
            }

            let length = session.len() as f64;
            let shares: Vec<(&str, f64)> = counts
                .into_iter()
                .map(|(id, count)| (id, count as f64 / length))
                .collect();

            for (i, &(a, share_a)) in shares.iter().enumerate() {
                for &(b, share_b) in &shares[i + 1..] {
                    *weights
                        .entry((a.to_string(), b.to_string()))
                        .or_insert(0.0) += share_a * share_b;
                }
            }
        }
    }

    weights
}

/// Build the graph: every remaining identity is a node, pairs above the
/// threshold are links scaled so the strongest is 1.0
pub fn build_graph(
    messages: &[Message],
    aliases: &AliasRegistry,
    options: &InteractionOptions,
) -> InteractionGraph {
    let nodes: Vec<GraphNode> = aliases
        .ids()
        .enumerate()
        .map(|(group, id)| GraphNode {
            id: id.clone(),
            group,
        })
        .collect();

    let mut links: Vec<GraphLink> = pair_weights(messages, &options.gaps)
        .into_iter()
        .filter(|(_, weight)| *weight > options.link_threshold)
        .map(|((source, target), value)| GraphLink {
            source,
            target,
            value,
        })
        .collect();

    let maximum = links.iter().map(|link| link.value).fold(0.0_f64, f64::max);
    if maximum > 0.0 {
        for link in &mut links {
            link.value /= maximum;
        }
    }

    debug!(
        "Interaction graph: {} nodes, {} links",
        nodes.len(),
        links.len()
    );

    InteractionGraph { nodes, links }
}
