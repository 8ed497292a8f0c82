//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the chatlens CLI

use std::fmt::Write as _;

use serde::Serialize;

use crate::report::Report;
use crate::session::SessionSummary;
use crate::AppConfig;
use crate::Result;

/// Safely truncate a string at character boundary (not byte boundary)
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Serialize to JSON, pretty or compact
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Render the plain-text report
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let stats = &report.stats;

    let _ = writeln!(
        out,
        "📊 {} messages from {} participants ({} removed by cleaning, {} rejected headers)",
        stats.messages - stats.removed_messages,
        report.participants.len(),
        stats.removed_messages,
        stats.rejected_headers
    );
    out.push('\n');

    let _ = writeln!(out, "🔗 Interactions ({} links):", report.graph.links.len());
    let mut links: Vec<_> = report.graph.links.iter().collect();
    links.sort_by(|a, b| b.value.total_cmp(&a.value));
    for link in links {
        let _ = writeln!(
            out,
            "  {:.3}  {} ↔ {}",
            link.value,
            truncate_str(report.display_name(&link.source), 24),
            truncate_str(report.display_name(&link.target), 24)
        );
    }
    out.push('\n');

    out.push_str(&format_terms(report));
    out
}

/// One line per participant with top words, in activity order
pub fn format_terms(report: &Report) -> String {
    let mut out = String::from("💬 Signature words:\n");
    for participant in &report.participants {
        if participant.top_terms.is_empty() {
            continue;
        }
        let words: Vec<&str> = participant
            .top_terms
            .iter()
            .map(|term| term.word.as_str())
            .collect();
        let _ = writeln!(
            out,
            "  {}: {}",
            truncate_str(&participant.name, 24),
            words.join(", ")
        );
    }
    out
}

pub fn print_sessions(summaries: &[SessionSummary]) {
    println!("⏱️  Sessions:");
    for summary in summaries {
        println!(
            "  gap {:>5}s: {} sessions, {:.2} messages per session",
            summary.gap_secs, summary.sessions, summary.mean_length
        );
    }
}

pub fn print_config(config: &AppConfig) {
    println!("📋 Current configuration:");
    println!("  Log level: {}", config.logging.level);
    println!("  Log to file: {}", config.logging.log_to_file);
    println!(
        "  Session gaps: {}s / {}s",
        config.analysis.short_gap_secs, config.analysis.long_gap_secs
    );
    println!("  Link threshold: {}", config.analysis.link_threshold);
    println!("  Top terms: {}", config.analysis.top_terms);
    println!("  Strict timestamps: {}", config.analysis.strict_timestamps);
    println!(
        "  Interactive bots: {}",
        config.analysis.interactive_bots.join(", ")
    );
    println!(
        "  Non-interactive bots: {}",
        config.analysis.non_interactive_bots.join(", ")
    );
    println!(
        "  Extra blacklist entries: {}",
        config.analysis.extra_blacklist.len()
    );
    println!("  Output format: {:?}", config.output.format);
}

pub fn print_info(msg: &str) {
    eprintln!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    eprintln!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    eprintln!("⚠️  {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AliasRegistry;
    use crate::models::GraphLink;
    use crate::models::InteractionGraph;
    use crate::models::ParseStats;
    use crate::models::TfIdfTable;

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("你好世界", 2), "你好...");
        assert_eq!(truncate_str("abc", 5), "abc");
    }

    #[test]
    fn test_format_report_uses_display_names() {
        let mut aliases = AliasRegistry::new();
        aliases.record("1", "Ann");
        aliases.record("2", "Bob");
        let graph = InteractionGraph {
            nodes: Vec::new(),
            links: vec![GraphLink {
                source: "1".to_string(),
                target: "2".to_string(),
                value: 1.0,
            }],
        };
        let mut table = TfIdfTable::new();
        table.insert("1".to_string(), [("hi".to_string(), 0.5)].into_iter().collect());

        let report = Report::build(&aliases, &graph, &table, ParseStats::default(), 10);
        let text = format_report(&report);

        assert!(text.contains("1.000  Ann ↔ Bob"));
        assert!(text.contains("Ann: hi"));
        assert!(!text.contains("Bob: "));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&InteractionGraph::default(), false).unwrap();
        assert_eq!(json, r#"{"nodes":[],"links":[]}"#);
    }
}
