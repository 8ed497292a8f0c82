//! CLI command handlers

use std::path::Path;

use tracing::info;

use crate::cleaner::salted_digest;
use crate::cli::commands::BotArgs;
use crate::cli::commands::Commands;
use crate::cli::output::*;
use crate::config::OutputFormat;
use crate::pipeline::analyze;
use crate::pipeline::prepare;
use crate::pipeline::AnalysisOptions;
use crate::session::summarize;
use crate::AppConfig;
use crate::Result;

/// Read a chat export from disk
pub async fn read_export(path: &Path) -> Result<String> {
    let text = tokio::fs::read_to_string(path).await?;
    info!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Analysis options from the configuration, with bots from the command line added
pub fn options_for(config: &AppConfig, bots: &BotArgs) -> AnalysisOptions {
    let mut options = AnalysisOptions::from(&config.analysis);
    options.clean.interactive_bots.extend(bots.bots.iter().cloned());
    options
        .clean
        .non_interactive_bots
        .extend(bots.quiet_bots.iter().cloned());
    options
}

async fn write_or_print(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content).await?;
            print_success(&format!("Written to {}", path.display()));
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Handle analyze command
pub async fn handle_analyze(
    config: &AppConfig,
    input: &Path,
    bots: &BotArgs,
    format: Option<OutputFormat>,
    top: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let text = read_export(input).await?;
    let analysis = analyze(&text, &options_for(config, bots))?;
    let report = analysis.report(top.unwrap_or_else(|| config.top_terms()));

    if report.stats.rejected_headers > 0 {
        print_warning(&format!(
            "{} headers had invalid timestamps and were skipped",
            report.stats.rejected_headers
        ));
    }

    let content = match format.unwrap_or(config.output.format) {
        OutputFormat::Text => format_report(&report),
        OutputFormat::Json => to_json(&report, config.output.pretty)?,
    };
    write_or_print(output, &content).await
}

/// Handle graph command
pub async fn handle_graph(
    config: &AppConfig,
    input: &Path,
    bots: &BotArgs,
    output: Option<&Path>,
) -> Result<()> {
    let text = read_export(input).await?;
    let analysis = analyze(&text, &options_for(config, bots))?;
    let json = to_json(&analysis.graph, config.output.pretty)?;
    write_or_print(output, &json).await
}

/// Handle terms command
pub async fn handle_terms(
    config: &AppConfig,
    input: &Path,
    bots: &BotArgs,
    top: Option<usize>,
) -> Result<()> {
    let text = read_export(input).await?;
    let analysis = analyze(&text, &options_for(config, bots))?;
    let report = analysis.report(top.unwrap_or_else(|| config.top_terms()));
    print!("{}", format_terms(&report));
    Ok(())
}

/// Handle sessions command
pub async fn handle_sessions(
    config: &AppConfig,
    input: &Path,
    bots: &BotArgs,
    gap: Option<i64>,
) -> Result<()> {
    let text = read_export(input).await?;
    let (messages, aliases, _) = prepare(&text, &options_for(config, bots))?;
    print_info(&format!(
        "{} messages from {} participants after cleaning",
        messages.len(),
        aliases.len()
    ));

    let gaps = match gap {
        Some(gap) if gap > 0 => vec![gap],
        Some(gap) => {
            return Err(crate::ChatLensError::ConfigError(format!(
                "gap must be positive, got {gap}"
            )))
        }
        None => config.session_gaps().to_vec(),
    };

    let summaries: Vec<_> = gaps.iter().map(|&gap| summarize(&messages, gap)).collect();
    print_sessions(&summaries);
    Ok(())
}

/// Handle hash command
pub fn handle_hash(ids: &[String]) {
    for id in ids {
        println!("{id}\t{}", salted_digest(id));
    }
}

/// Dispatch a parsed command
pub async fn run_command(config: &AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            bots,
            format,
            top,
            output,
        } => handle_analyze(config, &input, &bots, format, top, output.as_deref()).await,
        Commands::Graph {
            input,
            bots,
            output,
        } => handle_graph(config, &input, &bots, output.as_deref()).await,
        Commands::Terms { input, bots, top } => handle_terms(config, &input, &bots, top).await,
        Commands::Sessions { input, bots, gap } => {
            handle_sessions(config, &input, &bots, gap).await
        }
        Commands::Hash { ids } => {
            handle_hash(&ids);
            Ok(())
        }
        Commands::Config => {
            print_config(config);
            Ok(())
        }
    }
}
