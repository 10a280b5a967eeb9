//! Replay subcommand - drive expansions from a recorded session file.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;
use serde_json::Value;

use crate::context::Context;
use crate::di::FromRef;
use crate::generator::ReplayGenerator;
use crate::models::KnowledgeGraph;
use crate::render::TracingRenderer;
use crate::services::{ExpandOutcome, ExpansionService};

/// A recorded expansion session.
///
/// Each step names the focus that was expanded and carries the generator
/// response it received. A string response is replayed verbatim (which is
/// how transport failures are reproduced); any other JSON value is
/// re-serialized as the raw body.
#[derive(Debug, Deserialize)]
struct ReplaySession {
    steps: Vec<ReplayStep>,
}

#[derive(Debug, Deserialize)]
struct ReplayStep {
    focus: String,
    response: Value,
}

/// Replay a recorded expansion session against a fresh graph.
#[derive(Parser)]
pub struct ReplayCommand {
    /// Path to the session file (JSON).
    pub input: PathBuf,

    /// Pretty-print the resulting graph snapshot.
    #[arg(long)]
    pub pretty: bool,
}

impl ReplayCommand {
    /// Run the replay command.
    pub async fn run(self) -> color_eyre::Result<()> {
        let content = std::fs::read_to_string(&self.input)?;
        let session: ReplaySession = serde_json::from_str(&content).map_err(|e| {
            color_eyre::eyre::eyre!(
                "could not parse {} as a replay session: {}",
                self.input.display(),
                e
            )
        })?;

        let responses: Vec<String> = session
            .steps
            .iter()
            .map(|step| match &step.response {
                Value::String(raw) => raw.clone(),
                other => other.to_string(),
            })
            .collect();

        let ctx = Context::from_env(Arc::new(ReplayGenerator::new(responses)))?;
        let service = ExpansionService::from_ref(&ctx);
        let mut graph = KnowledgeGraph::new(ctx.catalog.root_node());
        let mut renderer = TracingRenderer;

        tracing::info!(
            domain = %ctx.catalog.name(),
            steps = session.steps.len(),
            "replaying session"
        );

        for step in &session.steps {
            match service.expand(&mut graph, &step.focus, &mut renderer).await {
                Ok(ExpandOutcome::Expanded { nodes, .. }) => {
                    tracing::info!(focus = %step.focus, children = nodes.len(), "expanded");
                }
                Ok(outcome) => {
                    tracing::info!(focus = %step.focus, ?outcome, "skipped");
                }
                Err(e) => {
                    // terminal for this step only; the graph is unchanged
                    // and later steps may still apply
                    tracing::warn!(focus = %step.focus, error = %e, "expansion failed");
                }
            }
        }

        let snapshot = graph.snapshot();
        let json = if self.pretty {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string(&snapshot)?
        };
        println!("{json}");

        Ok(())
    }
}
