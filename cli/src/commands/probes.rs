//! `netdiag probes` — list the registered probes and what would run here.

use anyhow::{Context, Result};
use netdiag_common::Platform;
use serde::Serialize;

use crate::application::ports::ExecutableResolver;
use crate::domain::config::DEFAULT_TIMEOUT_SECS;
use crate::domain::probe::{ALL_PROBES, CommandRule, command_rule};
use crate::infra::{PathLookup, TokioCommandRunner};
use crate::output::OutputContext;
use crate::output::human::{HumanRenderer, ProbeRow};

/// Placeholder target shown in listed command lines.
const SAMPLE_TARGET: &str = "<target>";

#[derive(Serialize)]
struct ProbeEntry<'a> {
    name: &'a str,
    description: &'a str,
    candidates: Vec<&'a str>,
    command: Option<String>,
}

/// Entry point for `netdiag probes`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(ctx: &OutputContext, json: bool) -> Result<()> {
    let platform = Platform::current();
    let resolver = PathLookup::new(TokioCommandRunner::new(), platform);
    let rows = collect(&resolver, platform).await;

    if json {
        let entries: Vec<ProbeEntry<'_>> = rows
            .iter()
            .map(|row| ProbeEntry {
                name: row.probe.name(),
                description: row.probe.description(),
                candidates: row.rule.candidate_names(),
                command: row.selected.clone(),
            })
            .collect();
        let text = serde_json::to_string_pretty(&serde_json::json!({ "probes": entries }))
            .context("JSON serialization failed")?;
        println!("{text}");
    } else {
        HumanRenderer::new(ctx).render_probes(&rows);
    }
    Ok(())
}

/// Resolve every registered probe against this host.
pub async fn collect(resolver: &impl ExecutableResolver, platform: Platform) -> Vec<ProbeRow> {
    let mut rows = Vec::with_capacity(ALL_PROBES.len());
    for probe in ALL_PROBES.iter().copied() {
        let rule = command_rule(probe, platform, SAMPLE_TARGET, DEFAULT_TIMEOUT_SECS);
        let found = match &rule {
            CommandRule::FirstAvailable { .. } => resolver.resolve(&rule.candidate_names()).await,
            CommandRule::Fixed(_) | CommandRule::Script => None,
        };
        let selected = rule
            .clone()
            .select(found.as_deref())
            .map(|invocation| invocation.to_string());
        rows.push(ProbeRow {
            probe,
            rule,
            selected,
        });
    }
    rows
}
