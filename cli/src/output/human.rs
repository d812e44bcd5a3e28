//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::services::diagnostics::RunOutput;
use crate::domain::probe::{CommandRule, ProbeId};
use crate::output::OutputContext;

/// Renders run results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

/// One row of `netdiag probes`.
pub struct ProbeRow {
    pub probe: ProbeId,
    pub rule: CommandRule,
    /// Command line that would run on this host.
    pub selected: Option<String>,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the end-of-run overview.
    pub fn render_run(&self, output: &RunOutput) {
        if self.ctx.quiet {
            return;
        }
        let report = &output.report;
        let failed = report.results.iter().filter(|r| r.error().is_some()).count();

        println!();
        self.ctx.header(&format!("Network diagnostics for {}", report.target));
        self.ctx.kv("Probes:", &format!("{} run, {failed} failed", report.results.len()));
        self.ctx.kv("Output:", &output.output_dir.display().to_string());
        if let Some(dest) = &output.copied_to {
            self.ctx.kv("Saved:", &dest.display().to_string());
        }
        if let Some(archive) = &output.archive {
            self.ctx.kv("Archive:", &archive.display().to_string());
        }
        println!();
    }

    /// Render the registered probe table.
    pub fn render_probes(&self, rows: &[ProbeRow]) {
        println!();
        println!("  {}", "Registered probes".style(self.ctx.styles.header));
        println!();
        for row in rows {
            let candidates = row.rule.candidate_names().join(", ");
            let selected = row.selected.as_deref().unwrap_or("(custom script body)");
            println!(
                "  {:<12} {:<26} {}",
                row.probe.name().style(self.ctx.styles.bold),
                row.probe.description(),
                selected.style(self.ctx.styles.dim)
            );
            if !candidates.is_empty() {
                println!("  {:<12} {:<26} candidates: {candidates}", "", "");
            }
        }
        println!();
    }
}
