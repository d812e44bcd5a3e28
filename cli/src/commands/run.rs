//! `netdiag run` — execute the configured probes and export the results.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args};
use netdiag_common::Platform;

use crate::application::services::diagnostics::{COMPLETED_MESSAGE, run_diagnostics};
use crate::domain::config::{RawInputs, RunConfig};
use crate::infra::{LocalFs, PathLookup, TokioCommandRunner};
use crate::output::{HumanRenderer, OutputContext, TerminalReporter, json};

/// Arguments for the run command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)] // each flag is an independent host input
pub struct RunArgs {
    /// Hostname or address every probe targets
    #[arg(long, env = "NETDIAG_TARGET")]
    pub target: Option<String>,

    /// Newline-separated, ordered probe list
    #[arg(long, env = "NETDIAG_TOOLS")]
    pub tools: Option<String>,

    /// Probe to run after those in --tools (repeatable)
    #[arg(long = "tool", value_name = "NAME")]
    pub tool: Vec<String>,

    /// Append a network-trace note to the report
    #[arg(long, env = "NETDIAG_CAPTURE_NETWORK_TRACE")]
    pub capture_network_trace: bool,

    /// Script body for the `script` probe
    #[arg(long, env = "NETDIAG_CUSTOM_SCRIPT")]
    pub custom_script: Option<String>,

    /// Redact tokens and Authorization headers in written files
    #[arg(long, env = "NETDIAG_SANITIZE_OUTPUTS")]
    pub sanitize_outputs: bool,

    /// Copy outputs to the staging directory and compress them
    #[arg(
        long,
        env = "NETDIAG_ARCHIVE_ARTIFACTS",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new(),
        value_name = "BOOL"
    )]
    pub archive_artifacts: bool,

    /// Copy outputs to the staging directory when archiving is off
    #[arg(long, env = "NETDIAG_SAVE_ARTIFACTS")]
    pub save_artifacts: bool,

    /// Base name for the copied directory and the archive
    #[arg(long, env = "NETDIAG_ARTIFACT_NAME")]
    pub artifact_name: Option<String>,

    /// Per-attempt timeout in seconds (0 means the default of 30)
    #[arg(long, env = "NETDIAG_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// Extra attempts after a failed one
    #[arg(long, env = "NETDIAG_RETRIES")]
    pub retries: Option<u32>,

    /// Directory for probe logs, report.json and summary.txt
    #[arg(long, env = "NETDIAG_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory receiving the copy and the archive
    #[arg(long, env = "NETDIAG_STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,
}

impl From<RunArgs> for RawInputs {
    fn from(args: RunArgs) -> Self {
        Self {
            target: args.target,
            tools: args.tools,
            extra_tools: args.tool,
            capture_network_trace: args.capture_network_trace,
            custom_script: args.custom_script,
            sanitize_outputs: args.sanitize_outputs,
            archive_artifacts: args.archive_artifacts,
            save_artifacts: args.save_artifacts,
            artifact_name: args.artifact_name,
            timeout_seconds: args.timeout_seconds,
            retries: args.retries,
            output_dir: args.output_dir,
            staging_dir: args.staging_dir,
        }
    }
}

/// Entry point for `netdiag run`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the run fails
/// outside the per-probe loop.
pub async fn run(ctx: &OutputContext, args: RunArgs, json: bool) -> Result<()> {
    let config = RunConfig::from_inputs(args.into())?;
    let platform = Platform::current();
    tracing::debug!(?platform, output_dir = %config.output_dir.display(), "resolved run configuration");

    let runner = TokioCommandRunner::new();
    let resolver = PathLookup::new(runner, platform);
    let store = LocalFs;

    let output = {
        // JSON mode keeps stdout for the report only.
        let quiet_ctx;
        let reporter_ctx = if json {
            quiet_ctx = OutputContext::new(true, true);
            &quiet_ctx
        } else {
            ctx
        };
        let reporter = TerminalReporter::new(reporter_ctx);
        run_diagnostics(&config, platform, &runner, &resolver, &store, &reporter).await?
    };

    if json {
        println!("{}", json::format_report(&output.report)?);
    } else {
        HumanRenderer::new(ctx).render_run(&output);
        println!("{COMPLETED_MESSAGE}");
    }
    Ok(())
}
