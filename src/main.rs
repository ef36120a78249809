//! ptrsweep - reverse DNS sweeps over IPv4 ranges.
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use ptrsweep::cli::Args;
use ptrsweep::config::{discover_resolver, RESOLV_CONF};
use ptrsweep::output::{print_error, print_warning, Reporter};
use ptrsweep::resolver::DnsPtrResolver;
use ptrsweep::scanner::ScanController;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            print_error(&format!("failed to start runtime: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run());
    // The abort-key reader may still be blocked on stdin; don't wait for it.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    ptrsweep::logging::init(&args.log_level)?;

    let settings = args.load_settings().context("failed to load settings")?;
    let dns = args.dns_spec(&settings);
    let endpoint = discover_resolver(dns.as_deref(), Path::new(RESOLV_CONF)).await?;
    let config = args.scan_config(&settings, endpoint);

    let reporter = Reporter::stdout();
    let resolver = Arc::new(DnsPtrResolver::new(&config));
    let controller = ScanController::new(config.clone(), resolver, reporter.clone());

    let interactive = !args.noinput;
    reporter.banner(&config, interactive);
    if interactive {
        controller.abort_on_input(tokio::io::stdin());
    }

    let targets = args.targets();
    let summary = controller
        .run(&targets.ranges())
        .await
        .context("Error scanning range")?;

    if summary.cancelled {
        print_warning(&format!(
            "stopped after {} range(s), {} address(es) queried",
            summary.ranges_scanned,
            summary.stats.queried()
        ));
    }
    Ok(())
}
