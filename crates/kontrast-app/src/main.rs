// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kontrast — concurrent grayscale image enhancement.
//
// Entry point. Initialises logging, resolves the run configuration, runs both
// workers once, and prints the three timing lines.

use std::process::ExitCode;

use kontrast_core::KontrastError;
use kontrast_core::RunConfig;
use kontrast_core::human_errors::humanize_error;
use kontrast_enhance::Coordinator;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Kontrast starting");

    let config = match RunConfig::resolve() {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };

    let mut coordinator = Coordinator::new(config);
    let report = match coordinator.run() {
        Ok(report) => report,
        Err(err) => return fail(&err),
    };

    for line in report.timing_lines() {
        println!("{line}");
    }

    if let Some(err) = &report.figure_error {
        eprintln!("{}", humanize_error(err));
    }

    tracing::info!(files = report.written_files().len(), "Kontrast finished");
    ExitCode::SUCCESS
}

fn fail(err: &KontrastError) -> ExitCode {
    tracing::error!(error = %err, "Kontrast failed");
    eprintln!("{}", humanize_error(err));
    ExitCode::FAILURE
}
