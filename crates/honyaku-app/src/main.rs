// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Honyaku — manga page translator
//
// Entry point. Initialises logging and backend services, then translates every
// page of the input document and exports the records.

mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use honyaku_core::human_errors::humanize_error;

use services::app_services::AppServices;

const USAGE: &str = "usage: honyaku <input.png|jpg|pdf|cbz> <output.pdf|epub>";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [input, output] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let (input, output) = (PathBuf::from(input), PathBuf::from(output));

    tracing::info!("Honyaku starting");

    let result = AppServices::init()
        .and_then(|mut services| services.translate_document(&input, &output));

    match result {
        Ok(records) => {
            tracing::info!(records, output = %output.display(), "Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "translation run failed");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}
