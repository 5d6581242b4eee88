// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `kcprov` binary: provision Keycloak users from `users.csv`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kcprov_config::DEFAULT_CONFIG_FILE;
use kcprov_roster::DEFAULT_ROSTER_FILE;

/// Create missing Keycloak users listed in a CSV roster and email them a
/// password-reset link.
#[derive(Parser, Debug)]
#[command(name = "kcprov", version)]
struct Args {
	#[command(subcommand)]
	command: Option<Command>,

	/// Identity-provider settings (TOML)
	#[arg(long, env = "KCPROV_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
	config: PathBuf,

	/// Users to provision (CSV with a header row)
	#[arg(long, env = "KCPROV_ROSTER", default_value = DEFAULT_ROSTER_FILE)]
	roster: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", kcprov_common_version::format_version_info());
		return Ok(());
	}

	kcprov_cli::logging::init();

	let report = kcprov_cli::run(&args.config, &args.roster).await?;
	tracing::debug!(?report, "run finished");
	Ok(())
}
