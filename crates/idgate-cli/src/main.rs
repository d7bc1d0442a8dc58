// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! idgate binary: provisioning plans and sign-up gate evaluation.

use clap::{Parser, Subcommand};
use idgate_signup_gate::SignUpGate;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod evaluate;
mod provision;
mod version;

/// idgate - identity provider admission gate and provisioning.
#[derive(Parser, Debug)]
#[command(
	name = "idgate",
	about = "Identity provider sign-up gate and provisioning plans",
	version
)]
struct Args {
	/// Config file (defaults to /etc/idgate/idgate.toml)
	#[arg(long, global = true, env = "IDGATE_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the provisioning plan as JSON
	Provision {
		/// Print the front-end auth configuration instead of the plan
		#[arg(long, requires_all = ["pool_id", "client_id"])]
		frontend: bool,

		/// Deployed user pool id, for --frontend
		#[arg(long)]
		pool_id: Option<String>,

		/// Deployed web client id, for --frontend
		#[arg(long)]
		client_id: Option<String>,
	},

	/// Evaluate one pre-sign-up event and print the resulting event
	Evaluate {
		/// Event JSON file, or `-` for stdin
		#[arg(long, default_value = "-")]
		event: String,

		/// JSON array of directory records to use instead of the directory service
		#[arg(long)]
		directory_file: Option<PathBuf>,
	},

	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	if let Command::Version = args.command {
		println!("{}", version::format_version_info());
		return Ok(ExitCode::SUCCESS);
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => idgate_config::load_config_with_file(path.clone())?,
		None => idgate_config::load_config()?,
	};

	// stdout carries command output; logs go to stderr
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	match args.command {
		Command::Provision {
			frontend,
			pool_id,
			client_id,
		} => {
			let plan = provision::build_plan(&config)?;
			let output = match (frontend, pool_id, client_id) {
				(true, Some(pool_id), Some(client_id)) => serde_json::to_string_pretty(
					&plan.frontend_config(&config.deployment.region, &pool_id, &client_id),
				)?,
				_ => serde_json::to_string_pretty(&plan)?,
			};
			println!("{output}");
			Ok(ExitCode::SUCCESS)
		}
		Command::Evaluate {
			event,
			directory_file,
		} => {
			let directory =
				evaluate::resolve_directory(&config, directory_file.as_deref()).await?;
			let gate = SignUpGate::new(directory).with_lookup_timeout(config.gate.lookup_timeout());
			let event = evaluate::read_event(&event).await?;

			match evaluate::evaluate(&gate, event).await {
				evaluate::Outcome::Admitted(event) => {
					println!("{}", serde_json::to_string_pretty(&event)?);
					Ok(ExitCode::SUCCESS)
				}
				evaluate::Outcome::Rejected(err) => {
					eprintln!("{err}");
					Ok(ExitCode::FAILURE)
				}
			}
		}
		Command::Version => Ok(ExitCode::SUCCESS),
	}
}
