// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Run a single lifecycle event through the sign-up gate.

use anyhow::{bail, Context};
use idgate_config::IdgateConfig;
use idgate_directory::{DirectoryLookup, DirectoryRecord, HttpDirectory, InMemoryDirectory};
use idgate_signup_gate::{GateError, LifecycleEvent, SignUpGate};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Read an event from `source`, or from stdin when `source` is `-`.
pub async fn read_event(source: &str) -> anyhow::Result<LifecycleEvent> {
	let raw = if source == "-" {
		let mut raw = String::new();
		tokio::io::stdin()
			.read_to_string(&mut raw)
			.await
			.context("failed to read event from stdin")?;
		raw
	} else {
		tokio::fs::read_to_string(source)
			.await
			.with_context(|| format!("failed to read event file {source}"))?
	};
	serde_json::from_str(&raw).context("event is not a valid lifecycle event")
}

/// Directory records from a JSON array file.
pub async fn load_directory_file(path: &Path) -> anyhow::Result<InMemoryDirectory> {
	let raw = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("failed to read directory file {}", path.display()))?;
	let records: Vec<DirectoryRecord> = serde_json::from_str(&raw)
		.with_context(|| format!("invalid directory records in {}", path.display()))?;
	Ok(InMemoryDirectory::from_records(records))
}

/// A local records file wins over the configured directory service.
pub async fn resolve_directory(
	config: &IdgateConfig,
	directory_file: Option<&Path>,
) -> anyhow::Result<Arc<dyn DirectoryLookup>> {
	if let Some(path) = directory_file {
		let directory = load_directory_file(path).await?;
		info!(records = directory.len(), "using directory records file");
		return Ok(Arc::new(directory));
	}

	let Some(directory) = &config.directory else {
		bail!("no directory configured: set IDGATE_DIRECTORY_URL or pass --directory-file");
	};
	let http = HttpDirectory::new(&directory.base_url, directory.token.clone())
		.context("invalid directory base url")?;
	Ok(Arc::new(http))
}

pub enum Outcome {
	Admitted(LifecycleEvent),
	Rejected(GateError),
}

pub async fn evaluate(gate: &SignUpGate, mut event: LifecycleEvent) -> Outcome {
	match gate.evaluate(&mut event).await {
		Ok(admission) => {
			info!(?admission, "event evaluated");
			Outcome::Admitted(event)
		}
		Err(err) => Outcome::Rejected(err),
	}
}
