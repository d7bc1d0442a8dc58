// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors a directory lookup can report.
///
/// Callers on the admission path treat every variant as "not found".
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
	#[error("directory unavailable: {0}")]
	Unavailable(String),

	#[error("directory request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("directory returned status {0}")]
	Status(u16),

	#[error("failed to decode directory response: {0}")]
	Decode(String),

	#[error("invalid directory url: {0}")]
	InvalidUrl(#[from] url::ParseError),
}
