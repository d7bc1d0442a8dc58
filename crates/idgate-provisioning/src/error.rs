// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use idgate_event_router::RouterError;

/// Configuration problems that stop a provisioning plan from being built.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("invalid namespace '{0}': use 1-63 lowercase letters, digits or hyphens")]
	InvalidNamespace(String),

	#[error("invalid federation config: {0}")]
	InvalidFederation(String),

	#[error("federation is configured but no callback urls were given")]
	MissingCallbackUrls,

	#[error("invalid url '{url}': {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error(transparent)]
	Router(#[from] RouterError),
}
