// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sign-up gate configuration section.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GateConfigLayer {
	pub lookup_timeout_ms: Option<u64>,
}

impl GateConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.lookup_timeout_ms.is_some() {
			self.lookup_timeout_ms = other.lookup_timeout_ms;
		}
	}

	pub fn finalize(self) -> GateConfig {
		GateConfig {
			lookup_timeout_ms: self.lookup_timeout_ms.unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GateConfig {
	/// Upper bound on a single directory lookup.
	pub lookup_timeout_ms: u64,
}

impl GateConfig {
	pub fn lookup_timeout(&self) -> Duration {
		Duration::from_millis(self.lookup_timeout_ms)
	}
}

impl Default for GateConfig {
	fn default() -> Self {
		GateConfigLayer::default().finalize()
	}
}
