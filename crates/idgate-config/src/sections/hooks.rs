// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lifecycle hook routing configuration section.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HooksConfigLayer {
	/// Hook route (e.g. `/auth/process-pre-signup`) to deployed hook handle.
	pub routes: Option<BTreeMap<String, String>>,
	/// Key used to encrypt custom sender payloads.
	pub sender_key: Option<String>,
}

impl HooksConfigLayer {
	/// Routes merge per key; `other` wins on conflicts.
	pub fn merge(&mut self, other: Self) {
		match (&mut self.routes, other.routes) {
			(Some(routes), Some(other_routes)) => routes.extend(other_routes),
			(None, Some(other_routes)) => self.routes = Some(other_routes),
			_ => {}
		}
		if other.sender_key.is_some() {
			self.sender_key = other.sender_key;
		}
	}

	pub fn finalize(self) -> HooksConfig {
		HooksConfig {
			routes: self
				.routes
				.unwrap_or_default()
				.into_iter()
				.filter(|(_, handle)| !handle.trim().is_empty())
				.collect(),
			sender_key: self.sender_key.filter(|s| !s.is_empty()),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HooksConfig {
	pub routes: BTreeMap<String, String>,
	pub sender_key: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_deserialize_routes_table() {
		let layer: HooksConfigLayer = toml::from_str(
			r#"
sender_key = "alias/idgate-sender"

[routes]
"/auth/process-pre-signup" = "fn-pre-signup"
"/auth/process-custom-email-sender" = "fn-email"
"#,
		)
		.unwrap();
		let config = layer.finalize();
		assert_eq!(config.routes.len(), 2);
		assert_eq!(
			config.routes.get("/auth/process-pre-signup").map(String::as_str),
			Some("fn-pre-signup")
		);
		assert_eq!(config.sender_key.as_deref(), Some("alias/idgate-sender"));
	}

	#[test]
	fn test_routes_merge_per_key() {
		let mut base = HooksConfigLayer {
			routes: Some(BTreeMap::from([
				("/auth/process-pre-signup".to_string(), "old".to_string()),
				("/auth/process-custom-message".to_string(), "msg".to_string()),
			])),
			sender_key: None,
		};
		base.merge(HooksConfigLayer {
			routes: Some(BTreeMap::from([(
				"/auth/process-pre-signup".to_string(),
				"new".to_string(),
			)])),
			sender_key: None,
		});
		let routes = base.finalize().routes;
		assert_eq!(routes["/auth/process-pre-signup"], "new");
		assert_eq!(routes["/auth/process-custom-message"], "msg");
	}

	#[test]
	fn test_empty_handles_are_dropped() {
		let layer: HooksConfigLayer = toml::from_str(
			r#"
[routes]
"/auth/process-pre-signup" = ""
"/auth/process-custom-message" = "  "
"/auth/process-post-confirmation" = "fn-post-confirmation"
"#,
		)
		.unwrap();
		let routes = layer.finalize().routes;
		assert_eq!(routes.len(), 1);
		assert!(routes.contains_key("/auth/process-post-confirmation"));
	}

	#[test]
	fn test_empty_sender_key_is_none() {
		let layer = HooksConfigLayer {
			routes: None,
			sender_key: Some(String::new()),
		};
		assert!(layer.finalize().sender_key.is_none());
	}
}
