// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory records: accounts an administrator has already provisioned.
//!
//! # PII Handling
//!
//! [`DirectoryRecord::email`] is user PII. Log `user_id` and `status` instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration status of a provisioned account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
	/// Account exists and has signed in before.
	Active,
	/// Account was created by an administrator and is waiting for first sign-in.
	Invited,
	/// Account was switched off by an administrator.
	Disabled,
}

impl fmt::Display for RegistrationStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RegistrationStatus::Active => write!(f, "active"),
			RegistrationStatus::Invited => write!(f, "invited"),
			RegistrationStatus::Disabled => write!(f, "disabled"),
		}
	}
}

/// A previously provisioned account association, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
	pub email: String,

	/// Identifier of the account in the owning system, when the directory
	/// exposes one.
	#[serde(default)]
	pub user_id: Option<String>,

	pub status: RegistrationStatus,

	#[serde(default)]
	pub registered_at: Option<DateTime<Utc>>,
}

impl DirectoryRecord {
	pub fn new(email: impl Into<String>, status: RegistrationStatus) -> Self {
		Self {
			email: email.into(),
			user_id: None,
			status,
			registered_at: None,
		}
	}

	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}
}

/// The matching key used by directories that follow the case-insensitive
/// email contract.
pub fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}
