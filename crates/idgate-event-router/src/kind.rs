// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity lifecycle event kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of lifecycle events a hook can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
	// Authentication
	PreAuthentication,
	PostAuthentication,
	PreTokenGeneration,
	// Sign-up
	PreSignUp,
	PostConfirmation,
	UserMigration,
	// Messages
	CustomMessage,
	// Third-party email and SMS senders
	CustomEmailSender,
	CustomSmsSender,
}

impl EventKind {
	/// Every kind, in provisioning order.
	pub fn all() -> &'static [EventKind] {
		&[
			EventKind::PreAuthentication,
			EventKind::PostAuthentication,
			EventKind::PreTokenGeneration,
			EventKind::PreSignUp,
			EventKind::PostConfirmation,
			EventKind::UserMigration,
			EventKind::CustomMessage,
			EventKind::CustomEmailSender,
			EventKind::CustomSmsSender,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			EventKind::PreAuthentication => "pre_authentication",
			EventKind::PostAuthentication => "post_authentication",
			EventKind::PreTokenGeneration => "pre_token_generation",
			EventKind::PreSignUp => "pre_sign_up",
			EventKind::PostConfirmation => "post_confirmation",
			EventKind::UserMigration => "user_migration",
			EventKind::CustomMessage => "custom_message",
			EventKind::CustomEmailSender => "custom_email_sender",
			EventKind::CustomSmsSender => "custom_sms_sender",
		}
	}

	/// Conventional route of the hook that handles this kind.
	pub fn route(&self) -> &'static str {
		match self {
			EventKind::PreAuthentication => "/auth/process-pre-authentication",
			EventKind::PostAuthentication => "/auth/process-post-authentication",
			EventKind::PreTokenGeneration => "/auth/process-pre-token-generation",
			EventKind::PreSignUp => "/auth/process-pre-signup",
			EventKind::PostConfirmation => "/auth/process-post-confirmation",
			EventKind::UserMigration => "/auth/process-user-migration",
			EventKind::CustomMessage => "/auth/process-custom-message",
			EventKind::CustomEmailSender => "/auth/process-custom-email-sender",
			EventKind::CustomSmsSender => "/auth/process-custom-sms-sender",
		}
	}

	/// Message-transform kinds receive payloads encrypted with the sender key.
	pub fn is_message_sender(&self) -> bool {
		matches!(
			self,
			EventKind::CustomEmailSender | EventKind::CustomSmsSender
		)
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
	type Err = UnknownEventKind;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		EventKind::all()
			.iter()
			.copied()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| UnknownEventKind(s.to_string()))
	}
}
