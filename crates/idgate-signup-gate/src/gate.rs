// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use idgate_directory::{DirectoryLookup, DirectoryRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::error::GateError;
use crate::event::{LifecycleEvent, TriggerSource};

/// Upper bound on a single directory lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
	/// Native sign-up; the provider's own verification flow applies.
	Deferred,
	/// Trigger kind the gate does not handle. Event left as received.
	PassThrough,
	/// Registered external principal, marked confirmed and email-verified.
	AutoConfirmed { user_id: Option<String> },
}

/// Admission gate for pre-sign-up events.
///
/// Holds no per-request state; one instance can serve concurrent dispatches
/// behind an `Arc`.
#[derive(Clone)]
pub struct SignUpGate {
	directory: Arc<dyn DirectoryLookup>,
	lookup_timeout: Duration,
}

impl SignUpGate {
	pub fn new(directory: Arc<dyn DirectoryLookup>) -> Self {
		Self {
			directory,
			lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
		}
	}

	pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
		self.lookup_timeout = lookup_timeout;
		self
	}

	pub fn lookup_timeout(&self) -> Duration {
		self.lookup_timeout
	}

	/// Decide admission for `event`, mutating its response flags on approval.
	///
	/// On [`GateError::Unregistered`] the response is left exactly as received.
	#[instrument(skip_all, fields(trigger_source = %event.trigger_source))]
	pub async fn evaluate(&self, event: &mut LifecycleEvent) -> Result<Admission, GateError> {
		match event.trigger_source {
			TriggerSource::SignUp => {
				debug!("native sign-up, deferring to default verification");
				Ok(Admission::Deferred)
			}
			TriggerSource::ExternalProvider => self.admit_external(event).await,
			_ => {
				debug!("trigger source not handled by gate, passing through");
				Ok(Admission::PassThrough)
			}
		}
	}

	/// Evaluate and hand the event back, in the shape the identity provider
	/// expects from a pre-sign-up hook.
	pub async fn handle(&self, mut event: LifecycleEvent) -> Result<LifecycleEvent, GateError> {
		self.evaluate(&mut event).await?;
		Ok(event)
	}

	async fn admit_external(&self, event: &mut LifecycleEvent) -> Result<Admission, GateError> {
		let Some(email) = event.email() else {
			warn!("external sign-up without email attribute, rejecting");
			return Err(GateError::Unregistered);
		};

		let Some(record) = self.find_registered(email).await else {
			info!("external sign-up for unregistered principal, rejecting");
			return Err(GateError::Unregistered);
		};

		event.response.auto_confirm_user = true;
		event.response.auto_verify_email = true;

		info!(
			user_id = record.user_id.as_deref().unwrap_or("-"),
			status = %record.status,
			"external sign-up admitted, auto-confirmed"
		);
		Ok(Admission::AutoConfirmed {
			user_id: record.user_id,
		})
	}

	/// First matching record. Lookup failures and timeouts count as no match.
	async fn find_registered(&self, email: &str) -> Option<DirectoryRecord> {
		let lookup = self.directory.query_by_email(email);
		match tokio::time::timeout(self.lookup_timeout, lookup).await {
			Ok(Ok(records)) => {
				if records.len() > 1 {
					debug!(matches = records.len(), "multiple directory records, using first");
				}
				records.into_iter().next()
			}
			Ok(Err(e)) => {
				warn!(error = %e, "directory lookup failed, treating as unregistered");
				None
			}
			Err(_) => {
				warn!(
					timeout_ms = self.lookup_timeout.as_millis() as u64,
					"directory lookup timed out, treating as unregistered"
				);
				None
			}
		}
	}
}

impl std::fmt::Debug for SignUpGate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SignUpGate")
			.field("lookup_timeout", &self.lookup_timeout)
			.finish_non_exhaustive()
	}
}
