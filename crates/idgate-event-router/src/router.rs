// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, info};

use crate::kind::EventKind;

/// Opaque reference to a deployed decision hook.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookHandle(String);

impl HookHandle {
	pub fn new(handle: impl Into<String>) -> Self {
		Self(handle.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for HookHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Reference to the key the identity provider encrypts sender payloads with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenderKeyRef(String);

impl SenderKeyRef {
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SenderKeyRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Decrypt permission for `hook` on `key`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DecryptGrant {
	pub key: SenderKeyRef,
	pub hook: HookHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	#[error("event kind {kind} bound more than once ({first} and {second})")]
	DuplicateBinding {
		kind: EventKind,
		first: HookHandle,
		second: HookHandle,
	},

	#[error("event kind {kind} bound to an empty hook handle")]
	EmptyHook { kind: EventKind },
}

/// Collects bindings and validates them as a whole in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct EventRouterBuilder {
	sender_key: Option<SenderKeyRef>,
	pending: Vec<(EventKind, HookHandle)>,
}

impl EventRouterBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Key sender hooks must be able to decrypt with. `None` means the
	/// identity provider sends messages itself.
	pub fn with_sender_key(mut self, key: Option<SenderKeyRef>) -> Self {
		self.sender_key = key;
		self
	}

	/// Bind `hook` to `kind`. An absent hook leaves the kind unbound.
	pub fn bind(&mut self, kind: EventKind, hook: Option<HookHandle>) -> &mut Self {
		match hook {
			Some(hook) => self.pending.push((kind, hook)),
			None => debug!(%kind, "no hook supplied, default behavior applies"),
		}
		self
	}

	/// Bind every kind whose conventional route appears in `routes`.
	pub fn bind_routes(&mut self, routes: &HashMap<String, HookHandle>) -> &mut Self {
		for kind in EventKind::all() {
			self.bind(*kind, routes.get(kind.route()).cloned());
		}
		self
	}

	/// Validate all bindings and produce the routing table.
	///
	/// Nothing is produced if any kind was bound twice or to an empty handle.
	pub fn build(self) -> Result<RoutingTable, RouterError> {
		let mut bindings: BTreeMap<EventKind, HookHandle> = BTreeMap::new();
		for (kind, hook) in self.pending {
			if hook.as_str().trim().is_empty() {
				return Err(RouterError::EmptyHook { kind });
			}
			if let Some(first) = bindings.get(&kind) {
				return Err(RouterError::DuplicateBinding {
					kind,
					first: first.clone(),
					second: hook,
				});
			}
			bindings.insert(kind, hook);
		}

		let mut table = RoutingTable {
			sender_key: self.sender_key,
			bindings,
			decrypt_grants: BTreeSet::new(),
		};
		table.grant_sender_decrypt();

		info!(
			bound = table.bindings.len(),
			decrypt_grants = table.decrypt_grants.len(),
			"event routing table built"
		);
		Ok(table)
	}
}

/// Immutable association of lifecycle events to hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingTable {
	#[serde(skip_serializing_if = "Option::is_none")]
	sender_key: Option<SenderKeyRef>,
	bindings: BTreeMap<EventKind, HookHandle>,
	decrypt_grants: BTreeSet<DecryptGrant>,
}

impl RoutingTable {
	pub fn hook_for(&self, kind: EventKind) -> Option<&HookHandle> {
		self.bindings.get(&kind)
	}

	pub fn bindings(&self) -> impl Iterator<Item = (EventKind, &HookHandle)> {
		self.bindings.iter().map(|(kind, hook)| (*kind, hook))
	}

	pub fn decrypt_grants(&self) -> impl Iterator<Item = &DecryptGrant> {
		self.decrypt_grants.iter()
	}

	pub fn sender_key(&self) -> Option<&SenderKeyRef> {
		self.sender_key.as_ref()
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	// Set insertion makes repeated grants for the same hook a no-op.
	fn grant_sender_decrypt(&mut self) {
		let Some(key) = &self.sender_key else {
			return;
		};
		for (kind, hook) in &self.bindings {
			if kind.is_message_sender() {
				let added = self.decrypt_grants.insert(DecryptGrant {
					key: key.clone(),
					hook: hook.clone(),
				});
				if added {
					debug!(%kind, %hook, "granted sender key decrypt");
				}
			}
		}
	}
}
