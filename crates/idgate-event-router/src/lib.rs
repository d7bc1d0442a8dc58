// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Routing of identity lifecycle events to decision hooks.
//!
//! Evaluated once at provisioning time. [`EventRouterBuilder`] collects
//! `(EventKind, HookHandle)` bindings and [`EventRouterBuilder::build`]
//! validates them as a whole:
//!
//! - each [`EventKind`] maps to at most one hook; a second binding for the
//!   same kind fails the build with [`RouterError::DuplicateBinding`]
//! - binding an absent hook is a no-op, the provider's default applies
//! - when a sender key is configured, hooks bound to the custom email and SMS
//!   sender kinds receive a [`DecryptGrant`] on it
//!
//! The resulting [`RoutingTable`] is immutable.

mod kind;
mod router;

pub use kind::{EventKind, UnknownEventKind};
pub use router::{
	DecryptGrant, EventRouterBuilder, HookHandle, RouterError, RoutingTable, SenderKeyRef,
};
