// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Message returned to a principal whose external sign-up is refused.
pub const UNREGISTERED_MESSAGE: &str =
	"User is not registered. Please contact your administrator to create an account.";

/// Rejections the gate hands back to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
	/// External sign-up for an email the directory does not know, or could not
	/// confirm. Surfaces to the end user verbatim.
	#[error("{}", UNREGISTERED_MESSAGE)]
	Unregistered,
}
