// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User-directory lookup for idgate.
//!
//! The sign-up gate never talks to a concrete store. It holds a
//! [`DirectoryLookup`] and asks it for the records matching an email:
//!
//! - [`InMemoryDirectory`] - fixed records, used in tests and offline runs
//! - [`HttpDirectory`] - the directory service over HTTP
//!
//! Email matching rules (case folding, trimming) belong to the implementation,
//! not to the caller. Retry policy, if any, also lives here.

mod error;
mod http;
mod memory;
mod record;

pub use error::DirectoryError;
pub use http::HttpDirectory;
pub use memory::InMemoryDirectory;
pub use record::{normalize_email, DirectoryRecord, RegistrationStatus};

use async_trait::async_trait;

/// Read-only query against the store of provisioned accounts.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
	/// Records registered under `email`. An empty vector means no match.
	async fn query_by_email(&self, email: &str) -> Result<Vec<DirectoryRecord>, DirectoryError>;
}
