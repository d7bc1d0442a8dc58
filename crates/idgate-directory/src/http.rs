// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Directory lookup over HTTP.
//!
//! The directory service answers `GET {base_url}/users?email=<email>` with a
//! JSON array of [`DirectoryRecord`]s. A `404` means no match; any other
//! non-success status is reported as [`DirectoryError::Status`].

use async_trait::async_trait;
use idgate_common_secret::SecretString;
use std::time::Duration;
use url::Url;

use crate::error::DirectoryError;
use crate::record::DirectoryRecord;
use crate::DirectoryLookup;

const USER_AGENT: &str = concat!("idgate/", env!("CARGO_PKG_VERSION"));
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HttpDirectory {
	base_url: Url,
	token: Option<SecretString>,
	http_client: reqwest::Client,
}

impl HttpDirectory {
	pub fn new(base_url: &str, token: Option<SecretString>) -> Result<Self, DirectoryError> {
		let mut base_url = Url::parse(base_url)?;
		// Url::join drops the last path segment unless the base ends in '/'.
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}

		let http_client = reqwest::Client::builder()
			.user_agent(USER_AGENT)
			.timeout(DEFAULT_REQUEST_TIMEOUT)
			.build()?;

		Ok(Self {
			base_url,
			token,
			http_client,
		})
	}

	/// URL queried for `email`.
	pub fn lookup_url(&self, email: &str) -> Result<Url, DirectoryError> {
		let mut url = self.base_url.join("users")?;
		url.query_pairs_mut().append_pair("email", email);
		Ok(url)
	}
}

#[async_trait]
impl DirectoryLookup for HttpDirectory {
	#[tracing::instrument(skip_all, name = "HttpDirectory::query_by_email")]
	async fn query_by_email(&self, email: &str) -> Result<Vec<DirectoryRecord>, DirectoryError> {
		let url = self.lookup_url(email)?;

		let mut request = self
			.http_client
			.get(url)
			.header("Accept", "application/json");
		if let Some(token) = &self.token {
			request = request.bearer_auth(token.expose());
		}

		let response = request.send().await?;
		let status = response.status();

		if status == reqwest::StatusCode::NOT_FOUND {
			tracing::debug!("directory has no record for email");
			return Ok(Vec::new());
		}
		if !status.is_success() {
			return Err(DirectoryError::Status(status.as_u16()));
		}

		let body = response.text().await?;
		serde_json::from_str(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup_url_encodes_email() {
		let directory = HttpDirectory::new("https://directory.internal/api", None).unwrap();
		let url = directory.lookup_url("alice+test@example.com").unwrap();
		assert_eq!(
			url.as_str(),
			"https://directory.internal/api/users?email=alice%2Btest%40example.com"
		);
	}

	#[test]
	fn lookup_url_keeps_trailing_slash_base() {
		let directory = HttpDirectory::new("https://directory.internal/", None).unwrap();
		let url = directory.lookup_url("bob@example.com").unwrap();
		assert_eq!(url.path(), "/users");
	}

	#[test]
	fn invalid_base_url_is_rejected() {
		assert!(matches!(
			HttpDirectory::new("not a url", None),
			Err(DirectoryError::InvalidUrl(_))
		));
	}

	#[tokio::test]
	async fn unreachable_directory_reports_error() {
		// Port 9 (discard) on localhost is closed in test environments.
		let directory = HttpDirectory::new("http://127.0.0.1:9/", None).unwrap();
		assert!(directory.query_by_email("alice@example.com").await.is_err());
	}
}
