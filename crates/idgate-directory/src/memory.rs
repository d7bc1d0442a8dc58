// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::DirectoryError;
use crate::record::{normalize_email, DirectoryRecord};
use crate::DirectoryLookup;

/// Fixed set of records held in memory.
///
/// Matching is case-insensitive. Records sharing an email are returned in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
	records: HashMap<String, Vec<DirectoryRecord>>,
}

impl InMemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_records(records: impl IntoIterator<Item = DirectoryRecord>) -> Self {
		let mut directory = Self::new();
		for record in records {
			directory.insert(record);
		}
		directory
	}

	pub fn with_record(mut self, record: DirectoryRecord) -> Self {
		self.insert(record);
		self
	}

	pub fn insert(&mut self, record: DirectoryRecord) {
		self
			.records
			.entry(normalize_email(&record.email))
			.or_default()
			.push(record);
	}

	pub fn len(&self) -> usize {
		self.records.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

#[async_trait]
impl DirectoryLookup for InMemoryDirectory {
	async fn query_by_email(&self, email: &str) -> Result<Vec<DirectoryRecord>, DirectoryError> {
		Ok(
			self
				.records
				.get(&normalize_email(email))
				.cloned()
				.unwrap_or_default(),
		)
	}
}
