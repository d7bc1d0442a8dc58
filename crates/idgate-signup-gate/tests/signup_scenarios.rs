// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end pre-sign-up scenarios over the JSON wire shape.

use std::sync::Arc;

use async_trait::async_trait;
use idgate_directory::{
	DirectoryError, DirectoryLookup, DirectoryRecord, InMemoryDirectory, RegistrationStatus,
};
use idgate_signup_gate::{GateError, LifecycleEvent, SignUpGate};
use serde_json::{json, Value};

fn event(trigger_source: &str, email: &str) -> Value {
	json!({
		"version": "1",
		"region": "ap-southeast-2",
		"userPoolId": "ap-southeast-2_pool",
		"userName": "external_1234",
		"triggerSource": trigger_source,
		"request": { "userAttributes": { "email": email } },
		"response": {
			"autoConfirmUser": false,
			"autoVerifyEmail": false,
			"autoVerifyPhone": false
		}
	})
}

async fn dispatch(gate: &SignUpGate, payload: Value) -> Result<Value, GateError> {
	let event: LifecycleEvent = serde_json::from_value(payload).unwrap();
	let out = gate.handle(event).await?;
	Ok(serde_json::to_value(out).unwrap())
}

struct Unreachable;

#[async_trait]
impl DirectoryLookup for Unreachable {
	async fn query_by_email(&self, _email: &str) -> Result<Vec<DirectoryRecord>, DirectoryError> {
		Err(DirectoryError::Status(503))
	}
}

#[tokio::test]
async fn registered_external_user_is_confirmed_and_verified() {
	let directory = InMemoryDirectory::new().with_record(DirectoryRecord::new(
		"alice@example.com",
		RegistrationStatus::Active,
	));
	let gate = SignUpGate::new(Arc::new(directory));

	let out = dispatch(
		&gate,
		event("PreSignUp_ExternalProvider", "alice@example.com"),
	)
	.await
	.unwrap();

	assert_eq!(out["response"]["autoConfirmUser"], json!(true));
	assert_eq!(out["response"]["autoVerifyEmail"], json!(true));
	assert_eq!(out["response"]["autoVerifyPhone"], json!(false));
	assert_eq!(out["userName"], json!("external_1234"));
}

#[tokio::test]
async fn directory_match_ignores_email_case() {
	let directory = InMemoryDirectory::new().with_record(DirectoryRecord::new(
		"alice@example.com",
		RegistrationStatus::Invited,
	));
	let gate = SignUpGate::new(Arc::new(directory));

	let out = dispatch(
		&gate,
		event("PreSignUp_ExternalProvider", "Alice@Example.com"),
	)
	.await
	.unwrap();
	assert_eq!(out["response"]["autoConfirmUser"], json!(true));
}

#[tokio::test]
async fn unregistered_external_user_is_told_to_contact_administrator() {
	let gate = SignUpGate::new(Arc::new(InMemoryDirectory::new()));

	let err = dispatch(&gate, event("PreSignUp_ExternalProvider", "bob@example.com"))
		.await
		.unwrap_err();

	assert_eq!(err, GateError::Unregistered);
	assert!(err.to_string().contains("contact your administrator"));
}

#[tokio::test]
async fn unreachable_directory_denies_external_sign_up() {
	let gate = SignUpGate::new(Arc::new(Unreachable));

	let err = dispatch(&gate, event("PreSignUp_ExternalProvider", "alice@example.com"))
		.await
		.unwrap_err();
	assert_eq!(err, GateError::Unregistered);
}

#[tokio::test]
async fn native_sign_up_is_returned_unchanged() {
	let gate = SignUpGate::new(Arc::new(InMemoryDirectory::new()));
	let input = event("PreSignUp_SignUp", "carol@example.com");

	let out = dispatch(&gate, input.clone()).await.unwrap();
	assert_eq!(out, input);
}

#[tokio::test]
async fn unknown_trigger_is_returned_unchanged() {
	let gate = SignUpGate::new(Arc::new(Unreachable));
	let input = event("PreSignUp_SomethingNew", "dave@example.com");

	let out = dispatch(&gate, input.clone()).await.unwrap();
	assert_eq!(out, input);
}

#[tokio::test]
async fn concurrent_evaluations_are_independent() {
	let directory = InMemoryDirectory::new().with_record(DirectoryRecord::new(
		"alice@example.com",
		RegistrationStatus::Active,
	));
	let gate = Arc::new(SignUpGate::new(Arc::new(directory)));

	let mut handles = Vec::new();
	for i in 0..16 {
		let gate = Arc::clone(&gate);
		let email = if i % 2 == 0 {
			"alice@example.com".to_string()
		} else {
			format!("stranger{i}@example.com")
		};
		handles.push(tokio::spawn(async move {
			let payload = event("PreSignUp_ExternalProvider", &email);
			(i, dispatch(&gate, payload).await.is_ok())
		}));
	}

	for handle in handles {
		let (i, admitted) = handle.await.unwrap();
		assert_eq!(admitted, i % 2 == 0);
	}
}
