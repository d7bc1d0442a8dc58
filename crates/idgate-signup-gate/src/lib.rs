// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Pre-sign-up admission gate.
//!
//! Decides, per lifecycle event, whether a principal signing up may obtain a
//! local account:
//!
//! | Trigger source | Outcome |
//! |----------------|---------|
//! | `PreSignUp_SignUp` | unchanged, provider's verification flow applies |
//! | `PreSignUp_ExternalProvider`, email in directory | auto-confirm + auto-verify email |
//! | `PreSignUp_ExternalProvider`, email absent or lookup failed | [`GateError::Unregistered`] |
//! | anything else | unchanged |
//!
//! An external broker has already verified the email, and a federated
//! principal never sets a password here, so leaving them unconfirmed would
//! strand the account.
//!
//! ```no_run
//! use std::sync::Arc;
//! use idgate_directory::InMemoryDirectory;
//! use idgate_signup_gate::{LifecycleEvent, SignUpGate, TriggerSource};
//!
//! # async fn example() -> Result<(), idgate_signup_gate::GateError> {
//! let gate = SignUpGate::new(Arc::new(InMemoryDirectory::new()));
//! let mut event = LifecycleEvent::new(TriggerSource::SignUp, "carol@example.com");
//! gate.evaluate(&mut event).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod event;
mod gate;

pub use error::{GateError, UNREGISTERED_MESSAGE};
pub use event::{LifecycleEvent, SignUpRequest, SignUpResponse, TriggerSource};
pub use gate::{Admission, SignUpGate, DEFAULT_LOOKUP_TIMEOUT};
