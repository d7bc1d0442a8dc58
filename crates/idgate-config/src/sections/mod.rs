// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for idgate.

pub mod client;
pub mod deployment;
pub mod directory;
pub mod federation;
pub mod gate;
pub mod hooks;
pub mod logging;

pub use client::{ClientConfig, ClientConfigLayer};
pub use deployment::{DeploymentConfig, DeploymentConfigLayer};
pub use directory::{DirectoryConfig, DirectoryConfigLayer};
pub use federation::{FederationConfig, FederationConfigLayer};
pub use gate::{GateConfig, GateConfigLayer};
pub use hooks::{HooksConfig, HooksConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
