// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning plan for the identity pool.
//!
//! [`ProvisioningPlanBuilder`] validates the whole configuration before any
//! resource is described. The resulting [`ProvisioningPlan`] lists the user
//! pool, hosted domain, optional federated broker, pool client and the
//! `SystemAdmin` group in creation order, together with the event
//! [`RoutingTable`](idgate_event_router::RoutingTable).
//!
//! When a [`FederationConfig`] is supplied the client is built as
//! [`ClientProviders::Federated`], which can only hold a [`BrokerRef`] issued
//! by declaring the broker. Without one the client is
//! [`ClientProviders::Native`] and has no OAuth settings.
//!
//! ```
//! use idgate_provisioning::ProvisioningPlanBuilder;
//!
//! let plan = ProvisioningPlanBuilder::new("acme").build().unwrap();
//! assert!(plan.client().oauth().is_none());
//! ```

mod error;
mod federation;
mod frontend;
mod plan;

pub use error::ProvisioningError;
pub use federation::{AttributeMapping, AttributeRequestMethod, FederationConfig};
pub use frontend::{FrontendAuthConfig, FrontendOAuth};
pub use plan::{
	BrokerDescriptor, BrokerRef, ClientDescriptor, ClientProviders, DomainDescriptor,
	GroupDescriptor, OAuthFlow, OAuthSettings, ProvisioningPlan, ProvisioningPlanBuilder,
	RemovalPolicy, ResourceKind, UserPoolDescriptor, NATIVE_PROVIDER, OAUTH_SCOPES,
	SYSTEM_ADMIN_GROUP,
};
