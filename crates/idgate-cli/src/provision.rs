// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translate resolved configuration into a provisioning plan.

use anyhow::Context;
use idgate_config::IdgateConfig;
use idgate_event_router::{EventKind, EventRouterBuilder, HookHandle, SenderKeyRef};
use idgate_provisioning::{
	AttributeRequestMethod, FederationConfig, ProvisioningPlan, ProvisioningPlanBuilder,
};
use std::collections::HashMap;
use tracing::warn;

pub fn build_plan(config: &IdgateConfig) -> anyhow::Result<ProvisioningPlan> {
	let federation = match &config.federation {
		Some(federation) => {
			let method: AttributeRequestMethod = federation
				.attribute_request_method
				.parse()
				.context("federation.attribute_request_method")?;
			Some(
				FederationConfig::new(
					federation.provider_name.clone(),
					federation.client_id.clone(),
					federation.client_secret.clone(),
					federation.issuer_url.clone(),
				)
				.with_attribute_request_method(method),
			)
		}
		None => None,
	};

	let plan = ProvisioningPlanBuilder::new(config.deployment.namespace.clone())
		.environment(config.deployment.environment.clone())
		.federation(federation)
		.callback_urls(config.client.callback_urls.clone())
		.logout_urls(config.client.logout_urls.clone())
		.hooks(hooks_from_config(config))
		.build()
		.context("invalid provisioning configuration")?;

	Ok(plan)
}

fn hooks_from_config(config: &IdgateConfig) -> EventRouterBuilder {
	let known: Vec<&str> = EventKind::all().iter().map(EventKind::route).collect();
	let routes: HashMap<String, HookHandle> = config
		.hooks
		.routes
		.iter()
		.filter(|(route, _)| {
			let is_known = known.contains(&route.as_str());
			if !is_known {
				warn!(%route, "ignoring hook for unknown route");
			}
			is_known
		})
		.map(|(route, handle)| (route.clone(), HookHandle::new(handle.clone())))
		.collect();

	let mut builder = EventRouterBuilder::new()
		.with_sender_key(config.hooks.sender_key.clone().map(SenderKeyRef::new));
	builder.bind_routes(&routes);
	builder
}
