// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The provisioning run: load, authenticate, walk the roster.

use std::path::Path;

use kcprov_config::{load_config, ConfigError};
use kcprov_keycloak::{DirectoryAdmin, KeycloakClient, KeycloakError, RequiredAction, UserId};
use kcprov_roster::{load_roster, RosterEntry, RosterError};
use thiserror::Error;
use tracing::{info, instrument};

/// Actions requested for every newly created account.
const NEW_USER_ACTIONS: &[RequiredAction] = &[RequiredAction::UpdatePassword];

/// Every way a run can end early. All are fatal.
#[derive(Debug, Error)]
pub enum RunError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("roster error: {0}")]
	Roster(#[from] RosterError),

	#[error("authentication failed: {0}")]
	Auth(#[source] KeycloakError),

	#[error("checking whether '{username}' exists failed: {source}")]
	Lookup {
		username: String,
		#[source]
		source: KeycloakError,
	},

	#[error("provisioning '{username}' failed: {source}")]
	Provision {
		username: String,
		#[source]
		source: KeycloakError,
	},
}

/// What happened to one roster entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
	/// The username already existed; nothing was changed.
	Skipped,
	/// The account was created and the reset email sent.
	Created(UserId),
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionReport {
	pub created: usize,
	pub skipped: usize,
}

impl ProvisionReport {
	fn record(&mut self, outcome: &EntryOutcome) {
		match outcome {
			EntryOutcome::Skipped => self.skipped += 1,
			EntryOutcome::Created(_) => self.created += 1,
		}
	}
}

/// Run end to end from the two input files.
///
/// Both files are loaded before any network traffic.
pub async fn run(config_path: &Path, roster_path: &Path) -> Result<ProvisionReport, RunError> {
	let config = load_config(config_path)?;
	let roster = load_roster(roster_path)?;
	info!(
		root = %config.keycloak_root,
		realm = %config.keycloak_realm,
		entries = roster.len(),
		"Loaded configuration and roster"
	);

	let client = KeycloakClient::new(config.keycloak_root.clone(), config.keycloak_realm.clone())
		.map_err(RunError::Auth)?;
	let session = client
		.authenticate(&config.keycloak_admin, &config.keycloak_admin_password)
		.await
		.map_err(RunError::Auth)?;

	provision_roster(&session, &roster).await
}

/// Provision every entry in order, stopping at the first failure.
pub async fn provision_roster<D>(
	directory: &D,
	roster: &[RosterEntry],
) -> Result<ProvisionReport, RunError>
where
	D: DirectoryAdmin + ?Sized,
{
	let mut report = ProvisionReport::default();

	for entry in roster {
		let outcome = provision_entry(directory, entry).await?;
		report.record(&outcome);
	}

	info!(
		created = report.created,
		skipped = report.skipped,
		"Provisioning complete"
	);
	Ok(report)
}

/// Check one entry and create it if absent.
#[instrument(skip(directory, entry), fields(username = %entry.username))]
pub async fn provision_entry<D>(directory: &D, entry: &RosterEntry) -> Result<EntryOutcome, RunError>
where
	D: DirectoryAdmin + ?Sized,
{
	let exists = directory
		.user_exists(&entry.username)
		.await
		.map_err(|source| RunError::Lookup {
			username: entry.username.clone(),
			source,
		})?;

	if exists {
		info!("Skipping existing user");
		return Ok(EntryOutcome::Skipped);
	}

	let provision_failed = |source| RunError::Provision {
		username: entry.username.clone(),
		source,
	};

	let user_id = directory
		.create_user(entry)
		.await
		.map_err(provision_failed)?;

	directory
		.send_required_actions_email(&user_id, NEW_USER_ACTIONS)
		.await
		.map_err(provision_failed)?;

	info!(user_id = %user_id, "Password reset email sent");
	Ok(EntryOutcome::Created(user_id))
}
