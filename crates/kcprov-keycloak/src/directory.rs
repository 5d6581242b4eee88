// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The admin operations provisioning depends on, as a trait.

use async_trait::async_trait;
use kcprov_roster::RosterEntry;

use crate::client::AdminSession;
use crate::error::KeycloakError;
use crate::types::{RequiredAction, UserId};

/// Directory operations needed to provision a roster.
///
/// Implemented by [`AdminSession`] against a live Keycloak; tests provide
/// in-memory implementations.
#[async_trait]
pub trait DirectoryAdmin: Send + Sync {
	/// Whether at least one account matches `username`.
	async fn user_exists(&self, username: &str) -> Result<bool, KeycloakError>;

	/// Create an enabled account and return its id.
	async fn create_user(&self, entry: &RosterEntry) -> Result<UserId, KeycloakError>;

	/// Email the user a link to complete `actions`.
	async fn send_required_actions_email(
		&self,
		user_id: &UserId,
		actions: &[RequiredAction],
	) -> Result<(), KeycloakError>;
}

#[async_trait]
impl DirectoryAdmin for AdminSession {
	async fn user_exists(&self, username: &str) -> Result<bool, KeycloakError> {
		AdminSession::user_exists(self, username).await
	}

	async fn create_user(&self, entry: &RosterEntry) -> Result<UserId, KeycloakError> {
		AdminSession::create_user(self, entry).await
	}

	async fn send_required_actions_email(
		&self,
		user_id: &UserId,
		actions: &[RequiredAction],
	) -> Result<(), KeycloakError> {
		AdminSession::send_required_actions_email(self, user_id, actions).await
	}
}
