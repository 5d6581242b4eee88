// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire and value types for the Keycloak admin API.

use std::fmt;

use kcprov_common_secret::SecretString;
use kcprov_roster::RosterEntry;
use serde::{Deserialize, Serialize};

/// Characters shown from each end of a token in progress output.
const TOKEN_PREVIEW_CHARS: usize = 20;

/// Bearer token obtained from the password grant.
#[derive(Debug, Clone)]
pub struct AccessToken {
	token: SecretString,
	expires_in: u64,
}

impl AccessToken {
	pub fn new(token: SecretString, expires_in: u64) -> Self {
		Self { token, expires_in }
	}

	pub fn secret(&self) -> &SecretString {
		&self.token
	}

	/// Advertised lifetime in seconds.
	pub fn expires_in(&self) -> u64 {
		self.expires_in
	}

	/// First and last 20 characters joined by `...`; tokens too short to
	/// abbreviate are fully masked.
	pub fn preview(&self) -> String {
		let chars: Vec<char> = self.token.expose().chars().collect();
		if chars.len() <= TOKEN_PREVIEW_CHARS * 2 {
			return "***".to_string();
		}
		let head: String = chars[..TOKEN_PREVIEW_CHARS].iter().collect();
		let tail: String = chars[chars.len() - TOKEN_PREVIEW_CHARS..].iter().collect();
		format!("{head}...{tail}")
	}
}

/// Identifier Keycloak assigned to a newly created user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Extract the id from a create-user `Location` header: the trailing
	/// path segment, which must be non-empty.
	pub fn from_location(location: &str) -> Option<Self> {
		location
			.rsplit('/')
			.next()
			.filter(|segment| !segment.is_empty())
			.map(Self::new)
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Actions a user can be asked to complete via `execute-actions-email`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredAction {
	UpdatePassword,
	VerifyEmail,
	UpdateProfile,
	ConfigureTotp,
}

/// `POST /realms/{realm}/protocol/openid-connect/token` response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub access_token: SecretString,
	pub expires_in: u64,
}

/// Body of `POST /admin/realms/{realm}/users`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewUserRepresentation<'a> {
	pub first_name: &'a str,
	pub last_name: &'a str,
	pub username: &'a str,
	pub email: &'a str,
	pub groups: &'a [String],
	pub enabled: bool,
}

impl<'a> From<&'a RosterEntry> for NewUserRepresentation<'a> {
	fn from(entry: &'a RosterEntry) -> Self {
		Self {
			first_name: &entry.first_name,
			last_name: &entry.last_name,
			username: &entry.username,
			email: &entry.email,
			groups: &entry.groups,
			enabled: true,
		}
	}
}
