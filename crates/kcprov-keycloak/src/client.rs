// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Keycloak admin REST client implementation.

use std::time::Duration;

use kcprov_common_secret::SecretString;
use kcprov_roster::RosterEntry;
use reqwest::{header::LOCATION, Client, Response};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::error::KeycloakError;
use crate::types::{AccessToken, NewUserRepresentation, RequiredAction, TokenResponse, UserId};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Public client every realm ships for admin tooling.
const ADMIN_CLIENT_ID: &str = "admin-cli";

/// Unauthenticated client bound to one provider root and realm.
#[derive(Debug, Clone)]
pub struct KeycloakClient {
	http_client: Client,
	root: Url,
	realm: String,
}

impl KeycloakClient {
	/// Creates a client for `realm` on the provider at `root`.
	pub fn new(root: Url, realm: impl Into<String>) -> Result<Self, KeycloakError> {
		let http_client = kcprov_common_http::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(KeycloakError::Client)?;

		Ok(Self {
			http_client,
			root,
			realm: realm.into(),
		})
	}

	pub fn realm(&self) -> &str {
		&self.realm
	}

	/// Builds `<root>/<segments...>`, percent-encoding each segment.
	fn endpoint(&self, segments: &[&str]) -> Result<Url, KeycloakError> {
		let mut url = self.root.clone();
		{
			let mut path = url
				.path_segments_mut()
				.map_err(|_| KeycloakError::InvalidUrl(self.root.to_string()))?;
			path.pop_if_empty().extend(segments);
		}
		Ok(url)
	}

	fn admin_endpoint(&self, segments: &[&str]) -> Result<Url, KeycloakError> {
		let mut full = vec!["admin", "realms", self.realm.as_str()];
		full.extend_from_slice(segments);
		self.endpoint(&full)
	}

	/// Performs the OAuth2 password grant against the realm's token endpoint.
	#[instrument(skip(self, password), fields(realm = %self.realm))]
	pub async fn authenticate(
		&self,
		username: &str,
		password: &SecretString,
	) -> Result<AdminSession, KeycloakError> {
		let url = self.endpoint(&[
			"realms",
			self.realm.as_str(),
			"protocol",
			"openid-connect",
			"token",
		])?;

		info!("Getting access token");
		debug!(url = %url, "Sending token request");

		let response = self
			.http_client
			.post(url)
			.form(&[
				("client_id", ADMIN_CLIENT_ID),
				("username", username),
				("password", password.expose().as_str()),
				("grant_type", "password"),
			])
			.send()
			.await
			.map_err(transport_error)?;

		let response = ensure_success(response).await?;

		let body: TokenResponse = response.json().await.map_err(|e| {
			error!(error = %e, "Failed to parse token response");
			KeycloakError::InvalidResponse(format!("token response: {e}"))
		})?;

		let token = AccessToken::new(body.access_token, body.expires_in);
		info!(
			token = %token.preview(),
			expires_in = token.expires_in(),
			"Obtained access token"
		);

		Ok(AdminSession {
			client: self.clone(),
			token,
		})
	}
}

/// Authenticated view of a [`KeycloakClient`]: root, realm and bearer
/// token bundled for every admin call.
#[derive(Debug, Clone)]
pub struct AdminSession {
	client: KeycloakClient,
	token: AccessToken,
}

impl AdminSession {
	pub fn token(&self) -> &AccessToken {
		&self.token
	}

	pub fn realm(&self) -> &str {
		self.client.realm()
	}

	fn bearer(&self) -> &str {
		self.token.secret().expose()
	}

	/// Counts users matching `username:<username>` and reports whether any exist.
	#[instrument(skip(self), fields(realm = %self.client.realm))]
	pub async fn user_exists(&self, username: &str) -> Result<bool, KeycloakError> {
		let url = self.client.admin_endpoint(&["users", "count"])?;

		info!(username, "Checking if user exists");

		let response = self
			.client
			.http_client
			.get(url)
			.query(&[("q", format!("username:{username}"))])
			.bearer_auth(self.bearer())
			.send()
			.await
			.map_err(transport_error)?;

		let response = ensure_success(response).await?;

		let count: u64 = response.json().await.map_err(|e| {
			error!(error = %e, "Failed to parse user count");
			KeycloakError::InvalidResponse(format!("user count: {e}"))
		})?;

		if count == 0 {
			info!(username, "User not found");
			Ok(false)
		} else {
			info!(username, count, "User found");
			Ok(true)
		}
	}

	/// Creates an enabled user from a roster entry and returns its new id.
	#[instrument(skip(self, entry), fields(realm = %self.client.realm, username = %entry.username))]
	pub async fn create_user(&self, entry: &RosterEntry) -> Result<UserId, KeycloakError> {
		let url = self.client.admin_endpoint(&["users"])?;

		info!(
			first_name = %entry.first_name,
			last_name = %entry.last_name,
			"Creating user"
		);

		let response = self
			.client
			.http_client
			.post(url)
			.bearer_auth(self.bearer())
			.json(&NewUserRepresentation::from(entry))
			.send()
			.await
			.map_err(transport_error)?;

		let response = ensure_success(response).await?;

		let user_id = response
			.headers()
			.get(LOCATION)
			.and_then(|value| value.to_str().ok())
			.and_then(UserId::from_location)
			.ok_or_else(|| {
				error!(status = %response.status(), "Create response has no usable Location header");
				KeycloakError::MissingLocation
			})?;

		info!(user_id = %user_id, "Created user");
		Ok(user_id)
	}

	/// Emails the user a link to complete `actions`.
	#[instrument(skip(self), fields(realm = %self.client.realm, user_id = %user_id))]
	pub async fn send_required_actions_email(
		&self,
		user_id: &UserId,
		actions: &[RequiredAction],
	) -> Result<(), KeycloakError> {
		let url = self
			.client
			.admin_endpoint(&["users", user_id.as_str(), "execute-actions-email"])?;

		info!(?actions, "Sending required actions email");

		let response = self
			.client
			.http_client
			.put(url)
			.bearer_auth(self.bearer())
			.json(actions)
			.send()
			.await
			.map_err(transport_error)?;

		ensure_success(response).await?;
		Ok(())
	}
}

fn transport_error(e: reqwest::Error) -> KeycloakError {
	if e.is_timeout() {
		error!("Request timed out");
		return KeycloakError::Timeout;
	}
	error!(error = %e, "Network error during Keycloak request");
	KeycloakError::Network(e)
}

async fn ensure_success(response: Response) -> Result<Response, KeycloakError> {
	let status = response.status();
	debug!(status = %status, "Received response from Keycloak");

	if status.is_success() {
		return Ok(response);
	}

	let status_code = status.as_u16();
	let body = response.text().await.unwrap_or_default();
	error!(status = status_code, body = %body, "Keycloak API error");
	Err(KeycloakError::from_status(status_code, body))
}
