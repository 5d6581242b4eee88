// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Keycloak admin client.

use thiserror::Error;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum KeycloakError {
	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	Client(reqwest::Error),

	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// The provider refused the request (4xx): bad credentials, validation
	/// failure, duplicate username.
	#[error("Keycloak rejected the request: {status} - {message}")]
	Rejected { status: u16, message: String },

	/// The provider failed to handle the request (5xx or other non-success).
	#[error("Keycloak unavailable: {status} - {message}")]
	Unavailable { status: u16, message: String },

	/// Invalid or unparseable response body.
	#[error("Invalid response from Keycloak: {0}")]
	InvalidResponse(String),

	/// A successful create-user response without a usable Location header.
	#[error("Keycloak created the user but returned no Location header with its id")]
	MissingLocation,

	/// The configured root cannot carry path segments.
	#[error("Cannot build endpoint URL from {0}")]
	InvalidUrl(String),
}

impl KeycloakError {
	/// HTTP status for errors that carry one.
	pub fn status(&self) -> Option<u16> {
		match self {
			KeycloakError::Rejected { status, .. } | KeycloakError::Unavailable { status, .. } => {
				Some(*status)
			}
			_ => None,
		}
	}

	/// True when the provider reported a conflict, e.g. the username was
	/// created by someone else between the existence check and the create.
	pub fn is_conflict(&self) -> bool {
		self.status() == Some(409)
	}

	pub(crate) fn from_status(status: u16, message: String) -> Self {
		if (400..500).contains(&status) {
			KeycloakError::Rejected { status, message }
		} else {
			KeycloakError::Unavailable { status, message }
		}
	}
}
