// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Keycloak admin REST client for kcprov.
//!
//! [`KeycloakClient`] knows the provider root and realm. Authenticating
//! with admin credentials yields an [`AdminSession`], which adds the bearer
//! token and exposes the three admin operations used for provisioning:
//! counting users by username, creating a user, and sending a
//! required-actions email.
//!
//! Every operation is a single request with a 10 second timeout. Nothing is
//! retried and the token is never refreshed.

pub mod client;
pub mod directory;
pub mod error;
pub mod types;

pub use client::{AdminSession, KeycloakClient};
pub use directory::DirectoryAdmin;
pub use error::KeycloakError;
pub use types::{AccessToken, RequiredAction, UserId};
