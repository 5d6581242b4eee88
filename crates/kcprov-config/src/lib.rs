// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection settings for the identity provider.
//!
//! The configuration is a flat TOML document with exactly four keys:
//!
//! ```toml
//! keycloak_root = "https://idp.example"
//! keycloak_realm = "main"
//! keycloak_admin = "admin"
//! keycloak_admin_password = "secret"
//! ```
//!
//! All four must be present and non-empty. Unknown keys are ignored.

pub mod error;

use std::path::Path;

use kcprov_common_secret::SecretString;
use serde::Deserialize;
use url::Url;

pub use error::ConfigError;

/// File name read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Validated identity-provider settings.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
	/// Root URL of the identity provider, e.g. `https://idp.example`.
	pub keycloak_root: Url,
	pub keycloak_realm: String,
	pub keycloak_admin: String,
	pub keycloak_admin_password: SecretString,
}

/// Shape of the file before validation.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
	keycloak_root: Option<String>,
	keycloak_realm: Option<String>,
	keycloak_admin: Option<String>,
	keycloak_admin_password: Option<SecretString>,
}

impl ProvisionConfig {
	/// Parse and validate a TOML document.
	pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
		parse(contents, Path::new("<inline>"))
	}
}

/// Read and validate the configuration file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<ProvisionConfig, ConfigError> {
	let path = path.as_ref();
	tracing::debug!(path = %path.display(), "loading configuration");

	let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<ProvisionConfig, ConfigError> {
	let raw: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::TomlParse {
		path: path.to_path_buf(),
		source,
	})?;

	let root = required(raw.keycloak_root, "keycloak_root")?;
	let keycloak_realm = required(raw.keycloak_realm, "keycloak_realm")?;
	let keycloak_admin = required(raw.keycloak_admin, "keycloak_admin")?;
	let keycloak_admin_password = match raw.keycloak_admin_password {
		Some(password) if !password.is_blank() => password,
		_ => return Err(ConfigError::missing_field("keycloak_admin_password")),
	};

	let keycloak_root = parse_root(&root)?;

	tracing::debug!(
		root = %keycloak_root,
		realm = %keycloak_realm,
		admin = %keycloak_admin,
		"configuration loaded"
	);

	Ok(ProvisionConfig {
		keycloak_root,
		keycloak_realm,
		keycloak_admin,
		keycloak_admin_password,
	})
}

fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
	match value {
		Some(v) if !v.trim().is_empty() => Ok(v),
		_ => Err(ConfigError::missing_field(field)),
	}
}

fn parse_root(root: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(root)
		.map_err(|e| ConfigError::invalid_value("keycloak_root", e.to_string()))?;

	match url.scheme() {
		"http" | "https" => {}
		other => {
			return Err(ConfigError::invalid_value(
				"keycloak_root",
				format!("unsupported scheme '{other}', expected http or https"),
			))
		}
	}

	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::io::Write;

	const FULL: &str = r#"
keycloak_root = "https://idp.example"
keycloak_realm = "main"
keycloak_admin = "admin"
keycloak_admin_password = "secret"
"#;

	#[test]
	fn loads_all_four_fields() {
		let config = ProvisionConfig::from_toml_str(FULL).unwrap();
		assert_eq!(config.keycloak_root.as_str(), "https://idp.example/");
		assert_eq!(config.keycloak_realm, "main");
		assert_eq!(config.keycloak_admin, "admin");
		assert_eq!(config.keycloak_admin_password.expose(), "secret");
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(FULL.as_bytes()).unwrap();

		let config = load_config(file.path()).unwrap();
		assert_eq!(config.keycloak_realm, "main");
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = load_config(dir.path().join("config.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}

	#[test]
	fn malformed_toml_is_parse_error() {
		let err = ProvisionConfig::from_toml_str("keycloak_root = \"unterminated").unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn wrong_value_type_is_parse_error() {
		let contents = FULL.replace("\"main\"", "42");
		let err = ProvisionConfig::from_toml_str(&contents).unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn each_missing_key_is_reported() {
		for key in [
			"keycloak_root",
			"keycloak_realm",
			"keycloak_admin",
			"keycloak_admin_password",
		] {
			let contents: String = FULL
				.lines()
				.filter(|line| !line.starts_with(&format!("{key} =")))
				.collect::<Vec<_>>()
				.join("\n");
			let err = ProvisionConfig::from_toml_str(&contents).unwrap_err();
			match err {
				ConfigError::MissingField(field) => assert_eq!(field, key),
				other => panic!("expected MissingField for {key}, got {other:?}"),
			}
		}
	}

	#[test]
	fn empty_values_count_as_missing() {
		let contents = FULL.replace("\"admin\"", "\"  \"");
		let err = ProvisionConfig::from_toml_str(&contents).unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(ref f) if f == "keycloak_admin"));

		let contents = FULL.replace("\"secret\"", "\"\"");
		let err = ProvisionConfig::from_toml_str(&contents).unwrap_err();
		assert!(matches!(err, ConfigError::MissingField(ref f) if f == "keycloak_admin_password"));
	}

	#[test]
	fn non_http_root_is_rejected() {
		let contents = FULL.replace("https://idp.example", "ftp://idp.example");
		let err = ProvisionConfig::from_toml_str(&contents).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));

		let contents = FULL.replace("https://idp.example", "not a url");
		let err = ProvisionConfig::from_toml_str(&contents).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}

	#[test]
	fn unknown_keys_are_ignored() {
		let contents = format!("{FULL}\nextra = \"ignored\"\n");
		assert!(ProvisionConfig::from_toml_str(&contents).is_ok());
	}

	#[test]
	fn password_is_redacted_in_debug() {
		let config = ProvisionConfig::from_toml_str(FULL).unwrap();
		let rendered = format!("{config:?}");
		assert!(!rendered.contains("secret"));
	}

	proptest! {
		#[test]
		fn realm_and_admin_round_trip(realm in "[a-z][a-z0-9-]{0,20}", admin in "[a-z][a-z0-9._]{0,20}") {
			let contents = format!(
				"keycloak_root = \"https://idp.example\"\nkeycloak_realm = \"{realm}\"\nkeycloak_admin = \"{admin}\"\nkeycloak_admin_password = \"pw\"\n"
			);
			let config = ProvisionConfig::from_toml_str(&contents).unwrap();
			prop_assert_eq!(config.keycloak_realm, realm);
			prop_assert_eq!(config.keycloak_admin, admin);
		}
	}
}
