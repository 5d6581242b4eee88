// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use kcprov_common_version::BuildInfo;
use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client builder with the standard kcprov User-Agent.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = kcprov_common_http::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the standard kcprov User-Agent string.
///
/// Format: `kcprov/{version} ({platform}; {git_sha})`
pub fn user_agent() -> String {
	let info = BuildInfo::current();
	format!("kcprov/{} ({}; {})", info.version, info.platform, info.git_sha)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("kcprov/"));
		assert!(ua.ends_with(')'));
		assert!(ua.contains(BuildInfo::current().platform));
	}

	#[test]
	fn builder_with_timeout_builds() {
		assert!(builder().timeout(Duration::from_secs(10)).build().is_ok());
	}
}
