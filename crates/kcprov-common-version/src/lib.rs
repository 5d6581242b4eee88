// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Build information for kcprov.
//!
//! Feeds the `kcprov version` subcommand and the User-Agent sent to the
//! identity provider.

shadow_rs::shadow!(build);

/// Platform string in `{os}-{arch}` format, e.g. "linux-x86_64".
pub const PLATFORM: &str = env!("KCPROV_PLATFORM");

/// Core build information.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
	pub version: &'static str,
	pub git_sha: &'static str,
	pub build_timestamp: &'static str,
	pub platform: &'static str,
}

impl BuildInfo {
	/// Get the current build information (compile-time constants).
	#[allow(clippy::const_is_empty)]
	pub const fn current() -> Self {
		Self {
			version: build::PKG_VERSION,
			git_sha: if build::SHORT_COMMIT.is_empty() {
				"unknown"
			} else {
				build::SHORT_COMMIT
			},
			build_timestamp: build::BUILD_TIME,
			platform: PLATFORM,
		}
	}
}

/// Multi-line version report printed by `kcprov version`.
pub fn format_version_info() -> String {
	let info = BuildInfo::current();
	format!(
		"kcprov {}\ngit sha:    {}\nbuilt:      {}\nplatform:   {}",
		info.version, info.git_sha, info.build_timestamp, info.platform
	)
}
