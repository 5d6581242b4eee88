// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("roster has no header row")]
	MissingHeader,

	#[error("roster is missing required column '{0}'")]
	MissingColumn(&'static str),

	#[error("malformed roster at line {line}: {message}")]
	Malformed { line: u64, message: String },
}

impl From<csv::Error> for RosterError {
	fn from(err: csv::Error) -> Self {
		let line = err.position().map(|p| p.line()).unwrap_or(0);
		RosterError::Malformed {
			line,
			message: err.to_string(),
		}
	}
}
