// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster of users to provision.
//!
//! The roster is a comma-delimited UTF-8 file with a header row:
//!
//! ```text
//! First Name,Last Name,User Name,Email,Groups
//! Alice,Smith,asmith,alice@example.com,"eng,ops"
//! ```
//!
//! `Groups` is itself comma-joined and is split on every comma, so a group
//! name cannot contain one. Extra columns are ignored.

mod error;

use std::io::Read;
use std::path::Path;

pub use error::RosterError;

/// File name read from the working directory when no path is given.
pub const DEFAULT_ROSTER_FILE: &str = "users.csv";

pub const COLUMN_FIRST_NAME: &str = "First Name";
pub const COLUMN_LAST_NAME: &str = "Last Name";
pub const COLUMN_USER_NAME: &str = "User Name";
pub const COLUMN_EMAIL: &str = "Email";
pub const COLUMN_GROUPS: &str = "Groups";

const GROUP_DELIMITER: char = ',';

/// One row of the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
	pub first_name: String,
	pub last_name: String,
	pub username: String,
	pub email: String,
	/// Group names in file order, untrimmed. An empty cell yields `[""]`.
	pub groups: Vec<String>,
}

/// Split a Groups cell into its names.
pub fn split_groups(cell: &str) -> Vec<String> {
	cell.split(GROUP_DELIMITER).map(str::to_string).collect()
}

/// Column positions resolved from the header row.
struct Columns {
	first_name: usize,
	last_name: usize,
	username: usize,
	email: usize,
	groups: usize,
}

impl Columns {
	fn resolve(headers: &csv::StringRecord) -> Result<Self, RosterError> {
		if headers.is_empty() {
			return Err(RosterError::MissingHeader);
		}

		let find = |name: &'static str| {
			headers
				.iter()
				.position(|h| h == name)
				.ok_or(RosterError::MissingColumn(name))
		};

		Ok(Self {
			first_name: find(COLUMN_FIRST_NAME)?,
			last_name: find(COLUMN_LAST_NAME)?,
			username: find(COLUMN_USER_NAME)?,
			email: find(COLUMN_EMAIL)?,
			groups: find(COLUMN_GROUPS)?,
		})
	}

	fn entry(&self, record: &csv::StringRecord) -> RosterEntry {
		let cell = |idx: usize| record.get(idx).unwrap_or_default();
		RosterEntry {
			first_name: cell(self.first_name).to_string(),
			last_name: cell(self.last_name).to_string(),
			username: cell(self.username).to_string(),
			email: cell(self.email).to_string(),
			groups: split_groups(cell(self.groups)),
		}
	}
}

/// Parse a roster from any reader. Row order is preserved.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.from_reader(reader);

	let columns = Columns::resolve(reader.headers()?)?;

	let mut entries = Vec::new();
	for record in reader.records() {
		let record = record?;
		entries.push(columns.entry(&record));
	}

	Ok(entries)
}

/// Read the roster file at `path`.
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<RosterEntry>, RosterError> {
	let path = path.as_ref();
	let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	let entries = parse_roster(file)?;
	tracing::debug!(path = %path.display(), count = entries.len(), "roster loaded");
	Ok(entries)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::io::Write;

	const HEADER: &str = "First Name,Last Name,User Name,Email,Groups\n";

	fn parse(text: &str) -> Result<Vec<RosterEntry>, RosterError> {
		parse_roster(text.as_bytes())
	}

	#[test]
	fn parses_rows_in_file_order() {
		let text = format!(
			"{HEADER}Alice,Smith,asmith,alice@example.com,\"eng,ops\"\nBob,Jones,bjones,bob@example.com,eng\n"
		);
		let entries = parse(&text).unwrap();

		assert_eq!(entries.len(), 2);
		assert_eq!(
			entries[0],
			RosterEntry {
				first_name: "Alice".to_string(),
				last_name: "Smith".to_string(),
				username: "asmith".to_string(),
				email: "alice@example.com".to_string(),
				groups: vec!["eng".to_string(), "ops".to_string()],
			}
		);
		assert_eq!(entries[1].username, "bjones");
		assert_eq!(entries[1].groups, vec!["eng".to_string()]);
	}

	#[test]
	fn header_only_yields_no_entries() {
		assert!(parse(HEADER).unwrap().is_empty());
	}

	#[test]
	fn empty_groups_cell_is_single_empty_name() {
		let text = format!("{HEADER}Carol,White,cwhite,carol@example.com,\n");
		let entries = parse(&text).unwrap();
		assert_eq!(entries[0].groups, vec![String::new()]);
	}

	#[test]
	fn groups_are_not_trimmed() {
		let text = format!("{HEADER}Dan,Brown,dbrown,dan@example.com,\"eng, ops\"\n");
		let entries = parse(&text).unwrap();
		assert_eq!(entries[0].groups, vec!["eng".to_string(), " ops".to_string()]);
	}

	#[test]
	fn columns_may_be_reordered_and_extended() {
		let text = "Email,Groups,Notes,User Name,Last Name,First Name\n\
			alice@example.com,eng,vip,asmith,Smith,Alice\n";
		let entries = parse(text).unwrap();
		assert_eq!(entries[0].first_name, "Alice");
		assert_eq!(entries[0].email, "alice@example.com");
		assert_eq!(entries[0].groups, vec!["eng".to_string()]);
	}

	#[test]
	fn empty_input_is_missing_header() {
		assert!(matches!(parse(""), Err(RosterError::MissingHeader)));
	}

	#[test]
	fn missing_column_is_named() {
		let text = "First Name,Last Name,User Name,Groups\nAlice,Smith,asmith,eng\n";
		match parse(text) {
			Err(RosterError::MissingColumn(name)) => assert_eq!(name, COLUMN_EMAIL),
			other => panic!("expected MissingColumn, got {other:?}"),
		}
	}

	#[test]
	fn ragged_row_is_malformed() {
		let text = format!("{HEADER}Alice,Smith,asmith\n");
		match parse(&text) {
			Err(RosterError::Malformed { line, .. }) => assert_eq!(line, 2),
			other => panic!("expected Malformed, got {other:?}"),
		}
	}

	#[test]
	fn invalid_utf8_is_malformed() {
		let mut bytes = HEADER.as_bytes().to_vec();
		bytes.extend_from_slice(b"Al\xffce,Smith,asmith,a@example.com,eng\n");
		assert!(matches!(
			parse_roster(bytes.as_slice()),
			Err(RosterError::Malformed { .. })
		));
	}

	#[test]
	fn load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "{HEADER}Alice,Smith,asmith,alice@example.com,\"eng,ops\"\n").unwrap();

		let entries = load_roster(file.path()).unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].groups.len(), 2);
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = load_roster(dir.path().join("users.csv")).unwrap_err();
		assert!(matches!(err, RosterError::Io { .. }));
	}

	proptest! {
		#[test]
		fn split_groups_rejoins_to_input(names in proptest::collection::vec("[a-z ]{0,8}", 1..6)) {
			let cell = names.join(",");
			let groups = split_groups(&cell);
			prop_assert_eq!(groups.len(), names.len());
			prop_assert_eq!(groups.join(","), cell);
		}
	}
}
