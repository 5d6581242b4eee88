// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Roster provisioning for Keycloak.
//!
//! A run loads the configuration and the roster, authenticates once, then
//! walks the roster in file order: users that already exist are skipped,
//! missing users are created and sent an `UPDATE_PASSWORD` email. The
//! first failure ends the run.

pub mod logging;
pub mod orchestrator;

pub use orchestrator::{provision_entry, provision_roster, run, EntryOutcome, ProvisionReport, RunError};
