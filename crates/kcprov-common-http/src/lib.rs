// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for kcprov.
//!
//! Every outbound request carries the same User-Agent so the identity
//! provider's access log can attribute admin API traffic to this tool.
//! Requests are never retried; a failed request ends the run.

mod client;

pub use client::{builder, user_agent};
