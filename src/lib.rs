// Copyright 2026 Rebar Bot Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rebar menu bot library — scrape the site once, serve it as a chat menu.
//!
//! The pipeline is `fetch` → `extract` → [`catalog::Catalog`], run
//! exactly once at startup; afterwards [`nav`] renders screens from the
//! immutable snapshot and [`server`] pushes them through a
//! [`transport::ChatTransport`]. Exposed as a library for integration
//! testing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod nav;
pub mod server;
pub mod telegram;
pub mod transport;
