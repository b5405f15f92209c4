// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Response Auth - Credential Login & Bearer Token Service
//!
//! This crate verifies user and server credentials against the Response Data
//! identity store, issues HS256 JWTs for them, and gates protected routes on
//! those tokens.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential verification, claims, token signing, route gate
//! - `config` - Environment configuration
//! - `identity` - Identity store interface and GraphQL client

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod state;
