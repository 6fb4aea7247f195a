//! API module for HTTP endpoints
//!
//! This module provides the REST surface of the catalog search server.

pub mod http;
pub mod rest;
pub mod state;
