//! Data model shared between the Helper server and anything that talks to it.
//!
//! - `model`: templates, reports and the platform entities they reference.
//! - `requests`: inbound payloads for the HTTP endpoints.
//! - `responses`: the JSON envelope returned by create actions.

pub mod model;
pub mod requests;
pub mod responses;

/// Name under which this module registers permissions, routes and localization.
pub const MODULE_NAME: &str = "Helper";
