//! HTTP access to the external registries.
//!
//! Every outgoing request goes through the `HttpClient` trait so the lookup
//! adapter can be exercised against canned responses in tests.

mod client;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient};

/// User agent sent with every registry request.
pub const USER_AGENT: &str = "KairoScrapper/1.0 (contact@example.com)";

/// Per-request timeout. Registries that do not answer in time are treated as
/// having no match.
pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);
