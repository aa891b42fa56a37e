//! Low-level HTTP transport for the Chartly legacy (v1) API.
//!
//! This crate is the single place v1 resource methods go through to reach
//! the wire. It builds authentication headers, dispatches requests through
//! [`reqwest`], and normalizes every failure into [`TransportError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use chartly_transport::{request, Credentials, Method, RequestOptions, TransportConfig};
//!
//! # async fn demo() -> Result<(), chartly_transport::TransportError> {
//! let config = TransportConfig::new(Credentials::new("me", "pw", "proxy-me", "proxy-pw"));
//! let client = reqwest::Client::new();
//!
//! let resp = request(
//!     &client,
//!     &config,
//!     Method::GET,
//!     "https://api.chartly.dev/v1/plots/42",
//!     RequestOptions::default(),
//! )
//! .await?;
//! println!("{}", resp.text());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod headers;
pub mod transport;

pub use config::{Credentials, TransportConfig};
pub use error::TransportError;
pub use headers::{basic_auth, build_headers};
pub use transport::{ApiResponse, RequestOptions, request, validate_response};

// Re-exported so callers don't need a direct reqwest dependency for the verb.
pub use reqwest::Method;
