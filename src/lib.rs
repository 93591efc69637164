//! # NVIDIA NIM Proxy
//!
//! A minimal HTTP proxy exposing an OpenAI-compatible surface in front of
//! NVIDIA NIM chat completion endpoints.
//!
//! ## Overview
//!
//! The proxy accepts OpenAI-convention requests, reshapes them into the NIM
//! payload (field selection with documented defaults, no content
//! translation), attaches the bearer credential, and relays the upstream's
//! response back to the caller:
//!
//! - Buffered responses pass through byte-exact with the upstream's status.
//! - Streaming responses are relayed line by line as they arrive, under
//!   `text/event-stream` framing, with no synthetic terminator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nim_proxy::config::ProxyConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads NVIDIA_API_KEY, NIM_BASE_URL and PORT
//! let config = ProxyConfig::from_env()?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and the proxy_error envelope
//! - [`models`] - The chat completion wire type
//! - [`client`] - Upstream NIM HTTP client
//! - [`streaming`] - Line framing and the relay stream
//! - [`handler`] - Route handlers and router assembly

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod streaming;

pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
