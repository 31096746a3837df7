// zhone-api: HTTP access to the Zhone gateway's embedded web pages.
//
// The gateway has no management API. Everything is served as HTML meant for
// a browser, behind HTTP basic auth. This crate only fetches documents;
// making sense of them is `zhone-core`'s job.

pub mod client;
pub mod error;
pub mod pages;
pub mod transport;

pub use client::{Credentials, GatewayClient};
pub use error::Error;
pub use transport::TransportConfig;
