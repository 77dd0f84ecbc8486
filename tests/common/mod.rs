//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestServer;
//!
//! #[test]
//! fn test_delivery() {
//!     let server = TestServer::spawn();
//!     let response = mpns::send_notification(&server.channel_uri(), Some("toast"), Default::default()).unwrap();
//!     assert_eq!(server.requests().len(), 1);
//! }
//! ```

mod constants;
mod server;

pub use constants::*;
pub use server::{unused_port, CapturedRequest, TestServer};
