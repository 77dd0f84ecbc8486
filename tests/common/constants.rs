//! Values shared by the end-to-end tests.

#![allow(dead_code)]

/// Path of a channel the capture server treats as active.
pub const ACTIVE_CHANNEL_PATH: &str = "/throttledthirdparty/01.00/active-channel";

/// Path of a channel the capture server answers with `404` / `Expired`.
pub const EXPIRED_CHANNEL_PATH: &str = "/throttledthirdparty/01.00/expired-channel";

pub const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
