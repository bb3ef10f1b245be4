//! Integration tests for psr7_bridge
//!
//! Exercise the public conversion API end to end. File-backed bodies and
//! upload storage paths use real temporary files.

mod helpers;

mod request_roundtrip;
mod response_conversion;
mod uploads;
