//! Mutable framework-native message model.
//!
//! Requests are assembled field by field on a [`RequestBuilder`] and then
//! built once; responses are parsed from their raw form or created around
//! an open file for streaming.
//!
//! - [`Request`] - plain request without server parameters
//! - [`EnvRequest`] - request with an explicit `$_SERVER` collection
//! - [`NativeRequest`] / [`HasServerParams`] - read access and capability check
//! - [`Response`] - buffered or streamed response
//! - [`Headers`] / [`Cookie`] - header lines and the `Cookie` header

mod headers;
mod request;
mod response;

pub use headers::{Cookie, Headers};
pub use request::{EnvRequest, HasServerParams, NativeRequest, Request, RequestBuilder};
pub use response::{Response, ResponseBody};
