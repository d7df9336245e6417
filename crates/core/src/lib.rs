//! Core types for the Glimpse preview service client.
//!
//! This crate defines the [`Query`] descriptor — the immutable value object
//! encoding all parameters of one preview or thumbnail request — together
//! with the closed option enums it is built from. Serializing a [`Query`]
//! (via [`Display`](std::fmt::Display)) produces the URL path and query
//! string the preview service expects; the HTTP side lives in
//! `glimpse-client`.

pub mod error;
pub mod options;
pub mod query;

pub use error::UnknownVariant;
pub use options::{ImageFormat, Quality, ServiceType, Shape};
pub use query::{Query, QueryBuilder};
