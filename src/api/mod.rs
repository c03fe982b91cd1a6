//! Fetch collaborator for the Unsplash search API.
//!
//! Maps `(query, page)` to a request description and maps the host's HTTP
//! result back to a [`SearchPage`](crate::domain::SearchPage) or a
//! [`FetchError`](crate::domain::FetchError). Nothing in here keeps
//! pagination state: the page number is the only key.
//!
//! # Modules
//!
//! - [`request`]: URL, header and context construction
//! - [`response`]: JSON decoding and status classification

pub mod request;
pub mod response;

pub use request::{generation_from_context, FetchRequest, ImageApi};
pub use response::decode_response;
