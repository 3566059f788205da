//! WHOIS/RDAP domain lookup.
//!
//! Raw answers come from a [`WhoisSource`] (in production the `whois-service`
//! crate) as loosely-typed JSON. [`WhoisClient`] bounds each query with a
//! timeout, catches every failure at this boundary, and normalizes successful
//! answers into the fixed-shape [`WhoisInfo`].

mod client;
mod parse;
mod source;
mod types;

// Re-export public API
pub use client::WhoisClient;
pub use parse::{normalize_registrar, normalize_whois, parse_date_string};
pub use source::{ServiceWhois, WhoisSource};
pub use types::{ShapeError, WhoisInfo};
