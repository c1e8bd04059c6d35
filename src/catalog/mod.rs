//! Remote catalog access.
//!
//! - [`client`] - HTTP client for listing pages, single-entry lookup and detail records
//! - [`types`] - Domain entries plus the wire shapes of the PokeAPI responses
//!
//! Every call is a single request. There is no caching and no retry: failures
//! are returned to the caller, which turns them into a message for the user.

mod client;
mod types;

pub use client::{build_http_client, CatalogClient, FetchError, DEFAULT_API_BASE_URL};
pub use types::{page_offset, parse_entry_id, CatalogEntry, CatalogPage, MAX_MOVES, PAGE_SIZE};
