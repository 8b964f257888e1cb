//! Wire types and request shaping for the KiriminAja API.
//!
//! The only decision logic in the proxy lives here: query gating, required
//! field checks, and string coercion of pricing parameters. All shaping
//! functions are pure (no I/O).

pub mod request;
pub mod types;
