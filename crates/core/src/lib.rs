//! # Coursedesk Core
//!
//! Domain types shared by the API and storage crates, together with the
//! schedule-conflict rules that keep rooms and teachers from being
//! double-booked.
//!
//! - [`models`]: courses, professors, schedule slots and the request/response
//!   payloads exchanged over HTTP
//! - [`conflict`]: the overlap predicate and the room/teacher checks
//! - [`index`]: a bucketed interval index answering the same questions in
//!   logarithmic time per bucket
//! - [`weekly`]: the day-by-day planning view
//! - [`errors`]: the error taxonomy mapped to HTTP statuses by the API crate

pub mod conflict;
pub mod errors;
pub mod index;
pub mod models;
pub mod weekly;
