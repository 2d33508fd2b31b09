//! # Gridmeet Core
//!
//! Domain types and the availability grid engine for the Gridmeet
//! scheduling-poll service.
//!
//! An event owns a rectangular grid of 15-minute timeslots, anchored either
//! to specific calendar dates or to a generic weekday pattern. Participants
//! submit a 2D boolean grid of availability which is reconciled against the
//! event's timeslot rows; viewers read the result back aggregated across
//! participants.
//!
//! Everything in this crate is pure: grid construction, shape derivation,
//! submission validation, edit diffing and aggregation all operate on
//! in-memory data, so the engine is unit-testable without a database. The
//! `gridmeet-api` crate drives these functions inside one transaction per
//! request.

pub mod aggregate;
pub mod edit;
pub mod errors;
pub mod grid;
pub mod models;
pub mod reconcile;
