#![no_std]

//! A decoder for the Explicitly Formatted Logical Records (EFLRs) of the RP66
//! V1 well-logging interchange format, better known as DLIS.
//!
//! An EFLR is a self-describing table: one Set names the table, a Template
//! declares its columns, and each Object supplies a row. This crate turns the
//! body of one such record (already reassembled from its segments, header
//! stripped) into an [`Eflr`] value.
//!
//! Most users should begin with the functions in the [`avec`] module, and the
//! derive macros re-exported there. The finite-state machine driving them is
//! exposed in the [`sans`] module for applications needing finer control.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `log`: enable an observer forwarding diagnostics to the `log` facade.

extern crate alloc;

pub mod avec;
pub mod sans;

pub use sans::eflr::Eflr;
pub use sans::error::{Error, Malformed};
