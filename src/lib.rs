//! PIN-based clock-in/clock-out service.
//!
//! Employees enter a PIN on a terminal to record their arrival ("arrivée")
//! or departure ("départ"). Attendance is stored as one row per employee and
//! day in a remote Airtable-style record store.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
