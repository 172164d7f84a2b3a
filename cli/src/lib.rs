//! Terminal front end for the book catalogue.
//!
//! Pages are state machines in `views`, driven by `commands` against a
//! `Catalog` bound to the ureq transport. Everything above the transport is
//! synchronous; each command renders one page or performs one mutation.

pub mod commands;
pub mod router;
pub mod settings;
pub mod transport;
pub mod views;
