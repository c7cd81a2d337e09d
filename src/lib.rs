//! `slcsp` library crate.
//!
//! The binary (`slcsp`) is a thin wrapper around this library so that:
//!
//! - the resolver and selector are testable without spawning processes
//! - loading, resolution and presentation stay in separate modules

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod slcsp;
