//! Second Lowest Cost Silver Plan resolution.
//!
//! Responsibilities:
//!
//! - join zip codes to silver plan rates through rating areas (`resolver`)
//! - classify each zip code and left-join onto the requested list (`selector`)

pub mod resolver;
pub mod selector;

pub use resolver::*;
pub use selector::*;
