//! Builder module for `argbind`.
//! See the `argbind` crate documentation for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{split_command_line, ArgumentInfo, ConfigError, ParseError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
