//! `argbind` is a typed, declarative command line argument binder for Rust.
//!
//! Register positional arguments, optional arguments and sub-commands against an [`ArgumentParser`].
//! Each registration returns a typed handle; after parsing, the handle reads back the converted values.
//! `argbind` prioritizes the following:
//! * *Typed values*:
//! The user never calls `&str -> T` conversions directly.
//! Tokens are converted to the registered type (`bool`, the integer and float primitives, or `String`), and rejected when they don't fit.
//! * *Domain constraints*:
//! Numeric arguments may be restricted to an inclusive range, and string arguments to a length range.
//! * *Cardinalities*:
//! Each argument declares how many values it takes, via [`Nargs`] (`?`, `*`, `+`, a precise count, or a range).
//! * *Sub-commands*:
//! Any command may nest further commands, each with its own arguments.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! ```console
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer
//! usage: summer items [...]
//! argument 'items': expected values count: 1..∞
//!
//! $ summer 1 blah
//! usage: summer items [...]
//! argument 'items': invalid u32 value: 'blah'
//! ```
//!
//! ### Sub-commands
//! ```no_run
#![doc = include_str!("../demos/sub_command.rs")]
//! ```
//!
//! ### Constraints
//! ```no_run
#![doc = include_str!("../demos/constraints.rs")]
//! ```
//!
//! # Cli Semantics
//! `argbind` parses the tokens of each command in stages:
//!
//! * The first token naming a sub-command of the current command ends that command's tokens; the rest belong to the sub-command.
//! * Tokens up to the first option-like token (a prefix character followed by a non-digit, ex: `-o` or `--opt`, but not `-5`) form the positional run.
//! * The positional run is distributed over the positionals in declaration order.
//! Each positional takes as many values as it can (up to its maximum), while reserving the minimums of the positionals after it.
//! For example, `p1:*`, `p2:*`, `p3:+` over `1 2 3 4 5` binds `p1=[1, 2, 3, 4]`, `p2=[]`, `p3=[5]`.
//! * The remaining tokens are scanned for optionals.
//! Each optional takes the following non-option-like tokens, up to its maximum.
//! * A repeated optional replaces the value of a single-valued optional, and appends to a multi-valued optional.
//! * Unmatched tokens are an error: an invalid sub-command choice when the command has sub-commands, otherwise unrecognized arguments.
//!
//! Parsing stops at the first failure; see [`ParseError`].
//! Values accumulate across repeated parses until [`ArgumentParser::reset`].
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events for the matching and parsing stages.
pub use argbind_builder::*;
