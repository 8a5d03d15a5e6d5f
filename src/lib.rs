//! `envsubst`: substitute environment variables into files.
//!
//! Scans files for `${NAME}` and `${NAME:-default}` placeholders and
//! rewrites them with values from a variable mapping, normally the process
//! environment. Optionally restricted to names with a given prefix,
//! matched case-insensitively, or limited to `window["${NAME}"]` wrapped
//! references whose wrapper is stripped on output.
//!
//! # Architecture
//!
//! ```text
//! globs → util::glob → read → subst::substitute → atomic write
//!                                   ↓
//!                      Replacement report → table / JSON
//! ```
//!
//! The engine in [`subst`] is pure and usable on its own; everything in
//! [`util`] and [`run`] is file plumbing around it.

pub mod cli;
pub mod config;
pub mod error;
pub mod run;
pub mod subst;
pub mod table;
pub mod util;

pub use config::RunConfig;
pub use error::{EnvsubstError, EnvsubstResult};
pub use subst::{substitute, substitute_async, Replacement, SubstituteOptions, Substitution};
