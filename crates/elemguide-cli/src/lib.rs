//! elemguide CLI library.
//!
//! Input discovery, configuration loading, logging setup and the `check` and
//! `rules` commands behind the `elemguide` binary.

pub mod commands;
pub mod input;
pub mod logging;
