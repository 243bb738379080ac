//! regionlink: overlay community-registered website links onto
//! administrative region maps.
//!
//! The core (registry, name matching, styling, interaction state and intake
//! validation) lives in [`domain`] and [`application`]; [`infrastructure`]
//! provides storage, [`cli`] is the command-line front end.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
