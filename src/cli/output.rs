//! Terminal output
//!
//! Status lines go to stderr, data (registry rows, JSON) to stdout.
//! `colored` honours NO_COLOR / CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

use crate::domain::{RegionEntry, ValidationError};

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// User-facing notice for a rejected submission.
pub fn rejected(reason: ValidationError) {
    eprintln!("{} {}", "✗".red(), reason.notice());
}

pub fn registered(entry: &RegionEntry) {
    eprintln!("{} {} -> {}", "✓".green(), entry.name().bold(), entry.website());
}

/// One registry row: name, website, id (dimmed)
pub fn entry(entry: &RegionEntry) {
    println!(
        "{}  {}  {}",
        entry.name().bold(),
        entry.website().blue(),
        entry.id().as_str().dimmed()
    );
}

pub fn header(msg: &(impl Display + ?Sized)) {
    eprintln!("{}", msg.to_string().cyan().bold());
}

/// Plain data line (no color)
pub fn data(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
