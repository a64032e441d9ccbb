// csssan/src/lib.rs
//! # csssan CLI Application
//!
//! This crate provides the command-line front end for `csssan-core`: reading stylesheets from
//! files or stdin, building the sanitizer policy from the embedded default plus an optional
//! user file, and reporting diagnostics.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
