//! Command-line interface: argument definitions and dispatch

pub mod commands;
pub mod dispatch;
