//! Command line entry point of the transfer check.

pub mod cli;
