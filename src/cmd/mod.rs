//! Command line subcommands other than serving.

pub mod check;
