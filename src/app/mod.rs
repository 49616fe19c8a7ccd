// Application layer: subcommand bodies behind the binary.

pub mod commands;
