//! JSON configuration and command-line parsing for the benchmark binary.
pub mod bench;

pub use self::bench::{load_config, parse_cli, usage, BenchConfig, CliCommand};
