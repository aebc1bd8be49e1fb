use crate::driver::{BenchPlan, DEFAULT_SIZES, MIN_ITERATIONS};
use crate::error::BenchResult;
use crate::kernel::KernelKind;
use crate::types::ImageSize;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Benchmark settings as read from a JSON file. Every field is optional.
///
/// ```json
/// {
///   "sizes": [{ "width": 10, "height": 10 }, { "width": 100, "height": 100 }],
///   "iterations": 50,
///   "seed": 42,
///   "kernel": "lanes"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub sizes: Vec<ImageSize>,
    pub iterations: usize,
    /// Base seed for the workload; wall clock when absent.
    pub seed: Option<u64>,
    pub kernel: KernelKind,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            iterations: MIN_ITERATIONS,
            seed: None,
            kernel: KernelKind::default(),
        }
    }
}

impl BenchConfig {
    /// Validate into a runnable plan.
    pub fn to_plan(&self) -> BenchResult<BenchPlan> {
        let plan = BenchPlan::new(&self.sizes, self.iterations)?;
        Ok(match self.seed {
            Some(seed) => plan.with_seed(seed),
            None => plan,
        })
    }
}

pub fn load_config(path: &Path) -> Result<BenchConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[derive(Clone, Debug, PartialEq)]
pub enum CliCommand {
    Run(BenchConfig),
    Help,
}

/// Parse `[config.json] [--kernel K] [--seed N] [--iterations N]`.
///
/// Flags override values loaded from the config file.
pub fn parse_cli<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path: Option<PathBuf> = None;
    let mut kernel = None;
    let mut seed = None;
    let mut iterations = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "--kernel" => kernel = Some(flag_value(&mut args, "--kernel")?.parse::<KernelKind>()?),
            "--seed" => seed = Some(parse_number::<u64, _>(&mut args, "--seed")?),
            "--iterations" => iterations = Some(parse_number::<usize, _>(&mut args, "--iterations")?),
            flag if flag.starts_with('-') => return Err(format!("Unknown option `{flag}`")),
            path => {
                if config_path.is_some() {
                    return Err(format!("Unexpected argument `{path}`"));
                }
                config_path = Some(PathBuf::from(path));
            }
        }
    }

    let mut config = match &config_path {
        Some(path) => load_config(path)?,
        None => BenchConfig::default(),
    };
    if let Some(kernel) = kernel {
        config.kernel = kernel;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if let Some(iterations) = iterations {
        config.iterations = iterations;
    }
    Ok(CliCommand::Run(config))
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [config.json] [--kernel scalar|lanes] [--seed N] [--iterations N]\n\
         \n\
         Without a config file the benchmark times 10x10, 100x100 and 1000x1000 images,\n\
         {MIN_ITERATIONS} iterations each. Set RUST_LOG=debug for per-size log output."
    )
}

fn flag_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("Option `{flag}` requires a value"))
}

fn parse_number<T, I>(args: &mut I, flag: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    I: Iterator<Item = String>,
{
    let raw = flag_value(args, flag)?;
    raw.parse()
        .map_err(|_| format!("Invalid value `{raw}` for `{flag}`"))
}
