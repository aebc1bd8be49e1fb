use gray_bench::config::{parse_cli, usage, CliCommand};
use gray_bench::BenchmarkDriver;
use std::env;
use std::io::{self, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "gray_bench".to_string());
    let config = match parse_cli(args)? {
        CliCommand::Help => {
            println!("{}", usage(&program));
            return Ok(());
        }
        CliCommand::Run(config) => config,
    };
    let plan = config
        .to_plan()
        .map_err(|e| format!("Invalid benchmark configuration: {e}\n\n{}", usage(&program)))?;
    let kernel = config.kernel.build();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Individual configuration failures are part of the report, not an error.
    BenchmarkDriver::new(plan)
        .run(kernel.as_ref(), &mut out)
        .map_err(|e| e.to_string())?;
    out.flush().map_err(|e| format!("Failed to flush stdout: {e}"))
}
