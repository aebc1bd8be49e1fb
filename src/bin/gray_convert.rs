use gray_bench::harness::measure;
use gray_bench::image::io::{read_float_image, save_grayscale_u8, write_byte_rows};
use gray_bench::image::GrayImageU8;
use gray_bench::kernel::{GrayKernel, KernelKind};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

struct Options {
    input: String,
    png: Option<PathBuf>,
    kernel: KernelKind,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let opts = parse_args(env::args().skip(1))?;

    let image = if opts.input == "-" {
        read_float_image(io::stdin().lock())?
    } else {
        let file = File::open(&opts.input)
            .map_err(|e| format!("Failed to open {}: {e}", opts.input))?;
        read_float_image(BufReader::new(file))?
    };

    let kernel = opts.kernel.build();
    let mut output = GrayImageU8::new(image.w, image.h);
    let ((), elapsed) = measure(|| kernel.convert(&image, &mut output));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let write_err = |e: io::Error| format!("Failed to write output: {e}");
    writeln!(out, "Output Integer Values:").map_err(write_err)?;
    write_byte_rows(&output, &mut out).map_err(write_err)?;
    writeln!(
        out,
        "Benchmark: {} conversion took {:.6} ms.",
        kernel.name(),
        elapsed.as_secs_f64() * 1000.0
    )
    .map_err(write_err)?;

    if let Some(path) = &opts.png {
        save_grayscale_u8(&output, path)?;
        writeln!(out, "Saved grayscale PNG to {}", path.display()).map_err(write_err)?;
    }
    Ok(())
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut input = None;
    let mut png = None;
    let mut kernel = KernelKind::Scalar;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--png" => {
                png = Some(PathBuf::from(args.next().ok_or("Option `--png` requires a path")?))
            }
            "--kernel" => {
                kernel = args
                    .next()
                    .ok_or("Option `--kernel` requires a value")?
                    .parse()?
            }
            "-h" | "--help" => return Err(usage()),
            other if input.is_none() => input = Some(other.to_string()),
            other => return Err(format!("Unexpected argument `{other}`\n{}", usage())),
        }
    }
    let input = input.ok_or_else(usage)?;
    Ok(Options { input, png, kernel })
}

fn usage() -> String {
    "Usage: gray_convert <rows.txt|-> [--png out.png] [--kernel scalar|lanes]\n\
     Input: a `height width` line followed by `height` rows of comma separated floats."
        .to_string()
}
