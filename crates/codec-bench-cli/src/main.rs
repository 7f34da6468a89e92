//! codec-bench CLI - lossless image codec benchmark

use std::path::PathBuf;

use clap::Parser;

use codec_bench::{BenchConfig, bench, codec, load};

/// Benchmark one lossless codec against one image.
///
/// Runs N encode/decode round trips, verifies each decode is bit-exact and
/// prints a JSON result record to stdout.
#[derive(Parser)]
#[command(name = "codec-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Codec to profile (e.g. store, png, qoi)
    codec: String,

    /// Input image (PNG, or raw <width>x<height>.<pixel-format-tag>.yuv)
    file: PathBuf,

    /// Number of encode/decode repetitions
    #[arg(short, long, default_value_t = 5)]
    repetitions: u32,

    /// Directory to persist the first repetition's codestream into
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (encoder, decoder) = codec::create(&cli.codec)?;
    let image = load::load_image(&cli.file)?;

    if cli.verbose {
        eprintln!(
            "{}: {}x{} {}-bit {}, digest {}",
            cli.file.display(),
            image.width(),
            image.height(),
            image.format().bit_depth,
            image.format().components.name(),
            image.digest(),
        );
    }

    let mut config = BenchConfig::new(cli.repetitions);
    if let Some(dir) = cli.dir {
        config = config.with_codestream_dir(dir);
    }

    let result = bench::run(encoder.as_ref(), decoder.as_ref(), &image, &config)?;

    if cli.verbose {
        if let (Some(enc), Some(dec)) = (result.mean_encode_time(), result.mean_decode_time()) {
            eprintln!(
                "{}: mean encode {:.3}s, mean decode {:.3}s, ratio {:.3}",
                cli.codec,
                enc.as_secs_f64(),
                dec.as_secs_f64(),
                result.compression_ratio(),
            );
        }
    }

    println!("{}", result.to_json_pretty()?);
    Ok(())
}
