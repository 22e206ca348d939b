use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tile_scrambler::{
    describe_seed, emit_json, permutation_for, plan_for, sample_draws, transform_file, CliPolicy,
    Direction, ImageGeometry,
};

#[derive(Parser, Debug)]
#[command(name = "tile-scrambler")]
#[command(about = "Deterministic tile permutations for scrambled images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a base64url seed and show its bytes and initial RNG state
    DecodeSeed {
        #[arg(long, allow_hyphen_values = true)]
        seed: String,
    },
    /// Print raw generator draws for cross-checking against the backend
    Draws {
        #[arg(long, allow_hyphen_values = true)]
        seed: String,
        #[arg(long, default_value_t = 8)]
        count: u32,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the tile permutation and its inverse as JSON
    Permutation {
        #[arg(long, allow_hyphen_values = true)]
        seed: String,
        #[arg(long)]
        rows: u32,
        #[arg(long)]
        cols: u32,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the tile copies that restore a scrambled image
    Plan {
        #[command(flatten)]
        image: ImageArgs,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scramble a raw, tightly packed pixel buffer
    Scramble {
        #[command(flatten)]
        image: ImageArgs,
        #[command(flatten)]
        buffer: BufferArgs,
    },
    /// Restore a raw, tightly packed pixel buffer
    Unscramble {
        #[command(flatten)]
        image: ImageArgs,
        #[command(flatten)]
        buffer: BufferArgs,
    },
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Base64url seed; may start with '-'
    #[arg(long, allow_hyphen_values = true)]
    seed: String,
    #[arg(long)]
    rows: u32,
    #[arg(long)]
    cols: u32,
    /// Image width in pixels
    #[arg(long)]
    width: u32,
    /// Image height in pixels
    #[arg(long)]
    height: u32,
}

impl ImageArgs {
    fn geometry(&self) -> ImageGeometry {
        ImageGeometry {
            rows: self.rows,
            cols: self.cols,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Args, Debug)]
struct BufferArgs {
    #[arg(long, default_value_t = 4)]
    bytes_per_pixel: usize,
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let policy = CliPolicy::from_env();

    match cli.command {
        Commands::DecodeSeed { seed } => {
            let report = describe_seed(&seed)?;
            println!("Seed:          {}", report.seed);
            println!("  Canonical:   {}", report.canonical);
            println!("  Bytes:       {} ({})", report.bytes_hex, report.byte_len);
            match report.initial_state {
                Some(state) => println!("  Initial RNG: 0x{state:08x}"),
                None => println!("  Initial RNG: none (seed shorter than 4 bytes)"),
            }
        }
        Commands::Draws {
            seed,
            count,
            output,
        } => {
            let draws = sample_draws(&seed, count, &policy)?;
            emit_json(&draws, output.as_deref())?;
        }
        Commands::Permutation {
            seed,
            rows,
            cols,
            output,
        } => {
            let permutation = permutation_for(&seed, rows, cols, &policy)?;
            emit_json(&permutation, output.as_deref())?;
        }
        Commands::Plan { image, output } => {
            let plan = plan_for(&image.seed, image.geometry(), &policy)?;
            emit_json(&plan, output.as_deref())?;
        }
        Commands::Scramble { image, buffer } => {
            run_transform(&image, &buffer, Direction::Scramble, &policy)?;
        }
        Commands::Unscramble { image, buffer } => {
            run_transform(&image, &buffer, Direction::Unscramble, &policy)?;
        }
    }

    Ok(())
}

fn run_transform(
    image: &ImageArgs,
    buffer: &BufferArgs,
    direction: Direction,
    policy: &CliPolicy,
) -> Result<()> {
    transform_file(
        &image.seed,
        image.geometry(),
        buffer.bytes_per_pixel,
        &buffer.input,
        &buffer.output,
        direction,
        policy,
    )?;
    println!(
        "{} {} -> {}",
        direction.as_str(),
        buffer.input.display(),
        buffer.output.display()
    );
    Ok(())
}
