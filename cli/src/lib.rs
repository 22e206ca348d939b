use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tile_scrambler_core::constants::DRAW_SCALE;
use tile_scrambler_core::{
    decode_seed, encode_seed, generate_permutation_for_grid, scramble_pixels, unscramble_pixels,
    ScrambleError, SeededRng, TileGrid, TileLayout, TileMove, TilePermutation,
};

pub mod config;

pub use config::CliPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seed: String,
    pub canonical: String,
    pub byte_len: usize,
    pub bytes_hex: String,
    pub initial_state: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Draw {
    pub index: u32,
    pub raw: u32,
    pub unit: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub seed: String,
    pub rows: u32,
    pub cols: u32,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub moves: Vec<TileMove>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Scramble,
    Unscramble,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scramble => "scramble",
            Self::Unscramble => "unscramble",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageGeometry {
    pub rows: u32,
    pub cols: u32,
    pub width: u32,
    pub height: u32,
}

pub fn describe_seed(seed: &str) -> Result<SeedReport> {
    let bytes = decode_seed(seed).map_err(|err| report_core_error(seed, err))?;
    let initial_state = SeededRng::from_seed_bytes(&bytes)
        .ok()
        .map(|rng| rng.state());

    Ok(SeedReport {
        seed: seed.to_string(),
        canonical: encode_seed(&bytes),
        byte_len: bytes.len(),
        bytes_hex: bytes.iter().map(|b| format!("{b:02x}")).collect(),
        initial_state,
    })
}

pub fn sample_draws(seed: &str, count: u32, policy: &CliPolicy) -> Result<Vec<Draw>> {
    if count == 0 || count > policy.max_draws {
        return Err(anyhow!(
            "draw count must be between 1 and {}",
            policy.max_draws
        ));
    }

    let mut rng = seeded_rng(seed)?;
    Ok((0..count)
        .map(|index| {
            let raw = rng.next_u32();
            Draw {
                index,
                raw,
                unit: raw as f64 / DRAW_SCALE,
            }
        })
        .collect())
}

pub fn permutation_for(
    seed: &str,
    rows: u32,
    cols: u32,
    policy: &CliPolicy,
) -> Result<TilePermutation> {
    let grid = bounded_grid(seed, rows, cols, policy)?;
    permutation_for_grid(seed, grid)
}

pub fn plan_for(seed: &str, image: ImageGeometry, policy: &CliPolicy) -> Result<PlanReport> {
    let (layout, permutation) = layout_and_permutation(seed, image, policy)?;
    let moves = layout
        .unscramble_plan(&permutation)
        .map_err(|err| report_core_error(seed, err))?;

    Ok(PlanReport {
        seed: seed.to_string(),
        rows: image.rows,
        cols: image.cols,
        width: image.width,
        height: image.height,
        tile_width: layout.tile_width(),
        tile_height: layout.tile_height(),
        moves,
    })
}

pub fn transform_pixels(
    seed: &str,
    image: ImageGeometry,
    bytes_per_pixel: usize,
    pixels: &[u8],
    direction: Direction,
    policy: &CliPolicy,
) -> Result<Vec<u8>> {
    if bytes_per_pixel == 0 {
        return Err(anyhow!("bytes per pixel must be at least 1"));
    }

    let (layout, permutation) = layout_and_permutation(seed, image, policy)?;
    let out = match direction {
        Direction::Scramble => scramble_pixels(pixels, bytes_per_pixel, &layout, &permutation),
        Direction::Unscramble => unscramble_pixels(pixels, bytes_per_pixel, &layout, &permutation),
    }
    .map_err(|err| report_core_error(seed, err))?;

    tracing::info!(
        direction = direction.as_str(),
        width = image.width,
        height = image.height,
        tiles = permutation.len(),
        "transformed pixel buffer"
    );
    Ok(out)
}

pub fn transform_file(
    seed: &str,
    image: ImageGeometry,
    bytes_per_pixel: usize,
    input: &Path,
    output: &Path,
    direction: Direction,
    policy: &CliPolicy,
) -> Result<()> {
    let pixels = fs::read(input)
        .with_context(|| format!("failed to read pixel buffer: {}", input.display()))?;
    let out = transform_pixels(seed, image, bytes_per_pixel, &pixels, direction, policy)?;
    fs::write(output, out)
        .with_context(|| format!("failed writing pixel buffer: {}", output.display()))
}

/// Write `value` as pretty JSON to `output`, or to stdout when no path is given.
pub fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize json output")?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed writing json output: {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn seeded_rng(seed: &str) -> Result<SeededRng> {
    let bytes = decode_seed(seed).map_err(|err| report_core_error(seed, err))?;
    SeededRng::from_seed_bytes(&bytes).map_err(|err| report_core_error(seed, err))
}

fn layout_and_permutation(
    seed: &str,
    image: ImageGeometry,
    policy: &CliPolicy,
) -> Result<(TileLayout, TilePermutation)> {
    let grid = bounded_grid(seed, image.rows, image.cols, policy)?;
    let layout = TileLayout::new(image.width, image.height, grid)
        .map_err(|err| report_core_error(seed, err))?;
    let permutation = permutation_for_grid(seed, grid)?;
    Ok((layout, permutation))
}

fn bounded_grid(seed: &str, rows: u32, cols: u32, policy: &CliPolicy) -> Result<TileGrid> {
    TileGrid::with_limit(rows, cols, policy.max_tiles).map_err(|err| report_core_error(seed, err))
}

fn permutation_for_grid(seed: &str, grid: TileGrid) -> Result<TilePermutation> {
    let permutation =
        generate_permutation_for_grid(seed, grid).map_err(|err| report_core_error(seed, err))?;
    tracing::info!(
        rows = grid.rows(),
        cols = grid.cols(),
        tiles = permutation.len(),
        "generated tile permutation"
    );
    Ok(permutation)
}

fn report_core_error(seed: &str, err: ScrambleError) -> anyhow::Error {
    match &err {
        // Backend and client disagree on the seed format.
        ScrambleError::SeedTooShort { .. } => {
            tracing::error!(seed, %err, "seed shorter than one word; backend contract mismatch");
        }
        _ => tracing::warn!(seed, %err, "tile scrambling failed"),
    }
    anyhow::Error::new(err).context(format!("seed {seed:?} rejected"))
}
