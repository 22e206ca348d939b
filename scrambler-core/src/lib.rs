#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod constants;
pub mod error;
pub mod layout;
pub mod permutation;
pub mod rng;
pub mod seed;

pub use error::{ScrambleError, SeedFormatError};
pub use layout::{scramble_pixels, unscramble_pixels, TileLayout, TileMove, TileRect};
pub use permutation::{
    generate_permutation, generate_permutation_for_grid, shuffle_tiles, TileGrid, TilePermutation,
};
pub use rng::SeededRng;
pub use seed::{decode_seed, encode_seed};
