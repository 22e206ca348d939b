use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::ScrambleError;
use crate::rng::SeededRng;
use crate::seed::decode_seed;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    rows: u32,
    cols: u32,
}

impl TileGrid {
    /// Any positive grid whose tile indices fit in a `u32`, the same ceiling
    /// as a JavaScript array length.
    pub fn new(rows: u32, cols: u32) -> Result<Self, ScrambleError> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
            return Err(ScrambleError::InvalidDimensions { rows, cols });
        }

        Ok(Self { rows, cols })
    }

    /// As [`TileGrid::new`], additionally refusing grids above `max_tiles`.
    pub fn with_limit(rows: u32, cols: u32, max_tiles: u32) -> Result<Self, ScrambleError> {
        let grid = Self::new(rows, cols)?;

        let tiles = grid.tiles();
        if tiles > max_tiles {
            return Err(ScrambleError::TooManyTiles {
                tiles: tiles as u64,
                max: max_tiles,
            });
        }

        Ok(grid)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn tile_count(&self) -> usize {
        self.tiles() as usize
    }

    fn tiles(&self) -> u32 {
        self.rows * self.cols
    }
}

/// `permutation()[k]` is the scrambled position of original tile `k`;
/// `inverse_permutation()` maps a scrambled position back to its original
/// tile. Both are always bijections over `0..len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTilePermutation")]
pub struct TilePermutation {
    permutation: Vec<u32>,
    inverse_permutation: Vec<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTilePermutation {
    permutation: Vec<u32>,
    inverse_permutation: Option<Vec<u32>>,
}

impl TryFrom<RawTilePermutation> for TilePermutation {
    type Error = ScrambleError;

    fn try_from(raw: RawTilePermutation) -> Result<Self, Self::Error> {
        let built = Self::from_permutation(raw.permutation)?;
        if let Some(inverse) = raw.inverse_permutation {
            if inverse.len() != built.len() {
                return Err(ScrambleError::LengthMismatch {
                    expected: built.len(),
                    actual: inverse.len(),
                });
            }
            if let Some(position) = inverse
                .iter()
                .zip(&built.inverse_permutation)
                .position(|(given, derived)| given != derived)
            {
                return Err(ScrambleError::InverseMismatch { position });
            }
        }
        Ok(built)
    }
}

impl TilePermutation {
    /// Validate `permutation` as a bijection over `0..len` and derive its
    /// inverse.
    pub fn from_permutation(permutation: Vec<u32>) -> Result<Self, ScrambleError> {
        let len = permutation.len();
        let mut inverse_permutation = alloc::vec![u32::MAX; len];

        for (original, &position) in permutation.iter().enumerate() {
            let slot = inverse_permutation
                .get_mut(position as usize)
                .filter(|slot| **slot == u32::MAX)
                .ok_or(ScrambleError::InvalidPermutation {
                    position: original,
                    value: position,
                })?;
            *slot = original as u32;
        }

        Ok(Self {
            permutation,
            inverse_permutation,
        })
    }

    pub fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    pub fn inverse_permutation(&self) -> &[u32] {
        &self.inverse_permutation
    }

    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Move each original tile to its scrambled position.
    pub fn scramble<T: Clone>(&self, tiles: &[T]) -> Result<Vec<T>, ScrambleError> {
        self.check_len(tiles.len())?;
        Ok(self
            .inverse_permutation
            .iter()
            .map(|&original| tiles[original as usize].clone())
            .collect())
    }

    /// Put scrambled tiles back in their original order.
    pub fn unscramble<T: Clone>(&self, scrambled: &[T]) -> Result<Vec<T>, ScrambleError> {
        self.check_len(scrambled.len())?;
        Ok(self
            .permutation
            .iter()
            .map(|&position| scrambled[position as usize].clone())
            .collect())
    }

    pub(crate) fn check_len(&self, actual: usize) -> Result<(), ScrambleError> {
        if actual != self.len() {
            return Err(ScrambleError::LengthMismatch {
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }
}

/// Fisher-Yates shuffle over the tiles of `grid`, walking from the last
/// index down to 1. Draw order must not change: the backend scrambles tiles
/// with the same walk.
pub fn shuffle_tiles(rng: &mut SeededRng, grid: TileGrid) -> TilePermutation {
    let tile_count = grid.tile_count();
    let mut permutation: Vec<u32> = (0..grid.tiles()).collect();

    for i in (1..tile_count).rev() {
        let j = rng.next_index(i + 1);
        permutation.swap(i, j);
    }

    let mut inverse_permutation = alloc::vec![0u32; tile_count];
    for (original, &position) in permutation.iter().enumerate() {
        inverse_permutation[position as usize] = original as u32;
    }

    TilePermutation {
        permutation,
        inverse_permutation,
    }
}

pub fn generate_permutation(
    seed: &str,
    rows: u32,
    cols: u32,
) -> Result<TilePermutation, ScrambleError> {
    let grid = TileGrid::new(rows, cols)?;
    generate_permutation_for_grid(seed, grid)
}

pub fn generate_permutation_for_grid(
    seed: &str,
    grid: TileGrid,
) -> Result<TilePermutation, ScrambleError> {
    let bytes = decode_seed(seed)?;
    let mut rng = SeededRng::from_seed_bytes(&bytes)?;
    Ok(shuffle_tiles(&mut rng, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn assert_bijection(values: &[u32]) {
        let mut seen = vec![false; values.len()];
        for &value in values {
            let slot = &mut seen[value as usize];
            assert!(!*slot, "index {value} appears twice");
            *slot = true;
        }
    }

    #[test]
    fn golden_two_by_two() {
        let result = generate_permutation("AQIDBA", 2, 2).unwrap();
        assert_eq!(result.permutation(), vec![3, 2, 0, 1]);
        assert_eq!(result.inverse_permutation(), vec![2, 3, 1, 0]);
    }

    #[test]
    fn golden_three_by_four() {
        let result = generate_permutation("AQIDBA", 3, 4).unwrap();
        assert_eq!(
            result.permutation(),
            vec![6, 7, 11, 9, 10, 3, 8, 1, 5, 0, 2, 4]
        );
        assert_eq!(
            result.inverse_permutation(),
            vec![9, 7, 10, 5, 11, 8, 0, 1, 6, 3, 4, 2]
        );
    }

    #[test]
    fn single_tile_is_identity_and_consumes_no_draws() {
        let mut rng = SeededRng::from_seed_bytes(&[0x01, 0x02, 0x03, 0x04]).unwrap();
        let before = rng.state();
        let result = shuffle_tiles(&mut rng, TileGrid::new(1, 1).unwrap());

        assert_eq!(result.permutation(), vec![0]);
        assert_eq!(result.inverse_permutation(), vec![0]);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn shuffle_draws_once_per_swap() {
        let mut rng = SeededRng::from_seed_bytes(&[0x01, 0x02, 0x03, 0x04]).unwrap();
        shuffle_tiles(&mut rng, TileGrid::new(2, 5).unwrap());

        let mut reference = SeededRng::from_seed_bytes(&[0x01, 0x02, 0x03, 0x04]).unwrap();
        for _ in 0..9 {
            reference.next_u32();
        }
        assert_eq!(rng.state(), reference.state());
    }

    #[test]
    fn inverse_undoes_permutation_for_many_grids() {
        for (rows, cols) in [(1, 7), (5, 1), (4, 4), (9, 13), (32, 32)] {
            let result = generate_permutation("3q2-7xE", rows, cols).unwrap();
            assert_eq!(result.len(), (rows * cols) as usize);
            assert_bijection(result.permutation());
            assert_bijection(result.inverse_permutation());
            for (i, &position) in result.permutation().iter().enumerate() {
                assert_eq!(result.inverse_permutation()[position as usize], i as u32);
            }
        }
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            generate_permutation("AQIDBA", 0, 3),
            Err(ScrambleError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            generate_permutation("AQIDBA", 3, 0),
            Err(ScrambleError::InvalidDimensions { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn dimensions_are_checked_before_the_seed() {
        assert!(matches!(
            generate_permutation("!", 0, 0),
            Err(ScrambleError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn limit_applies_only_when_requested() {
        assert_eq!(
            TileGrid::with_limit(10, 11, 100),
            Err(ScrambleError::TooManyTiles {
                tiles: 110,
                max: 100
            })
        );
        assert!(TileGrid::with_limit(10, 10, 100).is_ok());
        assert!(TileGrid::new(10, 11).is_ok());
    }

    #[test]
    fn large_grids_are_accepted_without_a_limit() {
        let result = generate_permutation("AQIDBA", 300, 300).unwrap();
        assert_eq!(result.len(), 90_000);
        assert_bijection(result.permutation());
    }

    #[test]
    fn rejects_grids_beyond_index_range() {
        assert_eq!(
            TileGrid::new(u32::MAX, 2),
            Err(ScrambleError::InvalidDimensions {
                rows: u32::MAX,
                cols: 2
            })
        );
        assert_eq!(TileGrid::new(u32::MAX, 1).unwrap().tile_count(), u32::MAX as usize);
    }

    #[test]
    fn propagates_seed_errors() {
        assert!(matches!(
            generate_permutation("AAAAA", 2, 2),
            Err(ScrambleError::InvalidSeedFormat { .. })
        ));
        assert!(matches!(
            generate_permutation("AQID", 2, 2),
            Err(ScrambleError::SeedTooShort { actual: 3, min: 4 })
        ));
    }

    #[test]
    fn scramble_places_tiles_at_their_positions() {
        let result = generate_permutation("AQIDBA", 2, 2).unwrap();
        let scrambled = result.scramble(&['a', 'b', 'c', 'd']).unwrap();

        // Tile 'a' (index 0) lands at position 3, 'b' at 2, 'c' at 0, 'd' at 1.
        assert_eq!(scrambled, vec!['c', 'd', 'b', 'a']);
        assert_eq!(result.unscramble(&scrambled).unwrap(), vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn scramble_rejects_wrong_tile_count() {
        let result = generate_permutation("AQIDBA", 2, 2).unwrap();
        assert_eq!(
            result.unscramble(&[1, 2, 3]),
            Err(ScrambleError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = generate_permutation("AQIDBA", 2, 2).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"permutation":[3,2,0,1],"inversePermutation":[2,3,1,0]}"#
        );
    }

    #[test]
    fn from_permutation_derives_inverse() {
        let built = TilePermutation::from_permutation(vec![3, 2, 0, 1]).unwrap();
        assert_eq!(built.inverse_permutation(), &[2, 3, 1, 0]);
        assert_eq!(built, generate_permutation("AQIDBA", 2, 2).unwrap());
    }

    #[test]
    fn from_permutation_rejects_out_of_range_and_repeats() {
        assert_eq!(
            TilePermutation::from_permutation(vec![0, 9]),
            Err(ScrambleError::InvalidPermutation {
                position: 1,
                value: 9
            })
        );
        assert_eq!(
            TilePermutation::from_permutation(vec![1, 1, 0]),
            Err(ScrambleError::InvalidPermutation {
                position: 1,
                value: 1
            })
        );
    }

    #[test]
    fn deserialize_round_trips_generated_permutation() {
        let result = generate_permutation("dGlsZS1zZWVk", 4, 4).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: TilePermutation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn deserialize_rejects_out_of_range_entries() {
        let parsed = serde_json::from_str::<TilePermutation>(
            r#"{"permutation":[0,9],"inversePermutation":[0,1]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn deserialize_rejects_inconsistent_inverse() {
        let wrong_inverse = serde_json::from_str::<TilePermutation>(
            r#"{"permutation":[1,0,2],"inversePermutation":[0,1,2]}"#,
        );
        assert!(wrong_inverse.is_err());

        let short_inverse = serde_json::from_str::<TilePermutation>(
            r#"{"permutation":[1,0,2],"inversePermutation":[1,0]}"#,
        );
        assert!(short_inverse.is_err());
    }

    #[test]
    fn deserialize_derives_missing_inverse() {
        let parsed: TilePermutation = serde_json::from_str(r#"{"permutation":[3,2,0,1]}"#).unwrap();
        assert_eq!(parsed.inverse_permutation(), &[2, 3, 1, 0]);
    }
}
