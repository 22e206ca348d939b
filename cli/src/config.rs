use std::env;

use tile_scrambler_core::constants::MAX_TILES_DEFAULT;

pub const DEFAULT_MAX_DRAWS: u32 = 4_096;
pub const MAX_TILES_ENV: &str = "TILE_SCRAMBLER_MAX_TILES";
pub const MAX_DRAWS_ENV: &str = "TILE_SCRAMBLER_MAX_DRAWS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliPolicy {
    pub max_tiles: u32,
    pub max_draws: u32,
}

impl Default for CliPolicy {
    fn default() -> Self {
        Self {
            max_tiles: MAX_TILES_DEFAULT,
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }
}

impl CliPolicy {
    pub fn from_env() -> Self {
        let policy = Self {
            max_tiles: read_env_u32(MAX_TILES_ENV, MAX_TILES_DEFAULT),
            max_draws: read_env_u32(MAX_DRAWS_ENV, DEFAULT_MAX_DRAWS),
        };
        tracing::debug!(
            max_tiles = policy.max_tiles,
            max_draws = policy.max_draws,
            "loaded cli policy"
        );
        policy
    }
}

/// Unset, unparsable and zero values all fall back to `default`.
pub fn read_env_u32(name: &str, default: u32) -> u32 {
    parse_positive_u32(env::var(name).ok().as_deref()).unwrap_or(default)
}

fn parse_positive_u32(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}
