/// Mulberry32 increment. Also XOR-ed into the initial state.
pub const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// Seeds must carry at least one 32-bit word.
pub const MIN_SEED_BYTES: usize = 4;

/// Default tile ceiling for callers that bound grid size, such as the CLI.
/// The core generator itself only rejects grids beyond the `u32` index range.
pub const MAX_TILES_DEFAULT: u32 = 65_536;

/// 2^32, the divisor mapping a `u32` draw onto `[0, 1)`.
pub const DRAW_SCALE: f64 = 4_294_967_296.0;
