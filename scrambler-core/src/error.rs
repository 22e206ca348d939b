use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedFormatError {
    BadLength { length: usize },
    InvalidCharacter { offset: usize, byte: u8 },
    InvalidPadding,
}

impl fmt::Display for SeedFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength { length } => {
                write!(f, "length {length} cannot be padded to a multiple of 4")
            }
            Self::InvalidCharacter { offset, byte } => {
                write!(f, "invalid character 0x{byte:02x} at offset {offset}")
            }
            Self::InvalidPadding => write!(f, "malformed padding"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrambleError {
    InvalidSeedFormat {
        reason: SeedFormatError,
    },
    SeedTooShort {
        actual: usize,
        min: usize,
    },
    InvalidDimensions {
        rows: u32,
        cols: u32,
    },
    TooManyTiles {
        tiles: u64,
        max: u32,
    },
    ImageTooSmall {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
    PixelBufferMismatch {
        expected: usize,
        actual: usize,
    },
    ImageTooLarge {
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
    },
    InvalidPermutation {
        position: usize,
        value: u32,
    },
    InverseMismatch {
        position: usize,
    },
}

impl fmt::Display for ScrambleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSeedFormat { reason } => write!(f, "invalid seed format: {reason}"),
            Self::SeedTooShort { actual, min } => {
                write!(f, "seed too short: got {actual} bytes, need at least {min}")
            }
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "invalid grid dimensions: {rows}x{cols} (rows and cols must be positive)"
            ),
            Self::TooManyTiles { tiles, max } => {
                write!(f, "too many tiles: {tiles} (allowed 1..={max})")
            }
            Self::ImageTooSmall {
                width,
                height,
                rows,
                cols,
            } => write!(
                f,
                "image {width}x{height} is too small for a {rows}x{cols} tile grid"
            ),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "tile count mismatch: expected {expected} tiles, got {actual}"
            ),
            Self::PixelBufferMismatch { expected, actual } => write!(
                f,
                "pixel buffer size mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::ImageTooLarge {
                width,
                height,
                bytes_per_pixel,
            } => write!(
                f,
                "image {width}x{height} at {bytes_per_pixel} bytes per pixel does not fit in memory"
            ),
            Self::InvalidPermutation { position, value } => write!(
                f,
                "not a permutation: entry {value} at position {position} is out of range or repeated"
            ),
            Self::InverseMismatch { position } => {
                write!(f, "inverse permutation disagrees at position {position}")
            }
        }
    }
}

impl From<SeedFormatError> for ScrambleError {
    fn from(reason: SeedFormatError) -> Self {
        Self::InvalidSeedFormat { reason }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SeedFormatError {}

#[cfg(feature = "std")]
impl std::error::Error for ScrambleError {}
