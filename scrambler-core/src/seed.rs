use alloc::{string::String, vec::Vec};
use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD},
        DecodePaddingMode,
    },
    DecodeError, Engine,
};

use crate::error::{ScrambleError, SeedFormatError};

// Browsers' atob() ignores stray bits in the final symbol, so the backend may
// hand out seeds that a strict decoder would reject.
const SEED_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Decode a URL-safe base64 seed (padding optional) into raw bytes.
pub fn decode_seed(seed: &str) -> Result<Vec<u8>, ScrambleError> {
    let mut standard: String = seed
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    match standard.len() % 4 {
        2 => standard.push_str("=="),
        3 => standard.push('='),
        _ => {}
    }

    if standard.len() % 4 != 0 {
        return Err(SeedFormatError::BadLength {
            length: seed.len(),
        }
        .into());
    }

    SEED_ENGINE
        .decode(standard.as_bytes())
        .map_err(|err| ScrambleError::from(seed_format_error(err)))
}

/// Canonical unpadded base64url form of `bytes`.
pub fn encode_seed(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn seed_format_error(err: DecodeError) -> SeedFormatError {
    match err {
        DecodeError::InvalidByte(offset, byte) | DecodeError::InvalidLastSymbol(offset, byte) => {
            SeedFormatError::InvalidCharacter { offset, byte }
        }
        DecodeError::InvalidLength(length) => SeedFormatError::BadLength { length },
        _ => SeedFormatError::InvalidPadding,
    }
}
