use alloc::vec::Vec;
use serde::Serialize;

use crate::error::ScrambleError;
use crate::permutation::{TileGrid, TilePermutation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileMove {
    pub tile: u32,
    pub from: TileRect,
    pub to: TileRect,
}

/// Pixel geometry of a tile grid laid over an image. Tiles are whole-pixel,
/// row-major; the strips right of the last column and below the last row are
/// not part of any tile and never move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileLayout {
    width: u32,
    height: u32,
    grid: TileGrid,
    tile_width: u32,
    tile_height: u32,
}

impl TileLayout {
    pub fn new(width: u32, height: u32, grid: TileGrid) -> Result<Self, ScrambleError> {
        let tile_width = width / grid.cols();
        let tile_height = height / grid.rows();
        if tile_width == 0 || tile_height == 0 {
            return Err(ScrambleError::ImageTooSmall {
                width,
                height,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }

        Ok(Self {
            width,
            height,
            grid,
            tile_width,
            tile_height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn tile_rect(&self, index: usize) -> Option<TileRect> {
        (index < self.grid.tile_count()).then(|| self.rect_unchecked(index))
    }

    /// Copies that rebuild the original image from a scrambled one: original
    /// tile `k` is read from its scrambled position and written back at `k`.
    pub fn unscramble_plan(
        &self,
        permutation: &TilePermutation,
    ) -> Result<Vec<TileMove>, ScrambleError> {
        permutation.check_len(self.grid.tile_count())?;

        Ok(permutation
            .permutation()
            .iter()
            .enumerate()
            .map(|(original, &position)| TileMove {
                tile: original as u32,
                from: self.rect_unchecked(position as usize),
                to: self.rect_unchecked(original),
            })
            .collect())
    }

    /// Copies that produce the scrambled image, the reverse of
    /// [`TileLayout::unscramble_plan`].
    pub fn scramble_plan(
        &self,
        permutation: &TilePermutation,
    ) -> Result<Vec<TileMove>, ScrambleError> {
        Ok(self
            .unscramble_plan(permutation)?
            .into_iter()
            .map(|step| TileMove {
                tile: step.tile,
                from: step.to,
                to: step.from,
            })
            .collect())
    }

    fn rect_unchecked(&self, index: usize) -> TileRect {
        let cols = self.grid.cols() as usize;
        TileRect {
            x: (index % cols) as u32 * self.tile_width,
            y: (index / cols) as u32 * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }

    fn buffer_len(&self, bytes_per_pixel: usize) -> Result<usize, ScrambleError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(bytes_per_pixel))
            .ok_or(ScrambleError::ImageTooLarge {
                width: self.width,
                height: self.height,
                bytes_per_pixel,
            })
    }
}

/// Rebuild the original image from a tightly packed, row-major scrambled
/// buffer.
pub fn unscramble_pixels(
    pixels: &[u8],
    bytes_per_pixel: usize,
    layout: &TileLayout,
    permutation: &TilePermutation,
) -> Result<Vec<u8>, ScrambleError> {
    let moves = layout.unscramble_plan(permutation)?;
    apply_moves(pixels, bytes_per_pixel, layout, &moves)
}

pub fn scramble_pixels(
    pixels: &[u8],
    bytes_per_pixel: usize,
    layout: &TileLayout,
    permutation: &TilePermutation,
) -> Result<Vec<u8>, ScrambleError> {
    let moves = layout.scramble_plan(permutation)?;
    apply_moves(pixels, bytes_per_pixel, layout, &moves)
}

fn apply_moves(
    pixels: &[u8],
    bytes_per_pixel: usize,
    layout: &TileLayout,
    moves: &[TileMove],
) -> Result<Vec<u8>, ScrambleError> {
    let expected = layout.buffer_len(bytes_per_pixel)?;
    if pixels.len() != expected {
        return Err(ScrambleError::PixelBufferMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    // Start from the source so the uncovered edge strips carry over.
    let mut out = pixels.to_vec();
    let stride = layout.width as usize * bytes_per_pixel;
    let row_len = layout.tile_width as usize * bytes_per_pixel;

    let offset = |rect: &TileRect, line: usize| {
        (rect.y as usize + line) * stride + rect.x as usize * bytes_per_pixel
    };

    for step in moves {
        for line in 0..layout.tile_height as usize {
            let src = offset(&step.from, line);
            let dst = offset(&step.to, line);
            out[dst..dst + row_len].copy_from_slice(&pixels[src..src + row_len]);
        }
    }

    Ok(out)
}
