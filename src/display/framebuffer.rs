// RGBA frame assembly from the engine's color-index output

use super::palette::color_index_to_rgba;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// An RGBA frame ready for presentation
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT * 4],
        }
    }

    /// Convert a 256x240 color-index frame into RGBA
    pub fn update(&mut self, indices: &[u8]) {
        for (pixel, &index) in self.pixels.chunks_exact_mut(4).zip(indices.iter()) {
            pixel.copy_from_slice(&color_index_to_rgba(index));
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
