// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the ImageBuffer, the one mutable resource shared by the
//! worker pool.  Each pixel is a packed-RGBA atomic cell, so workers
//! holding a plain shared reference can write their tiles without a
//! lock.  Safety rests on the partition invariant: tiles are pairwise
//! disjoint, so no cell is ever stored to by two workers.  Relaxed
//! ordering suffices for the stores; the completion barrier's mutex
//! publishes them to the caller before the buffer is read.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::palette::Color;

/// A width×height grid of RGBA pixels, writable through a shared
/// reference.  Created once per render, fully painted by the worker
/// pool, then handed to the caller.
pub struct ImageBuffer {
    width: usize,
    height: usize,
    pixels: Vec<AtomicU32>,
}

impl ImageBuffer {
    /// Allocates a buffer of transparent black pixels.
    pub fn new(width: usize, height: usize) -> ImageBuffer {
        ImageBuffer {
            width,
            height,
            pixels: (0..width * height).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Describes that the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Stores a color at (x, y).  Callers must stay inside their own
    /// tile; disjointness is what makes the lock-free write sound.
    pub fn set(&self, x: usize, y: usize, color: Color) {
        self.pixels[y * self.width + x].store(color.pack(), Ordering::Relaxed);
    }

    /// Loads the color at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Color {
        Color::unpack(self.pixels[y * self.width + x].load(Ordering::Relaxed))
    }

    /// Consumes the buffer and returns the raw RGBA bytes in row-major
    /// order, four bytes per pixel, suitable for an image encoder.
    pub fn into_raw(self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for cell in self.pixels {
            raw.extend_from_slice(&cell.into_inner().to_le_bytes());
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_transparent_black() {
        let buffer = ImageBuffer::new(4, 3);
        assert_eq!(buffer.len(), 12);
        assert_eq!(
            buffer.get(3, 2),
            Color {
                r: 0,
                g: 0,
                b: 0,
                a: 0
            }
        );
    }

    #[test]
    fn set_then_get_round_trips() {
        let buffer = ImageBuffer::new(4, 3);
        let color = Color {
            r: 10,
            g: 20,
            b: 30,
            a: 255,
        };
        buffer.set(2, 1, color);
        assert_eq!(buffer.get(2, 1), color);
        assert_eq!(buffer.get(1, 2).a, 0);
    }

    #[test]
    fn into_raw_is_row_major_rgba() {
        let buffer = ImageBuffer::new(2, 2);
        buffer.set(
            1,
            0,
            Color {
                r: 9,
                g: 8,
                b: 7,
                a: 255,
            },
        );
        let raw = buffer.into_raw();
        assert_eq!(raw.len(), 16);
        assert_eq!(&raw[4..8], &[9, 8, 7, 255]);
        assert_eq!(&raw[0..4], &[0, 0, 0, 0]);
    }
}
