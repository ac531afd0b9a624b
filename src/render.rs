// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Renderer, which ties the pieces together: it
//! partitions the image into tiles, streams them over a closing work
//! channel to a pool of worker threads, and blocks on the completion
//! barrier until the shared buffer is fully painted.

use crossbeam::channel;
use itertools::iproduct;
use log::{debug, trace};
use std::cmp::max;

use crate::barrier::CompletionBarrier;
use crate::buffer::ImageBuffer;
use crate::error::RenderError;
use crate::escape::escape_time;
use crate::palette::Palette;
use crate::tiles::{self, Tile, TILE_HEIGHT, TILE_WIDTH};

/// A validated render configuration: image dimensions, the palette
/// (whose length is the iteration bound), and the complex-plane
/// scale.  Construction fails fast on a degenerate configuration, so
/// a Renderer in hand always produces a fully populated image.
pub struct Renderer {
    width: usize,
    height: usize,
    palette: Palette,
    scale: f32,
}

impl Renderer {
    /// Validates the configuration and builds the palette.  `zoom` is
    /// a magnification factor and is inverted here into the scale
    /// applied when mapping pixels onto the complex plane.  A seed of
    /// 0 yields a different palette every call; any other seed makes
    /// the output byte-for-byte reproducible.
    pub fn new(
        width: usize,
        height: usize,
        color_count: usize,
        zoom: f32,
        seed: u64,
    ) -> Result<Renderer, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimension { width, height });
        }
        if color_count == 0 {
            return Err(RenderError::InvalidColorCount { count: color_count });
        }
        Ok(Renderer {
            width,
            height,
            palette: Palette::new(color_count, seed),
            scale: 1.0 / zoom,
        })
    }

    /// The palette the renderer colors with.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Renders the image on a pool of `workers` threads (at least
    /// one).  The work queue is a zero-capacity channel: the
    /// dispatcher hands each tile directly to whichever worker is
    /// free next and blocks while all of them are busy.  Dropping the
    /// sender after the last tile is what closes the queue; workers
    /// drain it and exit.  The barrier is registered with the exact
    /// tile total before anything is dispatched, and its release is
    /// the only thing that lets this function return.
    pub fn render(&self, workers: usize) -> ImageBuffer {
        let workers = max(workers, 1);
        let tiles = tiles::partition(self.width, self.height, TILE_WIDTH, TILE_HEIGHT);
        let barrier = CompletionBarrier::new(tiles.len());
        let buffer = ImageBuffer::new(self.width, self.height);
        let (sender, receiver) = channel::bounded(0);

        crossbeam::scope(|spawner| {
            for _ in 0..workers {
                let receiver = receiver.clone();
                let buffer = &buffer;
                let barrier = &barrier;
                let renderer = self;
                spawner.spawn(move |_| {
                    for tile in receiver.iter() {
                        renderer.paint(&tile, buffer);
                        barrier.complete_one();
                    }
                });
            }

            spawner.spawn(move |_| {
                for tile in tiles {
                    trace!("dispatching {:?}", tile);
                    sender.send(tile).unwrap();
                }
                debug!("all tiles dispatched, closing work queue");
            });

            barrier.wait();
        })
        .unwrap();

        buffer
    }

    /// Paints every pixel of one tile.  The tile is this worker's
    /// exclusive region of the buffer, so the stores below never
    /// collide with another worker's.
    fn paint(&self, tile: &Tile, buffer: &ImageBuffer) {
        for (py, px) in iproduct!(tile.y1..tile.y2, tile.x1..tile.x2) {
            let count = escape_time(px, py, self.width, self.height, self.scale, self.palette.len());
            buffer.set(px, py, self.palette.color(count));
        }
    }
}

/// Renders a width×height Mandelbrot image with a `color_count`-color
/// palette, on as many workers as the machine has logical CPUs.  This
/// is the primary entry point; see `Renderer` for the pieces.
pub fn render(
    width: usize,
    height: usize,
    color_count: usize,
    zoom: f32,
    seed: u64,
) -> Result<ImageBuffer, RenderError> {
    let renderer = Renderer::new(width, height, color_count, zoom, seed)?;
    Ok(renderer.render(num_cpus::get()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_fails_before_any_work() {
        assert_eq!(
            Renderer::new(0, 100, 16, 1.0, 42).err(),
            Some(RenderError::InvalidDimension {
                width: 0,
                height: 100
            })
        );
    }

    #[test]
    fn zero_height_fails_before_any_work() {
        assert_eq!(
            Renderer::new(100, 0, 16, 1.0, 42).err(),
            Some(RenderError::InvalidDimension {
                width: 100,
                height: 0
            })
        );
    }

    #[test]
    fn zero_color_count_fails_before_any_work() {
        assert_eq!(
            Renderer::new(100, 100, 0, 1.0, 42).err(),
            Some(RenderError::InvalidColorCount { count: 0 })
        );
    }

    #[test]
    fn every_pixel_is_painted() {
        // Palette colors are always opaque, and a fresh buffer is
        // transparent, so alpha doubles as a written-pixel marker.
        let buffer = render(100, 100, 16, 1.0, 42).unwrap();
        for y in 0..100 {
            for x in 0..100 {
                assert_eq!(buffer.get(x, y).a, 255, "pixel ({}, {}) unpainted", x, y);
            }
        }
    }

    #[test]
    fn seeded_renders_are_byte_identical() {
        let first = render(100, 100, 16, 1.0, 42).unwrap().into_raw();
        let second = render(100, 100, 16, 1.0, 42).unwrap().into_raw();
        assert_eq!(first, second);
    }

    #[test]
    fn center_reaches_the_bound_and_corner_escapes_at_once() {
        let renderer = Renderer::new(100, 100, 16, 1.0, 42).unwrap();
        let buffer = renderer.render(4);
        // (50,50) maps near the origin of the set's frame and never
        // escapes; (0,0) maps to c = (-2.5, -1.0) and escapes on the
        // first iteration.
        assert_eq!(buffer.get(50, 50), renderer.palette().color(16));
        assert_eq!(buffer.get(0, 0), renderer.palette().color(1));
    }

    #[test]
    fn single_worker_matches_a_full_pool() {
        let renderer = Renderer::new(120, 90, 8, 1.0, 7).unwrap();
        let serial = renderer.render(1).into_raw();
        let parallel = renderer.render(8).into_raw();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn zero_workers_is_bumped_to_one() {
        let renderer = Renderer::new(50, 50, 4, 1.0, 3).unwrap();
        let buffer = renderer.render(0);
        assert_eq!(buffer.get(25, 25).a, 255);
    }

    #[test]
    fn image_smaller_than_one_tile_renders() {
        let buffer = render(10, 10, 4, 1.0, 5).unwrap();
        assert_eq!(buffer.len(), 100);
        assert_eq!(buffer.get(9, 9).a, 255);
    }
}
