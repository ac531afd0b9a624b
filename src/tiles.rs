// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Tile struct, a half-open rectangular region of the
//! output image, and the partitioner that cuts a width×height pixel
//! grid into a sequence of tiles covering the whole grid with no gaps
//! and no overlaps.

use itertools::iproduct;
use log::debug;
use std::cmp::min;

/// The width, in pixels, of a standard work tile.
pub const TILE_WIDTH: usize = 48;

/// The height, in pixels, of a standard work tile.
pub const TILE_HEIGHT: usize = 48;

/// A rectangular region of the image, [x1, x2) × [y1, y2).  Tiles are
/// the unit of work handed to the worker pool: each tile is produced
/// once by the partitioner and consumed by exactly one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Left edge, inclusive.
    pub x1: usize,
    /// Right edge, exclusive.
    pub x2: usize,
    /// Top edge, inclusive.
    pub y1: usize,
    /// Bottom edge, exclusive.
    pub y2: usize,
}

impl Tile {
    /// The width of the tile in pixels.
    pub fn width(&self) -> usize {
        self.x2 - self.x1
    }

    /// The height of the tile in pixels.
    pub fn height(&self) -> usize {
        self.y2 - self.y1
    }

    /// The number of pixels inside the tile.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Describes that the tile contains no pixels.  The partitioner
    /// never produces such a tile.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the pixel at (x, y) falls inside the tile.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }
}

/// Cuts the width×height pixel grid into tiles of at most
/// tile_width×tile_height pixels, scanning in row-major order over
/// tile origins.  Tiles on the right and bottom edges are clamped to
/// the image bounds, so the sequence covers the grid exactly even
/// when the dimensions are not multiples of the tile size.  A 0×0
/// grid produces no tiles.
pub fn partition(width: usize, height: usize, tile_width: usize, tile_height: usize) -> Vec<Tile> {
    assert!(tile_width > 0 && tile_height > 0);
    let tiles: Vec<Tile> = iproduct!(
        (0..height).step_by(tile_height),
        (0..width).step_by(tile_width)
    )
    .map(|(y, x)| Tile {
        x1: x,
        x2: min(x + tile_width, width),
        y1: y,
        y2: min(y + tile_height, height),
    })
    .collect();
    debug!(
        "partitioned {}x{} image into {} tiles",
        width,
        height,
        tiles.len()
    );
    tiles
}
