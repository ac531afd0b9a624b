#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled Mandelbrot renderer
//!
//! The Mandelbrot set is drawn by taking each pixel of the output
//! image as a point c on the complex plane and repeatedly squaring
//! and re-adding it, z ← z² + c, counting how many iterations it
//! takes for the orbit to fly off past radius 2.  That count, pushed
//! through a color palette, is the pixel's color; points whose orbits
//! never leave are the set's black heart and simply exhaust the
//! iteration budget.
//!
//! Every pixel is independent of every other, so the image is carved
//! into fixed-size rectangular tiles and the tiles are streamed over
//! a channel to a pool of worker threads, one per logical CPU.  The
//! tiles are disjoint and cover the image exactly, which lets all the
//! workers paint one shared buffer with no locking; a completion
//! barrier, primed with the tile count before the first tile is
//! dispatched, holds the caller back until the last tile lands.

pub mod barrier;
pub mod buffer;
pub mod error;
pub mod escape;
pub mod palette;
pub mod render;
pub mod tiles;

pub use crate::barrier::CompletionBarrier;
pub use crate::buffer::ImageBuffer;
pub use crate::error::RenderError;
pub use crate::escape::escape_time;
pub use crate::palette::{Color, Palette};
pub use crate::render::{render, Renderer};
pub use crate::tiles::{partition, Tile, TILE_HEIGHT, TILE_WIDTH};
