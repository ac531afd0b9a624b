//! Contains the Color value and the Palette, the ordered sequence of
//! display colors that escape counts are mapped through.  The palette
//! is built once from a seeded generator before any tile work begins
//! and is read concurrently by every worker afterwards.

use num::clamp;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// An RGBA color.  Packs to and from a single u32 so it can live in
/// the image buffer's atomic cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Packs the four channels into a u32, red in the low byte.
    pub fn pack(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    /// Unpacks a u32 produced by `pack`.
    pub fn unpack(word: u32) -> Color {
        let [r, g, b, a] = word.to_le_bytes();
        Color { r, g, b, a }
    }
}

/// An immutable, ordered sequence of colors.  Its length doubles as
/// the maximum escape iteration count: an orbit iterated `len()`
/// times without escaping lands on the last color.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Generates `count` uniformly random opaque colors.  A seed of 0
    /// selects an entropy-seeded generator, so every palette (and
    /// hence every image) differs; any other seed makes the palette
    /// fully reproducible.  The generator is local to this call;
    /// there is no process-wide RNG state.
    pub fn new(count: usize, seed: u64) -> Palette {
        let mut rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed)
        };
        let channel = Uniform::new_inclusive(0u8, 255u8);
        let colors = (0..count)
            .map(|_| Color {
                r: channel.sample(&mut rng),
                g: channel.sample(&mut rng),
                b: channel.sample(&mut rng),
                a: 255,
            })
            .collect();
        Palette { colors }
    }

    /// The number of colors, which is also the iteration bound.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Describes that the palette holds no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Maps an escape count in [1, len()] to its color.  A count of 1
    /// (instant escape) takes the first color; a count of len()
    /// (never escaped within the bound) takes the last.  The count is
    /// clamped so an index out of that range can never read out of
    /// bounds.
    pub fn color(&self, iterations: usize) -> Color {
        self.colors[clamp(iterations, 1, self.colors.len()) - 1]
    }
}
