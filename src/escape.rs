// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the escape-time evaluator, the pure numeric core of the
//! renderer.  A pixel is mapped onto the complex plane, and the point
//! is iterated under z ← z² + c until its orbit leaves the circle of
//! radius 2 or the iteration bound is reached.

use num::Complex;

/// Returns the escape time of the pixel at (px, py) within a
/// width×height image viewed at the given scale (the inverse of the
/// zoom factor): the number of z ← z² + c iterations applied before
/// |z|² reached 4, or `limit` if the orbit never escaped within the
/// bound.  Always in [1, limit] for a positive limit; a point that
/// escapes instantly reports 1, and a bounded orbit reports exactly
/// `limit` — the same value as an orbit escaping on the last allowed
/// iteration.
///
/// The horizontal axis spans real −2.5 to 1.0 and the vertical axis
/// imaginary −1.0 to 1.0 (before scaling), framing the whole set.
/// The squared-magnitude test avoids a square root, and f32 is
/// plenty for display-resolution imagery.
pub fn escape_time(
    px: usize,
    py: usize,
    width: usize,
    height: usize,
    scale: f32,
    limit: usize,
) -> usize {
    let c = Complex::new(
        scale * (3.5 * (px as f32) / (width as f32) - 2.5),
        scale * (2.0 * (py as f32) / (height as f32) - 1.0),
    );
    let mut z: Complex<f32> = Complex::new(0.0, 0.0);
    let mut count = 0;
    while z.norm_sqr() < 4.0 && count < limit {
        z = z * z + c;
        count += 1;
    }
    count
}
