//! Error conditions for the renderer.  The numeric core is total, so
//! the only failures are configuration problems caught before any
//! tile is dispatched.

use failure::Fail;

/// A render request that cannot be started.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum RenderError {
    /// The image would have no pixels.
    #[fail(
        display = "invalid image dimensions {}x{}: width and height must be positive",
        width, height
    )]
    InvalidDimension {
        /// Requested image width.
        width: usize,
        /// Requested image height.
        height: usize,
    },

    /// The palette would have no colors, leaving no iteration bound.
    #[fail(
        display = "invalid color count {}: at least one palette color is required",
        count
    )]
    InvalidColorCount {
        /// Requested palette size.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = RenderError::InvalidDimension {
            width: 0,
            height: 600,
        };
        assert_eq!(
            err.to_string(),
            "invalid image dimensions 0x600: width and height must be positive"
        );
        let err = RenderError::InvalidColorCount { count: 0 };
        assert_eq!(
            err.to_string(),
            "invalid color count 0: at least one palette color is required"
        );
    }
}
