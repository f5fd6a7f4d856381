//! Pixel-space geometry.

pub use kurbo::{Circle, Line, Point};

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The larger of the two dimensions.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Clamp both dimensions to at least one pixel.
    pub fn at_least_one(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1))
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_helpers() {
        let size = Size::new(120, 48);
        assert!(!size.is_empty());
        assert_eq!(size.max_dimension(), 120);
        assert_eq!(size.area(), 5760);
        assert!(Size::new(0, 10).is_empty());
        assert_eq!(Size::new(0, 0).at_least_one(), Size::new(1, 1));
    }
}
