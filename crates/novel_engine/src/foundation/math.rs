//! Math types for 2D screen-space work
//!
//! Thin aliases over `nalgebra` so the rest of the engine reads in screen
//! coordinates (origin top-left, +Y down, pixels).

/// 2D vector in pixels
pub type Vec2 = nalgebra::Vector2<f32>;

/// Linearly interpolate between two points
pub fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from + (to - from) * t
}

/// Axis-aligned rectangle (position = top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner in pixels
    pub position: Vec2,
    /// Width and height in pixels
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from corner coordinates and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Right edge X coordinate
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    /// Bottom edge Y coordinate
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, 50.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(120.0, 530.0, 1040.0, 150.0);
        assert_eq!(r.right(), 1160.0);
        assert_eq!(r.bottom(), 680.0);
    }
}
