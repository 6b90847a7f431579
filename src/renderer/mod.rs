//! Rendering interface
//!
//! The simulation never draws. Each frame the drawing backend asks for a display
//! list of screen-space primitives (camera offset already applied) and paints it
//! however it likes: canvas, GPU, terminal.

pub mod shapes;

use glam::Vec2;

pub use shapes::build_frame;

/// Straight RGBA, components in 0..=1
pub type Color = [f32; 4];

/// One screen-space drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled axis-aligned rectangle (top-left corner and size)
    Rect { pos: Vec2, size: Vec2, color: Color },
    /// Filled triangle
    Triangle { points: [Vec2; 3], color: Color },
    /// Stroked line segment
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Stroked circle outline
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
}

/// Convert 0xRRGGBB to an opaque color
pub const fn rgb(hex: u32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    pub const BACKGROUND_LEVEL_1: Color = rgb(0x87CEEB);
    pub const BACKGROUND_LEVEL_2: Color = rgb(0xFF8C42);
    pub const BACKGROUND_LEVEL_3: Color = rgb(0x2C1E4A);
    pub const PLATFORM: Color = rgb(0x555555);
    /// Player at full health
    pub const PLAYER_HEALTHY: Color = rgb(0xADD8E6);
    /// Player after one hit
    pub const PLAYER_HURT: Color = rgb(0x00008B);
    /// Player on its last point of health
    pub const PLAYER_CRITICAL: Color = rgb(0xFF0000);
    pub const PLAYER_EYE: Color = rgb(0xFFFFFF);
    pub const ENEMY: Color = rgb(0xFF0000);
    pub const LIGHTNING: [Color; 2] = [rgb(0x00FF00), rgb(0xCCFF00)];
    pub const FIREBALL: [Color; 2] = [rgb(0xFF4500), rgb(0xFF0000)];
    pub const IMPACT: Color = rgb(0xFFFFFF);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
        assert!((colors::PLATFORM[0] - 0x55 as f32 / 255.0).abs() < 1e-6);
    }
}
