// style.rs
use bevy::prelude::*;

// Outline widths in logical pixels
pub const STROKE_WEIGHT: f32 = 2.0;
pub const HAIRLINE_WEIGHT: f32 = 1.0;

fn correct_color() -> Color {
    Color::srgb_u8(0x16, 0xa3, 0x4a)
}

fn incorrect_color() -> Color {
    Color::srgb_u8(0xef, 0x44, 0x44)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub stroke_color: Color,
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
    pub fill_color: Color,
    pub fill_opacity: f32,
}

impl PolygonStyle {
    // Only shown during play with debug outlines on
    pub fn base() -> Self {
        Self {
            stroke_color: Color::srgb_u8(0x22, 0xd3, 0xee),
            stroke_weight: STROKE_WEIGHT,
            stroke_opacity: 0.6,
            fill_color: Color::srgb_u8(0x22, 0xd3, 0xee),
            fill_opacity: 0.0,
        }
    }

    pub fn debug() -> Self {
        Self {
            stroke_color: Color::srgb_u8(0x94, 0xa3, 0xb8),
            stroke_weight: HAIRLINE_WEIGHT,
            stroke_opacity: 0.9,
            fill_color: Color::srgb_u8(0x15, 0x5f, 0xb9),
            fill_opacity: 0.12,
        }
    }

    pub fn verdict(correct: bool) -> Self {
        let color = if correct {
            correct_color()
        } else {
            incorrect_color()
        };
        Self {
            stroke_color: color,
            stroke_opacity: 0.9,
            fill_color: color,
            fill_opacity: 0.25,
            ..Self::base()
        }
    }

    pub fn stroke(&self) -> Color {
        self.stroke_color.with_alpha(self.stroke_opacity)
    }

    pub fn fill(&self) -> Color {
        self.fill_color.with_alpha(self.fill_opacity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub fill_color: Color,
    pub fill_opacity: f32,
    pub stroke_color: Color,
    pub stroke_weight: f32,
}

impl MarkerStyle {
    pub fn verdict(correct: bool) -> Self {
        Self {
            radius: 8.0,
            fill_color: if correct {
                correct_color()
            } else {
                incorrect_color()
            },
            fill_opacity: 0.9,
            stroke_color: Color::srgb_u8(0x0b, 0x12, 0x21),
            stroke_weight: STROKE_WEIGHT,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill_color.with_alpha(self.fill_opacity)
    }
}
