//! # Sign
//!
//! The floating "BLOXD PLAYERS" sign. Each lit pixel of a 5x5 glyph becomes a
//! small cube that the pick resolver treats as a special target. The cubes are
//! never stored as blocks, so they are neither solid nor editable.

use cgmath::Point3;

use super::interaction::pick::SpecialTarget;

/// Edge length of one glyph cube.
pub const GLYPH_CUBE_EDGE: f32 = 0.8;

/// Depth at which both lines of the sign float.
pub const SIGN_Z: f32 = -25.0;

/// One line of text on the sign.
struct SignLine {
    text: &'static str,
    start_x: f32,
    letter_stride: f32,
    top_y: f32,
}

const LINES: [SignLine; 2] = [
    SignLine {
        text: "BLOXD",
        start_x: -12.0,
        letter_stride: 6.0,
        top_y: 16.0,
    },
    SignLine {
        text: "PLAYERS",
        start_x: -16.0,
        letter_stride: 5.0,
        top_y: 10.0,
    },
];

/// Rows top to bottom; bit 4 is the leftmost column.
fn glyph(letter: char) -> Option<[u8; 5]> {
    let rows = match letter {
        'A' => [0b01110, 0b10001, 0b11111, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b11110, 0b10001, 0b11110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b11110, 0b10000, 0b11111],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b11110, 0b10100, 0b10010],
        'S' => [0b01111, 0b10000, 0b01110, 0b00001, 0b11110],
        'X' => [0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'Y' => [0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        _ => return None,
    };
    Some(rows)
}

/// Centers of every glyph cube on the sign.
pub fn glyph_cube_centers() -> Vec<Point3<f32>> {
    let mut centers = Vec::new();
    for line in &LINES {
        for (index, letter) in line.text.chars().enumerate() {
            let Some(rows) = glyph(letter) else {
                log::warn!("No glyph for {:?}, leaving a gap", letter);
                continue;
            };
            let letter_x = line.start_x + index as f32 * line.letter_stride;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..5 {
                    if bits & (0b10000 >> col) != 0 {
                        centers.push(Point3::new(
                            letter_x + col as f32 * GLYPH_CUBE_EDGE,
                            line.top_y - row as f32 * GLYPH_CUBE_EDGE,
                            SIGN_Z,
                        ));
                    }
                }
            }
        }
    }
    centers
}

/// The sign as pickable special targets.
pub fn sign_targets() -> Vec<SpecialTarget> {
    glyph_cube_centers()
        .into_iter()
        .map(|center| SpecialTarget::cube(center, GLYPH_CUBE_EDGE))
        .collect()
}
