//! 5x7 bitmap font
//!
//! Covers printable ASCII from space (32) to underscore (95). Each glyph is
//! five column bytes; bit `n` of a column is glyph row `n`, LSB on top.
//! Everything outside the table renders as a space.

use crate::bounds::centered_start;
use crate::surface::MatrixSurface;

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;

/// Horizontal cursor advance per character (glyph plus one blank column)
pub const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 95;

#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 64] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
];

/// Glyph columns for `c`
pub fn glyph(c: char) -> &'static [u8; 5] {
    let code = u32::from(c);
    if !(FIRST_CHAR..=LAST_CHAR).contains(&code) {
        return &FONT_5X7[0];
    }
    &FONT_5X7[(code - FIRST_CHAR) as usize]
}

/// Rendered width of `text` in pixels, including the trailing spacing column
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn measure(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE
}

/// Draw a single glyph with its top-left corner at (`x`, `y`)
pub fn draw_char<const W: usize>(surface: &mut MatrixSurface<W>, x: i32, y: i32, c: char) {
    for (col, bits) in (0..).zip(glyph(c)) {
        for row in 0..GLYPH_HEIGHT {
            let on = bits & (1 << row) != 0;
            surface.set(y + row, x + col, on);
        }
    }
}

/// Draw `text` starting at (`x`, `y`); pixels off the surface are dropped
pub fn draw<const W: usize>(surface: &mut MatrixSurface<W>, x: i32, y: i32, text: &str) {
    let mut cursor = x;
    for c in text.chars() {
        draw_char(surface, cursor, y, c);
        cursor += GLYPH_ADVANCE;
    }
}

/// Clear the surface and draw `text` horizontally centered on the top row
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn draw_centered<const W: usize>(surface: &mut MatrixSurface<W>, text: &str) {
    let x = centered_start(W as i32, measure(text));
    surface.clear();
    draw(surface, x, 0, text);
}
