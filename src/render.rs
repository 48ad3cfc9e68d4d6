//! Pixel-doubling and edge-smoothing bit math
//!
//! Double-size text expands every glyph pixel into a 2x2 block. A source
//! column of up to 16 vertical pixels (two pages) is [`stretch`]ed into a
//! 32-bit doubled column, which the renderer then emits twice, once for the
//! left and once for the right half of the doubled pixel.
//!
//! Smoothed rendering additionally inspects each pair of adjacent source
//! columns: wherever a set bit meets a clear bit diagonally, [`smooth_pair`]
//! raises one extra pixel on each side of the boundary, turning the doubled
//! staircase into an anti-aliased diagonal.

/// Expand a 16-bit source column into its 32-bit doubled column
///
/// Bits spread across byte, nibble, 2-bit and 1-bit boundaries, then the
/// result is ORed with itself shifted one, duplicating every source bit
/// into an adjacent pair. Source bit `n` lands in bits `2n` and `2n + 1`.
///
/// # Example
///
/// ```
/// use ssd1306_text::render::stretch;
///
/// // Bit 7 of the source lands in bits 14 and 15.
/// assert_eq!(stretch(0b1011_0000) & 0xFFFF, 0b1100_1111_0000_0000);
/// ```
pub fn stretch(column: u16) -> u32 {
    let mut x = column as u32;
    x = (x & 0xFF00) << 8 | (x & 0x00FF);
    x = (x << 4 | x) & 0x0F0F_0F0F;
    x = (x << 2 | x) & 0x3333_3333;
    x = (x << 1 | x) & 0x5555_5555;
    x | x << 1
}

/// Add smoothing pixels between two adjacent doubled columns
///
/// `left` is the doubled right half of the earlier source column `col0`,
/// `right` the doubled left half of the later source column `col1`. For
/// every 2-bit window where the columns hold complementary diagonal
/// patterns (01 next to 10, or 10 next to 01), one pixel is raised on each
/// side of the column boundary.
pub fn smooth_pair(col0: u16, col1: u16, left: &mut u32, right: &mut u32) {
    for window in 0..15u32 {
        for j in 1..=2u32 {
            let pattern0 = (col0 as u32 >> window) & 0b11;
            let pattern1 = (col1 as u32 >> window) & 0b11;
            if pattern0 == 3 - j && pattern1 == j {
                *left |= 1 << (2 * window + j);
                *right |= 1 << (2 * window + 3 - j);
            }
        }
    }
}
