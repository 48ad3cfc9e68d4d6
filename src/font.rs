//! Font descriptors and glyph resolution
//!
//! A [`Font`] is an immutable, compiled-in resource: a page-packed bitmap
//! blob plus the metadata needed to locate one character's glyph inside it.
//! The driver never owns or mutates font data; it holds `&'static`
//! references bound through the `set_font` family on
//! [`Display`](crate::display::Display).
//!
//! ## Bitmap layout
//!
//! Glyphs are stored column-major within page rows: a glyph of width `w`
//! and height `h` pages occupies `w * h` bytes, the `w` bytes of its top
//! page row first, then the next row, top to bottom. Each byte is one
//! 8-pixel column slice, LSB at the top.
//!
//! ## Proportional fonts
//!
//! A `width` of 0 marks a proportional font: per-character pixel widths
//! come from the `widths` table, and glyph offsets are accumulated widths.
//! To keep lookups cheap without a full prefix-sum table, `block_widths`
//! holds the summed width of each complete 16-character block; resolving
//! an offset adds whole block sums and scans at most 15 widths.
//!
//! ## Unicode coverage
//!
//! A [`UnicodeFont`] stitches sub-fonts over non-contiguous Unicode blocks.
//! Blocks are not really bits 8..=15 of a codepoint, but this driver keeps
//! its ancestor's pretense that they are: a codepoint splits into
//! (plane, block, offset) bytes and each [`UnicodeFontRef`] claims one
//! (plane, block) pair.

/// An immutable font resource
///
/// Field layout is public so fonts can be declared as `const` data.
#[derive(Debug)]
pub struct Font {
    /// Page-packed glyph bitmap data
    pub bitmap: &'static [u8],
    /// Character width in pixels; 0 marks a proportional font
    pub width: u8,
    /// Character height in pages (8 vertical pixels each)
    pub height: u8,
    /// First character code covered
    pub first: u8,
    /// Last character code covered
    pub last: u8,
    /// Summed pixel widths of each complete 16-character block, one entry
    /// per block (proportional fonts only, empty otherwise)
    pub block_widths: &'static [u16],
    /// Per-character pixel widths (proportional fonts only, empty otherwise)
    pub widths: &'static [u8],
    /// Blank columns of pixels written between characters
    pub spacing: u8,
}

impl Font {
    /// Whether this font covers the given character code
    pub fn contains(&self, code: u8) -> bool {
        code >= self.first && code <= self.last
    }

    /// Pixel width of the given character's glyph
    ///
    /// Returns 0 for codes outside the font's range.
    pub fn glyph_width(&self, code: u8) -> u8 {
        if !self.contains(code) {
            return 0;
        }
        if self.width != 0 {
            return self.width;
        }
        let index = (code - self.first) as usize;
        self.widths.get(index).copied().unwrap_or(0)
    }

    /// Byte offset of the given character's glyph within the bitmap
    ///
    /// Returns 0 for codes outside the font's range; callers are expected
    /// to check [`contains`](Self::contains) first.
    pub fn glyph_offset(&self, code: u8) -> usize {
        if !self.contains(code) {
            return 0;
        }
        let index = (code - self.first) as usize;
        if self.width != 0 {
            return index * self.width as usize * self.height as usize;
        }
        // Whole 16-character blocks from the block table, then a linear
        // scan of the remainder.
        let blocks = index >> 4;
        let mut columns = 0usize;
        for block in self.block_widths.iter().take(blocks) {
            columns += *block as usize;
        }
        for i in (blocks << 4)..index {
            columns += self.widths.get(i).copied().unwrap_or(0) as usize;
        }
        columns * self.height as usize
    }

    /// Total pixel width of a string rendered in this font
    ///
    /// Sums glyph widths plus `spacing` per rendered character; characters
    /// outside the font's range contribute nothing, matching how the
    /// renderer drops them. Line breaks are not interpreted.
    pub fn text_width(&self, text: &str) -> u16 {
        let mut total: u16 = 0;
        for byte in text.bytes() {
            if self.contains(byte) {
                total += self.glyph_width(byte) as u16 + self.spacing as u16;
            }
        }
        total
    }
}

/// One Unicode block covered by a sub-font
#[derive(Debug)]
pub struct UnicodeFontRef {
    /// Unicode plane number (bits 16.. of the codepoint)
    pub plane: u8,
    /// Upper byte of the block (bits 8..=15 of the codepoint)
    pub block: u8,
    /// Glyphs within this block; `first`/`last` bound the low byte
    pub font: &'static Font,
}

/// An ordered set of sub-fonts covering multiple Unicode blocks
#[derive(Debug)]
pub struct UnicodeFont {
    /// Width of the space character, which the sub-fonts need not include
    pub space_width: u8,
    /// Sub-font references, scanned circularly from the last match
    pub fonts: &'static [UnicodeFontRef],
}

impl UnicodeFont {
    /// Find the sub-font covering `codepoint`, scanning circularly from
    /// `start` (the cached index of the last match, favoring runs of text
    /// from one block)
    ///
    /// Returns the matching index, or `None` when no sub-font covers the
    /// codepoint; unsupported codepoints are invisible, not errors.
    pub fn select(&self, codepoint: u32, start: usize) -> Option<usize> {
        let offset = (codepoint & 0xFF) as u8;
        let block = ((codepoint >> 8) & 0xFF) as u8;
        let plane = ((codepoint >> 16) & 0xFF) as u8;
        let count = self.fonts.len();
        for step in 0..count {
            let index = (start + step) % count;
            let entry = &self.fonts[index];
            if entry.plane == plane && entry.block == block && entry.font.contains(offset) {
                return Some(index);
            }
        }
        None
    }
}
