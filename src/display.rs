//! Core display operations
//!
//! [`Display`] owns the transport, the logical cursor, the active font
//! binding and the double-buffering frame selectors, and exposes the
//! controller's command set as typed operations. All state lives in this
//! struct; two displays on two buses are just two values.
//!
//! Text output is streaming: glyph bytes go straight to the controller's
//! framebuffer RAM, nothing is buffered host-side. The cursor `(x, y)` is
//! tracked in pixels and pages and is kept consistent with the controller's
//! auto-incrementing internal address by funneling every reposition through
//! [`set_cursor`](Display::set_cursor).

use log::{debug, trace};

use crate::command::{
    ACTIVATE_SCROLL, ADDRESSING_PAGE, ADDRESSING_VERTICAL, BLINK_MODE, CHARGE_PUMP,
    CHARGE_PUMP_OFF, COLUMN_ADDRESS, COLUMN_HIGH_NIBBLE, COLUMN_LOW_NIBBLE, COM_OUTPUT_DIRECTION,
    COM_PINS_CONFIGURATION, DEACTIVATE_SCROLL, DISPLAY_CLOCK, DISPLAY_OFF, DISPLAY_OFFSET,
    DISPLAY_ON, DISPLAY_START_LINE, ENTIRE_DISPLAY_ON, ENTIRE_DISPLAY_RESUME, FADE_AND_BLINK,
    FADE_OUT_MODE, INVERSE_DISPLAY, IREF_EXTERNAL, IREF_INTERNAL, IREF_INTERNAL_BRIGHT,
    IREF_SETTING, MEMORY_ADDRESSING_MODE, MULTIPLEX_RATIO, NOP, NORMAL_DISPLAY, PAGE_ADDRESS,
    PAGE_START, PAGE_START_FRAME_BIT, PRECHARGE_PERIOD, SCROLL_LEFT, SCROLL_LEFT_VERTICAL,
    SCROLL_RIGHT, SCROLL_RIGHT_VERTICAL, SEGMENT_REMAP, SET_CONTRAST, START_LINE_FRAME_BIT,
    VCOMH_DESELECT_LEVEL, VERTICAL_SCROLL_AREA, ZOOM_IN,
};
use crate::config::{Config, INIT_DEFAULTS};
use crate::decode::Utf8Decoder;
use crate::error::Error;
use crate::font::{Font, UnicodeFont};
use crate::interface::{DisplayInterface, Frame};
use crate::render::{smooth_pair, stretch};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Glyph rendering strategy, selected when a font is bound
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderSize {
    /// Glyphs rendered at their natural size
    #[default]
    Original,
    /// Every pixel expanded to a 2x2 block
    Double,
    /// Pixel-doubled with extra border pixels on diagonal edges
    DoubleSmooth,
}

/// The active font, if any
#[derive(Clone, Copy, Debug, Default)]
enum FontBinding {
    /// No font bound, text output is ignored
    #[default]
    None,
    /// Single font, input bytes are character codes
    Single(&'static Font),
    /// Unicode font set, input bytes are UTF-8; `cached` is the index of the
    /// sub-font that matched last
    Unicode {
        set: &'static UnicodeFont,
        cached: usize,
    },
}

/// Text-mode driver for an SSD1306 display
///
/// Generic over the [`DisplayInterface`] transport. Construct with a
/// [`Config`] (usually one of the panel presets), call
/// [`init`](Self::init) once, bind a font, and print.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Cursor column in pixels, 0..=width
    x: u8,
    /// Cursor row in pages
    y: u8,
    /// Page-start command byte carrying the render-frame selector bit
    render_frame: u8,
    /// Display-start-line command byte carrying the display-frame selector bit
    display_frame: u8,
    /// Active font binding
    font: FontBinding,
    /// Rendering strategy for the bound font
    size: RenderSize,
    /// UTF-8 accumulation state (Unicode bindings only)
    decoder: Utf8Decoder,
    /// Inter-character spacing override; `None` uses the font's own spacing
    spacing: Option<u8>,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            x: 0,
            y: 0,
            render_frame: PAGE_START,
            display_frame: DISPLAY_START_LINE,
            font: FontBinding::None,
            size: RenderSize::Original,
            decoder: Utf8Decoder::new(),
            spacing: None,
        }
    }

    /// Consume the display, returning the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Initialize the controller
    ///
    /// Brings up the bus, then sends the shared initialization defaults
    /// followed by the panel-specific sequence in a single command frame.
    /// The display stays off until [`on`](Self::on) is called.
    pub fn init(&mut self) -> DisplayResult<I> {
        self.interface.init().map_err(Error::Interface)?;
        let geometry = self.config.geometry;
        debug!(
            "initializing ssd1306 panel: {}x{} pages at offset ({}, {})",
            geometry.width, geometry.pages, geometry.x_offset, geometry.y_offset
        );
        let sequence = self.config.init_sequence;
        self.interface
            .frame_start(Frame::Command)
            .map_err(Error::Interface)?;
        for &byte in INIT_DEFAULTS {
            self.send_frame_byte(Frame::Command, byte)?;
        }
        for &byte in sequence {
            self.send_frame_byte(Frame::Command, byte)?;
        }
        self.interface.frame_end().map_err(Error::Interface)?;
        self.x = 0;
        self.y = 0;
        Ok(())
    }

    /// The configured panel width in pixels
    pub fn width(&self) -> u8 {
        self.config.geometry.width
    }

    /// The configured panel height in pages
    pub fn pages(&self) -> u8 {
        self.config.geometry.pages
    }

    // --- Command and data framing ---

    /// Write one payload byte, recovering from a refused write once
    ///
    /// On refusal the frame is closed, a new frame of the same kind opened,
    /// and the byte resent exactly once. A second refusal is dropped; only
    /// hard transport errors propagate.
    fn send_frame_byte(&mut self, frame: Frame, byte: u8) -> DisplayResult<I> {
        if !self.interface.write_byte(byte).map_err(Error::Interface)? {
            self.interface.frame_end().map_err(Error::Interface)?;
            self.interface.frame_start(frame).map_err(Error::Interface)?;
            self.interface.write_byte(byte).map_err(Error::Interface)?;
        }
        Ok(())
    }

    /// Send a command frame
    ///
    /// All controller register writes funnel through here.
    pub fn send_commands(&mut self, commands: &[u8]) -> DisplayResult<I> {
        self.interface
            .frame_start(Frame::Command)
            .map_err(Error::Interface)?;
        for &byte in commands {
            self.send_frame_byte(Frame::Command, byte)?;
        }
        self.interface.frame_end().map_err(Error::Interface)
    }

    /// Open a data frame for raw framebuffer streaming
    ///
    /// Bytes stream into controller RAM at the auto-incrementing internal
    /// address, starting wherever [`set_cursor`](Self::set_cursor) last
    /// positioned it. Raw streaming does not move the logical cursor.
    pub fn start_data(&mut self) -> DisplayResult<I> {
        self.interface
            .frame_start(Frame::Data)
            .map_err(Error::Interface)
    }

    /// Write one byte into the open data frame
    pub fn send_data(&mut self, byte: u8) -> DisplayResult<I> {
        self.send_frame_byte(Frame::Data, byte)
    }

    /// Write the same byte repeatedly into the open data frame
    pub fn repeat_data(&mut self, byte: u8, length: u8) -> DisplayResult<I> {
        for _ in 0..length {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Write zero bytes into the open data frame
    pub fn clear_data(&mut self, length: u8) -> DisplayResult<I> {
        self.repeat_data(0x00, length)
    }

    /// Close the open data frame
    pub fn end_data(&mut self) -> DisplayResult<I> {
        self.interface.frame_end().map_err(Error::Interface)
    }

    // --- Cursor ---

    /// Position the cursor at column `x` (pixels), row `y` (pages)
    ///
    /// Emits the page-start and column-address commands with the panel
    /// offsets and the render-frame selector applied, and records the
    /// logical position. This is the single source of truth for
    /// controller-side addressing.
    pub fn set_cursor(&mut self, x: u8, y: u8) -> DisplayResult<I> {
        let column = x.wrapping_add(self.config.geometry.x_offset);
        let page = y.wrapping_add(self.config.geometry.y_offset);
        let commands = [
            self.render_frame | (page & 0x07),
            COLUMN_HIGH_NIBBLE | (column >> 4),
            COLUMN_LOW_NIBBLE | (column & 0x0F),
        ];
        self.send_commands(&commands)?;
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// The logical cursor position as (column in pixels, row in pages)
    pub fn cursor(&self) -> (u8, u8) {
        (self.x, self.y)
    }

    /// Move to the start of the next text line
    ///
    /// Advances y by the effective glyph height (doubled sizes occupy twice
    /// the font's pages) and resets x to 0. A line that would overflow the
    /// panel is clamped to the last row that still fits a full glyph; text
    /// never scrolls or wraps past the bottom.
    pub fn new_line(&mut self) -> DisplayResult<I> {
        let height = self.effective_height();
        self.advance_line(height)
    }

    fn advance_line(&mut self, height: u8) -> DisplayResult<I> {
        let last = self.config.geometry.pages.saturating_sub(height);
        let y = core::cmp::min(self.y.saturating_add(height), last);
        self.set_cursor(0, y)
    }

    /// The page height one rendered glyph occupies
    fn effective_height(&self) -> u8 {
        let height = self.active_font().map_or(1, |font| font.height);
        match self.size {
            RenderSize::Original => height,
            RenderSize::Double | RenderSize::DoubleSmooth => height.saturating_mul(2),
        }
    }

    fn active_font(&self) -> Option<&'static Font> {
        match self.font {
            FontBinding::None => None,
            FontBinding::Single(font) => Some(font),
            FontBinding::Unicode { set, cached } => set
                .fonts
                .get(cached)
                .or_else(|| set.fonts.first())
                .map(|entry| entry.font),
        }
    }

    // --- Fills and bitmaps ---

    /// Fill the whole panel with the given page byte, leaving the cursor
    /// at (0, 0)
    pub fn fill(&mut self, byte: u8) -> DisplayResult<I> {
        for page in 0..self.config.geometry.pages {
            self.set_cursor(0, page)?;
            self.fill_to_eol(byte)?;
        }
        self.set_cursor(0, 0)
    }

    /// Clear the whole panel, leaving the cursor at (0, 0)
    pub fn clear(&mut self) -> DisplayResult<I> {
        self.fill(0x00)
    }

    /// Fill from the cursor to the end of the current line
    pub fn fill_to_eol(&mut self, byte: u8) -> DisplayResult<I> {
        let length = self.config.geometry.width.saturating_sub(self.x);
        self.fill_length(byte, length)
    }

    /// Clear from the cursor to the end of the current line
    pub fn clear_to_eol(&mut self) -> DisplayResult<I> {
        self.fill_to_eol(0x00)
    }

    /// Stream `length` copies of the given page byte, advancing the cursor
    pub fn fill_length(&mut self, byte: u8, length: u8) -> DisplayResult<I> {
        if length == 0 {
            return Ok(());
        }
        self.start_data()?;
        self.repeat_data(byte, length)?;
        self.end_data()?;
        self.x = core::cmp::min(self.x.saturating_add(length), self.config.geometry.width);
        Ok(())
    }

    /// Draw a page-packed bitmap into the rectangle from (`x0`, `y0`)
    /// inclusive to (`x1`, `y1`) exclusive, x in pixels and y in pages
    ///
    /// `data` holds `(x1 - x0)` bytes per page row, top row first; missing
    /// bytes render as blank. The cursor is left at (0, 0).
    pub fn bitmap(&mut self, x0: u8, y0: u8, x1: u8, y1: u8, data: &[u8]) -> DisplayResult<I> {
        let mut index = 0usize;
        for page in y0..y1 {
            self.set_cursor(x0, page)?;
            self.start_data()?;
            for _ in x0..x1 {
                let byte = data.get(index).copied().unwrap_or(0);
                index += 1;
                self.send_data(byte)?;
            }
            self.end_data()?;
        }
        self.set_cursor(0, 0)
    }

    // --- Font binding ---

    /// Bind a font for original-size rendering
    pub fn set_font(&mut self, font: &'static Font) {
        self.bind(FontBinding::Single(font), RenderSize::Original);
    }

    /// Bind a font for pixel-doubled rendering
    ///
    /// Supports fonts up to two pages tall; the doubled glyph occupies
    /// twice the font's pages.
    pub fn set_font_x2(&mut self, font: &'static Font) {
        self.bind(FontBinding::Single(font), RenderSize::Double);
    }

    /// Bind a font for pixel-doubled rendering with edge smoothing
    pub fn set_font_x2_smooth(&mut self, font: &'static Font) {
        self.bind(FontBinding::Single(font), RenderSize::DoubleSmooth);
    }

    /// Bind a Unicode font set; subsequent input bytes are decoded as UTF-8
    pub fn set_unicode_font(&mut self, set: &'static UnicodeFont) {
        self.bind(FontBinding::Unicode { set, cached: 0 }, RenderSize::Original);
    }

    /// Bind a Unicode font set for pixel-doubled rendering
    pub fn set_unicode_font_x2(&mut self, set: &'static UnicodeFont) {
        self.bind(FontBinding::Unicode { set, cached: 0 }, RenderSize::Double);
    }

    /// Bind a Unicode font set for pixel-doubled rendering with edge smoothing
    pub fn set_unicode_font_x2_smooth(&mut self, set: &'static UnicodeFont) {
        self.bind(
            FontBinding::Unicode { set, cached: 0 },
            RenderSize::DoubleSmooth,
        );
    }

    fn bind(&mut self, font: FontBinding, size: RenderSize) {
        self.font = font;
        self.size = size;
        self.decoder.reset();
    }

    /// Override the inter-character spacing of the bound font, in source
    /// pixels (doubled sizes double it on screen)
    pub fn set_spacing(&mut self, spacing: u8) {
        self.spacing = Some(spacing);
    }

    /// Revert to the bound font's own spacing
    pub fn reset_spacing(&mut self) {
        self.spacing = None;
    }

    /// On-screen pixel width of a string in the bound single font
    ///
    /// Accounts for the spacing override and render size. Unsupported
    /// characters contribute nothing. Returns 0 under a Unicode binding
    /// (raw bytes are not character codes there) or with no font bound.
    pub fn text_width(&self, text: &str) -> u16 {
        let FontBinding::Single(font) = self.font else {
            return 0;
        };
        let spacing = u16::from(self.spacing.unwrap_or(font.spacing));
        let mut total: u16 = 0;
        for byte in text.bytes() {
            if font.contains(byte) {
                total += u16::from(font.glyph_width(byte)) + spacing;
            }
        }
        match self.size {
            RenderSize::Original => total,
            RenderSize::Double | RenderSize::DoubleSmooth => total.saturating_mul(2),
        }
    }

    /// Number of UTF-8 continuation bytes still expected by the decoder
    pub fn pending_utf8_bytes(&self) -> u8 {
        self.decoder.pending()
    }

    // --- Text output ---

    /// Print a string
    pub fn print_str(&mut self, text: &str) -> DisplayResult<I> {
        for byte in text.bytes() {
            self.print_byte(byte)?;
        }
        Ok(())
    }

    /// Print one input byte
    ///
    /// Under a single-font binding the byte is a character code: `\r` is
    /// ignored, `\n` starts a new line, codes outside the font's range are
    /// dropped. Under a Unicode binding the byte feeds the UTF-8 decoder
    /// and completed codepoints are rendered. With no font bound, output
    /// is ignored.
    pub fn print_byte(&mut self, byte: u8) -> DisplayResult<I> {
        match self.font {
            FontBinding::None => Ok(()),
            FontBinding::Single(font) => match byte {
                b'\r' => Ok(()),
                b'\n' => self.new_line(),
                _ if font.contains(byte) => self.render_glyph(font, byte),
                _ => Ok(()),
            },
            FontBinding::Unicode { .. } => match self.decoder.feed(byte) {
                Some(codepoint) => self.emit_codepoint(codepoint),
                None => Ok(()),
            },
        }
    }

    /// Render one decoded codepoint
    ///
    /// Control codes below 0x20 other than newline are invisible. A space
    /// advances by the font set's configured space width. Codepoints no
    /// sub-font covers are dropped without moving the cursor.
    fn emit_codepoint(&mut self, codepoint: u32) -> DisplayResult<I> {
        if codepoint == u32::from(b'\n') {
            return self.new_line();
        }
        if codepoint < 0x20 {
            return Ok(());
        }
        let FontBinding::Unicode { set, cached } = self.font else {
            return Ok(());
        };
        if codepoint == 0x20 {
            return self.advance_blank(set.space_width);
        }
        match set.select(codepoint, cached) {
            Some(index) => {
                self.font = FontBinding::Unicode { set, cached: index };
                let font = set.fonts[index].font;
                self.render_glyph(font, (codepoint & 0xFF) as u8)
            }
            None => Ok(()),
        }
    }

    fn render_glyph(&mut self, font: &'static Font, code: u8) -> DisplayResult<I> {
        let width = font.glyph_width(code);
        if width == 0 {
            return Ok(());
        }
        let offset = font.glyph_offset(code);
        self.render_columns(font, width, Some((font.bitmap, offset)))
    }

    /// Advance by `width` blank source columns, rendered like a glyph
    fn advance_blank(&mut self, width: u8) -> DisplayResult<I> {
        if width == 0 {
            return Ok(());
        }
        let Some(font) = self.active_font() else {
            return Ok(());
        };
        self.render_columns(font, width, None)
    }

    /// Line-wrap check and render dispatch
    ///
    /// A glyph whose doubled or natural width would cross the right edge
    /// wraps to a new line first; one ending exactly at the edge renders in
    /// place.
    fn render_columns(
        &mut self,
        font: &'static Font,
        width: u8,
        glyph: Option<(&'static [u8], usize)>,
    ) -> DisplayResult<I> {
        let spacing = self.spacing.unwrap_or(font.spacing);
        let (effective_width, effective_height) = match self.size {
            RenderSize::Original => (u16::from(width), font.height),
            RenderSize::Double | RenderSize::DoubleSmooth => {
                (u16::from(width) * 2, font.height.saturating_mul(2))
            }
        };
        if u16::from(self.x) + effective_width > u16::from(self.config.geometry.width) {
            self.advance_line(effective_height)?;
        }
        match self.size {
            RenderSize::Original => self.render_original(width, font.height, glyph, spacing),
            RenderSize::Double => self.render_double(width, font.height, glyph, spacing, false),
            RenderSize::DoubleSmooth => self.render_double(width, font.height, glyph, spacing, true),
        }
    }

    /// Stream a glyph at its natural size
    ///
    /// One data frame per page row; single-page fonts rely on the
    /// controller's address auto-increment, multi-page fonts re-seat the
    /// cursor per row and once more past the glyph when done.
    fn render_original(
        &mut self,
        width: u8,
        height: u8,
        glyph: Option<(&'static [u8], usize)>,
        spacing: u8,
    ) -> DisplayResult<I> {
        let x0 = self.x;
        let y0 = self.y;
        let room = u16::from(self.config.geometry.width)
            .saturating_sub(u16::from(x0) + u16::from(width));
        let spacing = core::cmp::min(u16::from(spacing), room) as u8;
        for row in 0..height {
            if row > 0 {
                self.set_cursor(x0, y0 + row)?;
            }
            self.start_data()?;
            for i in 0..width {
                let byte = glyph_byte(glyph, usize::from(row) * usize::from(width) + usize::from(i));
                self.send_data(byte)?;
            }
            self.clear_data(spacing)?;
            self.end_data()?;
        }
        let advance = x0 + width + spacing;
        if height == 1 {
            // The controller auto-incremented for us.
            self.x = advance;
        } else {
            self.set_cursor(advance, y0)?;
        }
        Ok(())
    }

    /// Stream a glyph pixel-doubled, optionally smoothing diagonal edges
    ///
    /// Switches the controller into vertical addressing over an explicit
    /// column/page window, streams each doubled column twice (left and
    /// right halves of the doubled pixels), restores page addressing, and
    /// re-seats the cursor past the glyph. Fonts taller than two pages are
    /// truncated to their top sixteen pixel rows.
    fn render_double(
        &mut self,
        width: u8,
        height: u8,
        glyph: Option<(&'static [u8], usize)>,
        spacing: u8,
        smooth: bool,
    ) -> DisplayResult<I> {
        let geometry = self.config.geometry;
        let x0 = self.x;
        let y0 = self.y;
        let room = u16::from(geometry.width)
            .saturating_sub(u16::from(x0) + 2 * u16::from(width));
        let spacing = core::cmp::min(u16::from(spacing), room / 2) as u8;
        let out_columns = 2 * (width + spacing);
        if out_columns == 0 || width == 0 {
            return Ok(());
        }
        let source_height = core::cmp::min(height, 2);
        let out_pages = 2 * source_height;
        let frame_pages = if self.render_frame & PAGE_START_FRAME_BIT != 0 {
            4
        } else {
            0
        };
        let page_start = y0 + geometry.y_offset + frame_pages;
        let column_start = x0 + geometry.x_offset;
        self.send_commands(&[
            MEMORY_ADDRESSING_MODE,
            ADDRESSING_VERTICAL,
            COLUMN_ADDRESS,
            column_start,
            column_start + out_columns - 1,
            PAGE_ADDRESS,
            page_start,
            page_start + out_pages - 1,
        ])?;

        self.start_data()?;
        let mut previous = gather_column(glyph, width, source_height, 0);
        let mut previous_left = stretch(previous);
        let mut previous_right = previous_left;
        for i in 1..width {
            let current = gather_column(glyph, width, source_height, i);
            let mut left = stretch(current);
            let right = left;
            if smooth {
                smooth_pair(previous, current, &mut previous_right, &mut left);
            }
            self.send_column(previous_left, out_pages)?;
            self.send_column(previous_right, out_pages)?;
            previous = current;
            previous_left = left;
            previous_right = right;
        }
        self.send_column(previous_left, out_pages)?;
        self.send_column(previous_right, out_pages)?;
        for _ in 0..2 * spacing {
            self.send_column(0, out_pages)?;
        }
        self.end_data()?;

        self.send_commands(&[MEMORY_ADDRESSING_MODE, ADDRESSING_PAGE])?;
        self.set_cursor(x0 + out_columns, y0)
    }

    /// Write one doubled column, least significant page first
    fn send_column(&mut self, column: u32, pages: u8) -> DisplayResult<I> {
        for page in 0..pages {
            self.send_data((column >> (8 * u32::from(page))) as u8)?;
        }
        Ok(())
    }

    // --- Frame controller (double buffering) ---

    /// Toggle which half of controller RAM subsequent drawing targets
    ///
    /// Pure cursor-state change, no bus traffic; takes effect on the next
    /// [`set_cursor`](Self::set_cursor) and on double-size page windows.
    pub fn switch_render_frame(&mut self) {
        self.render_frame ^= PAGE_START_FRAME_BIT;
    }

    /// Toggle which half of controller RAM is scanned out to the panel
    ///
    /// Sends the display-start-line command immediately.
    pub fn switch_display_frame(&mut self) -> DisplayResult<I> {
        self.display_frame ^= START_LINE_FRAME_BIT;
        trace!("display frame -> {}", self.current_display_frame());
        let command = self.display_frame;
        self.send_commands(&[command])
    }

    /// Swap the displayed frame and retarget drawing at the hidden one
    ///
    /// Calling this after rendering a complete frame gives flicker-free
    /// double buffering.
    pub fn switch_frame(&mut self) -> DisplayResult<I> {
        self.switch_display_frame()?;
        self.switch_render_frame();
        Ok(())
    }

    /// The render-frame selector, 0 or 1
    pub fn current_render_frame(&self) -> u8 {
        (self.render_frame >> 2) & 0x01
    }

    /// The display-frame selector, 0 or 1
    pub fn current_display_frame(&self) -> u8 {
        (self.display_frame >> 5) & 0x01
    }

    // --- 1. Fundamental commands ---

    /// Set the contrast register
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<I> {
        self.send_commands(&[SET_CONTRAST, contrast])
    }

    /// Light every pixel regardless of RAM content, or resume following RAM
    pub fn set_entire_display_on(&mut self, enable: bool) -> DisplayResult<I> {
        let command = if enable {
            ENTIRE_DISPLAY_ON
        } else {
            ENTIRE_DISPLAY_RESUME
        };
        self.send_commands(&[command])
    }

    /// Invert the panel (lit pixels dark and vice versa)
    pub fn set_inverse(&mut self, enable: bool) -> DisplayResult<I> {
        let command = if enable { INVERSE_DISPLAY } else { NORMAL_DISPLAY };
        self.send_commands(&[command])
    }

    /// Put the panel to sleep
    pub fn off(&mut self) -> DisplayResult<I> {
        self.send_commands(&[DISPLAY_OFF])
    }

    /// Wake the panel
    pub fn on(&mut self) -> DisplayResult<I> {
        self.send_commands(&[DISPLAY_ON])
    }

    // --- 2. Scrolling commands ---

    /// Configure continuous rightward scrolling of a page/column window
    ///
    /// Use column bounds (0, 0xFF) for the full width. Follow with
    /// [`activate_scroll`](Self::activate_scroll).
    pub fn scroll_right(
        &mut self,
        start_page: u8,
        interval: u8,
        end_page: u8,
        start_column: u8,
        end_column: u8,
    ) -> DisplayResult<I> {
        self.send_commands(&[
            SCROLL_RIGHT,
            0x00,
            start_page,
            interval,
            end_page,
            start_column,
            end_column,
        ])
    }

    /// Configure continuous leftward scrolling of a page/column window
    pub fn scroll_left(
        &mut self,
        start_page: u8,
        interval: u8,
        end_page: u8,
        start_column: u8,
        end_column: u8,
    ) -> DisplayResult<I> {
        self.send_commands(&[
            SCROLL_LEFT,
            0x00,
            start_page,
            interval,
            end_page,
            start_column,
            end_column,
        ])
    }

    /// Configure rightward scrolling with a vertical offset per step
    pub fn scroll_right_offset(
        &mut self,
        start_page: u8,
        interval: u8,
        end_page: u8,
        offset: u8,
    ) -> DisplayResult<I> {
        self.send_commands(&[
            SCROLL_RIGHT_VERTICAL,
            0x00,
            start_page,
            interval,
            end_page,
            offset,
        ])
    }

    /// Configure leftward scrolling with a vertical offset per step
    pub fn scroll_left_offset(
        &mut self,
        start_page: u8,
        interval: u8,
        end_page: u8,
        offset: u8,
    ) -> DisplayResult<I> {
        self.send_commands(&[
            SCROLL_LEFT_VERTICAL,
            0x00,
            start_page,
            interval,
            end_page,
            offset,
        ])
    }

    /// Stop scrolling; RAM content must be rewritten afterwards
    pub fn deactivate_scroll(&mut self) -> DisplayResult<I> {
        self.send_commands(&[DEACTIVATE_SCROLL])
    }

    /// Start the configured scroll
    pub fn activate_scroll(&mut self) -> DisplayResult<I> {
        self.send_commands(&[ACTIVATE_SCROLL])
    }

    /// Restrict vertical scrolling to `rows` rows below `top` fixed rows
    pub fn set_vertical_scroll_area(&mut self, top: u8, rows: u8) -> DisplayResult<I> {
        self.send_commands(&[VERTICAL_SCROLL_AREA, top, rows])
    }

    // --- 3. Addressing commands ---

    /// Set the column start address for page addressing mode
    pub fn set_column_start_address(&mut self, address: u8) -> DisplayResult<I> {
        self.send_commands(&[address & 0x0F, COLUMN_HIGH_NIBBLE | (address >> 4)])
    }

    /// Set the memory addressing mode (see the `ADDRESSING_*` constants)
    pub fn set_memory_addressing_mode(&mut self, mode: u8) -> DisplayResult<I> {
        self.send_commands(&[MEMORY_ADDRESSING_MODE, mode & 0x03])
    }

    /// Set the column address range for horizontal/vertical addressing
    pub fn set_column_address(&mut self, start: u8, end: u8) -> DisplayResult<I> {
        self.send_commands(&[COLUMN_ADDRESS, start & 0x7F, end & 0x7F])
    }

    /// Set the page address range for horizontal/vertical addressing
    pub fn set_page_address(&mut self, start: u8, end: u8) -> DisplayResult<I> {
        self.send_commands(&[PAGE_ADDRESS, start & 0x07, end & 0x07])
    }

    /// Set the page start address for page addressing mode
    pub fn set_page_start_address(&mut self, page: u8) -> DisplayResult<I> {
        self.send_commands(&[PAGE_START | (page & 0x07)])
    }

    // --- 4. Hardware configuration commands ---

    /// Set which RAM row is scanned out first
    pub fn set_display_start_line(&mut self, start_line: u8) -> DisplayResult<I> {
        self.send_commands(&[DISPLAY_START_LINE | (start_line & 0x3F)])
    }

    /// Mirror the panel horizontally (1) or not (0)
    pub fn set_segment_remap(&mut self, remap: u8) -> DisplayResult<I> {
        self.send_commands(&[SEGMENT_REMAP | (remap & 0x01)])
    }

    /// Set the multiplex ratio to `mux` rows (1..=64)
    pub fn set_multiplex_ratio(&mut self, mux: u8) -> DisplayResult<I> {
        self.send_commands(&[MULTIPLEX_RATIO, mux.wrapping_sub(1) & 0x3F])
    }

    /// Mirror the panel vertically (1) or not (0)
    pub fn set_com_output_direction(&mut self, direction: u8) -> DisplayResult<I> {
        self.send_commands(&[COM_OUTPUT_DIRECTION | ((direction & 0x01) << 3)])
    }

    /// Shift the panel vertically by `offset` rows
    pub fn set_display_offset(&mut self, offset: u8) -> DisplayResult<I> {
        self.send_commands(&[DISPLAY_OFFSET, offset & 0x3F])
    }

    /// Configure the COM pin wiring of the attached panel
    pub fn set_com_pins_configuration(
        &mut self,
        alternative: u8,
        left_right_remap: u8,
    ) -> DisplayResult<I> {
        self.send_commands(&[
            COM_PINS_CONFIGURATION,
            ((left_right_remap & 0x01) << 5) | ((alternative & 0x01) << 4) | 0x02,
        ])
    }

    // --- 5. Timing and driving commands ---

    /// Set the display clock divide ratio (1..=16) and oscillator frequency
    /// (0..=15)
    pub fn set_display_clock(
        &mut self,
        divide_ratio: u8,
        oscillator_frequency: u8,
    ) -> DisplayResult<I> {
        self.send_commands(&[
            DISPLAY_CLOCK,
            ((oscillator_frequency & 0x0F) << 4) | (divide_ratio.wrapping_sub(1) & 0x0F),
        ])
    }

    /// Set the pre-charge period phases, in clocks (1..=15 each)
    pub fn set_precharge_period(&mut self, phase_one: u8, phase_two: u8) -> DisplayResult<I> {
        self.send_commands(&[
            PRECHARGE_PERIOD,
            ((phase_two & 0x0F) << 4) | (phase_one & 0x0F),
        ])
    }

    /// Set the VCOMH deselect level (0..=7)
    pub fn set_vcomh_deselect_level(&mut self, level: u8) -> DisplayResult<I> {
        self.send_commands(&[VCOMH_DESELECT_LEVEL, (level & 0x07) << 4])
    }

    /// Send a no-operation command
    pub fn nop(&mut self) -> DisplayResult<I> {
        self.send_commands(&[NOP])
    }

    // --- 6. Advanced graphics commands ---

    /// Fade the panel out repeatedly with the given 8-frame interval (0..=15)
    pub fn fade_out(&mut self, interval: u8) -> DisplayResult<I> {
        self.send_commands(&[FADE_AND_BLINK, FADE_OUT_MODE | (interval & 0x0F)])
    }

    /// Blink the panel with the given 8-frame interval (0..=15)
    pub fn blink(&mut self, interval: u8) -> DisplayResult<I> {
        self.send_commands(&[FADE_AND_BLINK, BLINK_MODE | (interval & 0x0F)])
    }

    /// Stop fading and blinking
    pub fn disable_fade_out_and_blinking(&mut self) -> DisplayResult<I> {
        self.send_commands(&[FADE_AND_BLINK, 0x00])
    }

    /// Enable the zoom-in mode (each row displayed twice)
    pub fn enable_zoom_in(&mut self) -> DisplayResult<I> {
        self.send_commands(&[ZOOM_IN, 0x01])
    }

    /// Disable the zoom-in mode
    pub fn disable_zoom_in(&mut self) -> DisplayResult<I> {
        self.send_commands(&[ZOOM_IN, 0x00])
    }

    // --- Charge pump and current reference ---

    /// Enable the internal charge pump at one of the `CHARGE_PUMP_*`
    /// voltages (usually
    /// [`CHARGE_PUMP_7_5V`](crate::command::CHARGE_PUMP_7_5V))
    pub fn enable_charge_pump(&mut self, voltage: u8) -> DisplayResult<I> {
        self.send_commands(&[CHARGE_PUMP, voltage])
    }

    /// Disable the internal charge pump
    pub fn disable_charge_pump(&mut self) -> DisplayResult<I> {
        self.send_commands(&[CHARGE_PUMP, CHARGE_PUMP_OFF])
    }

    /// Select the external current reference
    pub fn set_external_iref(&mut self) -> DisplayResult<I> {
        self.send_commands(&[IREF_SETTING, IREF_EXTERNAL])
    }

    /// Select the internal current reference, optionally at the higher
    /// 30uA setting
    pub fn set_internal_iref(&mut self, bright: bool) -> DisplayResult<I> {
        let setting = if bright {
            IREF_INTERNAL_BRIGHT
        } else {
            IREF_INTERNAL
        };
        self.send_commands(&[IREF_SETTING, setting])
    }
}

impl<I> core::fmt::Write for Display<I>
where
    I: DisplayInterface,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print_str(s).map_err(|_| core::fmt::Error)
    }
}

fn glyph_byte(glyph: Option<(&[u8], usize)>, index: usize) -> u8 {
    match glyph {
        Some((bitmap, offset)) => bitmap.get(offset + index).copied().unwrap_or(0),
        None => 0,
    }
}

/// Gather source column `column` of a glyph into one 16-bit vertical strip,
/// low page in the low byte
fn gather_column(glyph: Option<(&[u8], usize)>, width: u8, height: u8, column: u8) -> u16 {
    let mut gathered: u16 = 0;
    for row in 0..height {
        let byte = glyph_byte(
            glyph,
            usize::from(row) * usize::from(width) + usize::from(column),
        );
        gathered |= u16::from(byte) << (8 * row);
    }
    gathered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Builder, Geometry};
    use crate::font::UnicodeFontRef;
    use alloc::vec::Vec;
    use core::fmt::Write as _;

    #[derive(Debug, Default)]
    struct MockInterface {
        frames: Vec<(Frame, Vec<u8>)>,
        current: Option<(Frame, Vec<u8>)>,
        /// write_byte call index to refuse, once
        refuse_write: Option<usize>,
        writes: usize,
    }

    impl MockInterface {
        fn command_frames(&self) -> Vec<Vec<u8>> {
            self.frames
                .iter()
                .filter(|(kind, _)| *kind == Frame::Command)
                .map(|(_, bytes)| bytes.clone())
                .collect()
        }

        fn data_frames(&self) -> Vec<Vec<u8>> {
            self.frames
                .iter()
                .filter(|(kind, _)| *kind == Frame::Data)
                .map(|(_, bytes)| bytes.clone())
                .collect()
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn init(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn frame_start(&mut self, frame: Frame) -> Result<(), Self::Error> {
            self.current = Some((frame, Vec::new()));
            Ok(())
        }

        fn write_byte(&mut self, byte: u8) -> Result<bool, Self::Error> {
            let index = self.writes;
            self.writes += 1;
            if self.refuse_write == Some(index) {
                self.refuse_write = None;
                return Ok(false);
            }
            if let Some((_, bytes)) = self.current.as_mut() {
                bytes.push(byte);
            }
            Ok(true)
        }

        fn frame_end(&mut self) -> Result<(), Self::Error> {
            if let Some(frame) = self.current.take() {
                self.frames.push(frame);
            }
            Ok(())
        }
    }

    fn display_128x32() -> Display<MockInterface> {
        let config = Builder::new()
            .geometry(Geometry::new(128, 4, 0, 0).unwrap())
            .build()
            .unwrap();
        Display::new(MockInterface::default(), config)
    }

    fn display_72x40() -> Display<MockInterface> {
        Display::new(MockInterface::default(), Config::panel_72x40())
    }

    // 6 pixels x 1 page, covering the printable ASCII range.
    static ASCII_BITMAP: [u8; 576] = [0x55; 576];

    static FONT_6X8: Font = Font {
        bitmap: &ASCII_BITMAP,
        width: 6,
        height: 1,
        first: 32,
        last: 127,
        block_widths: &[],
        widths: &[],
        spacing: 0,
    };

    static SPACED_BITMAP: [u8; 24] = [0x11; 24];

    static FONT_4X8_SPACED: Font = Font {
        bitmap: &SPACED_BITMAP,
        width: 4,
        height: 1,
        first: 65,
        last: 70,
        block_widths: &[],
        widths: &[],
        spacing: 2,
    };

    // 4 pixels x 2 pages, 'A' only: top row 1..=4, bottom row 5..=8.
    static TALL_BITMAP: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    static FONT_4X16: Font = Font {
        bitmap: &TALL_BITMAP,
        width: 4,
        height: 2,
        first: 65,
        last: 65,
        block_widths: &[],
        widths: &[],
        spacing: 0,
    };

    // 2 pixels x 1 page for double-size wire checks.
    static NARROW_BITMAP: [u8; 2] = [0x0F, 0xF0];

    static FONT_2X8: Font = Font {
        bitmap: &NARROW_BITMAP,
        width: 2,
        height: 1,
        first: 65,
        last: 65,
        block_widths: &[],
        widths: &[],
        spacing: 0,
    };

    static DIAGONAL_BITMAP: [u8; 2] = [0x01, 0x02];

    static FONT_DIAGONAL: Font = Font {
        bitmap: &DIAGONAL_BITMAP,
        width: 2,
        height: 1,
        first: 65,
        last: 65,
        block_widths: &[],
        widths: &[],
        spacing: 0,
    };

    static CYRILLIC_BITMAP: [u8; 96] = [0x33; 96];

    static CYRILLIC_FONT: Font = Font {
        bitmap: &CYRILLIC_BITMAP,
        width: 6,
        height: 1,
        first: 0x10,
        last: 0x1F,
        block_widths: &[],
        widths: &[],
        spacing: 0,
    };

    static UNICODE_SET: UnicodeFont = UnicodeFont {
        space_width: 3,
        fonts: &[UnicodeFontRef {
            plane: 0,
            block: 0x04,
            font: &CYRILLIC_FONT,
        }],
    };

    #[test]
    fn test_set_cursor_roundtrip() {
        let mut display = display_128x32();
        for (x, y) in [(0, 0), (5, 2), (127, 3)] {
            display.set_cursor(x, y).unwrap();
            assert_eq!(display.cursor(), (x, y));
        }
    }

    #[test]
    fn test_set_cursor_wire_bytes_apply_offsets() {
        // 72x40 panel sits at column offset 28.
        let mut display = display_72x40();
        display.set_cursor(5, 2).unwrap();
        assert_eq!(
            display.interface.command_frames(),
            alloc::vec![alloc::vec![0xB2, 0x12, 0x01]]
        );
    }

    #[test]
    fn test_init_sends_one_command_frame() {
        let mut display = display_128x32();
        display.init().unwrap();
        let frames = display.interface.command_frames();
        assert_eq!(frames.len(), 1);
        let mut expected = INIT_DEFAULTS.to_vec();
        expected.extend_from_slice(crate::config::INIT_128X32);
        assert_eq!(frames[0], expected);
    }

    #[test]
    fn test_refused_byte_resent_in_fresh_frame() {
        let mut display = display_128x32();
        // Refuse the second payload byte of the command frame.
        display.interface.refuse_write = Some(1);
        display.send_commands(&[SET_CONTRAST, 0x7F]).unwrap();
        assert_eq!(
            display.interface.command_frames(),
            alloc::vec![alloc::vec![SET_CONTRAST], alloc::vec![0x7F]]
        );
    }

    #[test]
    fn test_render_advances_cursor_by_width_and_spacing() {
        let mut display = display_128x32();
        display.set_font(&FONT_4X8_SPACED);
        display.set_cursor(10, 0).unwrap();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (16, 0));
        // 4 glyph bytes plus 2 spacing zeros in one data frame.
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![0x11, 0x11, 0x11, 0x11, 0x00, 0x00]]
        );
    }

    #[test]
    fn test_glyph_ending_at_right_edge_renders_in_place() {
        let mut display = display_128x32();
        display.set_font(&FONT_6X8);
        display.set_cursor(122, 0).unwrap();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (128, 0));
    }

    #[test]
    fn test_glyph_past_right_edge_wraps_first() {
        let mut display = display_128x32();
        display.set_font(&FONT_6X8);
        display.set_cursor(123, 0).unwrap();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (6, 1));
    }

    #[test]
    fn test_spacing_clamped_at_line_end() {
        let mut display = display_128x32();
        display.set_font(&FONT_4X8_SPACED);
        // 4-pixel glyph at 123 ends at 127: room for 1 of 2 spacing columns.
        display.set_cursor(123, 0).unwrap();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (128, 0));
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![0x11, 0x11, 0x11, 0x11, 0x00]]
        );
    }

    #[test]
    fn test_multipage_glyph_reseats_cursor_per_row() {
        let mut display = display_128x32();
        display.set_font(&FONT_4X16);
        display.set_cursor(0, 0).unwrap();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (4, 0));
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![1, 2, 3, 4], alloc::vec![5, 6, 7, 8]]
        );
        // Row 1 was addressed at (0, 1), then the cursor came back up.
        let commands = display.interface.command_frames();
        assert_eq!(commands[1], alloc::vec![0xB1, 0x10, 0x00]);
        assert_eq!(commands[2], alloc::vec![0xB0, 0x10, 0x04]);
    }

    #[test]
    fn test_newline_clamps_at_last_row() {
        let mut display = display_128x32();
        display.set_font(&FONT_6X8);
        display.set_cursor(40, 3).unwrap();
        display.new_line().unwrap();
        assert_eq!(display.cursor(), (0, 3));
    }

    #[test]
    fn test_newline_accounts_for_double_height() {
        let mut display = display_128x32();
        display.set_font_x2(&FONT_4X16);
        display.set_cursor(10, 0).unwrap();
        // Doubled two-page font occupies 4 pages: already the whole panel.
        display.new_line().unwrap();
        assert_eq!(display.cursor(), (0, 0));
    }

    #[test]
    fn test_carriage_return_and_unknown_characters_invisible() {
        let mut display = display_128x32();
        display.set_font(&FONT_4X8_SPACED);
        display.set_cursor(10, 0).unwrap();
        let frames_before = display.interface.frames.len();
        display.print_byte(b'\r').unwrap();
        display.print_byte(b'z').unwrap();
        assert_eq!(display.cursor(), (10, 0));
        assert_eq!(display.interface.frames.len(), frames_before);
    }

    #[test]
    fn test_double_size_uses_vertical_addressing_window() {
        let mut display = display_128x32();
        display.set_font_x2(&FONT_2X8);
        display.set_cursor(10, 1).unwrap();
        display.print_byte(b'A').unwrap();

        let commands = display.interface.command_frames();
        // Window setup: vertical addressing, columns 10..=13, pages 1..=2.
        assert_eq!(
            commands[1],
            alloc::vec![0x20, 0x01, 0x21, 10, 13, 0x22, 1, 2]
        );
        // Page addressing restored before the cursor is re-seated.
        assert_eq!(commands[2], alloc::vec![0x20, 0x02]);
        assert_eq!(display.cursor(), (14, 1));

        // stretch(0x0F) = 0x00FF, stretch(0xF0) = 0xFF00, each column twice.
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![0xFF, 0x00, 0xFF, 0x00, 0x00, 0xFF, 0x00, 0xFF]]
        );
    }

    #[test]
    fn test_double_size_window_follows_render_frame() {
        let mut display = display_128x32();
        display.set_font_x2(&FONT_2X8);
        display.switch_render_frame();
        display.set_cursor(0, 0).unwrap();
        display.print_byte(b'A').unwrap();
        // Page window shifted into the second frame's half of RAM.
        let commands = display.interface.command_frames();
        assert_eq!(commands[1], alloc::vec![0x20, 0x01, 0x21, 0, 3, 0x22, 4, 5]);
    }

    #[test]
    fn test_double_smooth_adds_border_pixels() {
        let mut display = display_128x32();
        display.set_font_x2_smooth(&FONT_DIAGONAL);
        display.set_cursor(0, 0).unwrap();
        display.print_byte(b'A').unwrap();

        // Source columns 0b01, 0b10 form a rising step. The doubled right
        // half of the first column and left half of the second each gain
        // one border pixel.
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![0x03, 0x00, 0x07, 0x00, 0x0E, 0x00, 0x0C, 0x00]]
        );
    }

    #[test]
    fn test_utf8_input_selects_sub_font_and_renders() {
        let mut display = display_128x32();
        display.set_unicode_font(&UNICODE_SET);
        display.set_cursor(0, 0).unwrap();
        // U+0410 CYRILLIC CAPITAL LETTER A
        display.print_str("А").unwrap();
        assert_eq!(display.cursor(), (6, 0));
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![0x33; 6]]
        );
    }

    #[test]
    fn test_unicode_space_uses_configured_width() {
        let mut display = display_128x32();
        display.set_unicode_font(&UNICODE_SET);
        display.set_cursor(0, 0).unwrap();
        display.print_str(" ").unwrap();
        assert_eq!(display.cursor(), (3, 0));
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![0x00, 0x00, 0x00]]
        );
    }

    #[test]
    fn test_unsupported_codepoint_dropped() {
        let mut display = display_128x32();
        display.set_unicode_font(&UNICODE_SET);
        display.set_cursor(5, 0).unwrap();
        // U+00E9 is outside the configured Cyrillic block.
        display.print_str("é").unwrap();
        assert_eq!(display.cursor(), (5, 0));
        assert!(display.interface.data_frames().is_empty());
    }

    #[test]
    fn test_pending_utf8_bytes() {
        let mut display = display_128x32();
        display.set_unicode_font(&UNICODE_SET);
        assert_eq!(display.pending_utf8_bytes(), 0);
        display.print_byte(0xD0).unwrap();
        assert_eq!(display.pending_utf8_bytes(), 1);
        display.print_byte(0x90).unwrap();
        assert_eq!(display.pending_utf8_bytes(), 0);
    }

    #[test]
    fn test_switch_frame_twice_restores_selectors() {
        let mut display = display_128x32();
        assert_eq!(display.current_render_frame(), 0);
        assert_eq!(display.current_display_frame(), 0);
        display.switch_frame().unwrap();
        assert_eq!(display.current_render_frame(), 1);
        assert_eq!(display.current_display_frame(), 1);
        display.switch_frame().unwrap();
        assert_eq!(display.current_render_frame(), 0);
        assert_eq!(display.current_display_frame(), 0);
    }

    #[test]
    fn test_switch_display_frame_sends_start_line() {
        let mut display = display_128x32();
        display.switch_display_frame().unwrap();
        display.switch_display_frame().unwrap();
        assert_eq!(
            display.interface.command_frames(),
            alloc::vec![alloc::vec![0x60], alloc::vec![0x40]]
        );
    }

    #[test]
    fn test_render_frame_bit_in_cursor_command() {
        let mut display = display_128x32();
        display.switch_render_frame();
        display.set_cursor(0, 0).unwrap();
        assert_eq!(
            display.interface.command_frames(),
            alloc::vec![alloc::vec![0xB4, 0x10, 0x00]]
        );
    }

    #[test]
    fn test_fill_covers_panel_and_resets_cursor() {
        let mut display = display_128x32();
        display.set_cursor(40, 2).unwrap();
        display.fill(0xAA).unwrap();
        assert_eq!(display.cursor(), (0, 0));
        let data = display.interface.data_frames();
        assert_eq!(data.len(), 4);
        for frame in data {
            assert_eq!(frame, alloc::vec![0xAA; 128]);
        }
    }

    #[test]
    fn test_fill_length_advances_cursor() {
        let mut display = display_128x32();
        display.set_cursor(100, 0).unwrap();
        display.fill_length(0xFF, 20).unwrap();
        assert_eq!(display.cursor(), (120, 0));
        display.clear_to_eol().unwrap();
        assert_eq!(display.cursor(), (128, 0));
    }

    #[test]
    fn test_bitmap_streams_rows_and_resets_cursor() {
        let mut display = display_128x32();
        let image = [1u8, 2, 3, 4, 5, 6];
        display.bitmap(10, 1, 13, 3, &image).unwrap();
        assert_eq!(display.cursor(), (0, 0));
        assert_eq!(
            display.interface.data_frames(),
            alloc::vec![alloc::vec![1, 2, 3], alloc::vec![4, 5, 6]]
        );
    }

    #[test]
    fn test_command_wire_bytes() {
        let mut display = display_128x32();
        display.set_contrast(0x7F).unwrap();
        display.on().unwrap();
        display.set_inverse(true).unwrap();
        display.set_multiplex_ratio(64).unwrap();
        display.set_display_clock(1, 8).unwrap();
        display.fade_out(3).unwrap();
        display.enable_charge_pump(crate::command::CHARGE_PUMP_7_5V).unwrap();
        display.set_internal_iref(true).unwrap();
        display.scroll_right(0, 7, 3, 0x00, 0xFF).unwrap();
        assert_eq!(
            display.interface.command_frames(),
            alloc::vec![
                alloc::vec![0x81, 0x7F],
                alloc::vec![0xAF],
                alloc::vec![0xA7],
                alloc::vec![0xA8, 0x3F],
                alloc::vec![0xD5, 0x80],
                alloc::vec![0x23, 0x23],
                alloc::vec![0x8D, 0x14],
                alloc::vec![0xAD, 0x30],
                alloc::vec![0x26, 0x00, 0x00, 0x07, 0x03, 0x00, 0xFF],
            ]
        );
    }

    #[test]
    fn test_addressing_command_wire_bytes() {
        let mut display = display_128x32();
        display.set_column_start_address(0x37).unwrap();
        display.set_memory_addressing_mode(0x02).unwrap();
        display.set_column_address(0, 127).unwrap();
        display.set_page_address(0, 3).unwrap();
        display.set_page_start_address(2).unwrap();
        assert_eq!(
            display.interface.command_frames(),
            alloc::vec![
                alloc::vec![0x07, 0x13],
                alloc::vec![0x20, 0x02],
                alloc::vec![0x21, 0x00, 0x7F],
                alloc::vec![0x22, 0x00, 0x03],
                alloc::vec![0xB2],
            ]
        );
    }

    #[test]
    fn test_spacing_override() {
        let mut display = display_128x32();
        display.set_font(&FONT_4X8_SPACED);
        display.set_spacing(5);
        display.set_cursor(0, 0).unwrap();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (9, 0));
        display.reset_spacing();
        display.print_byte(b'A').unwrap();
        assert_eq!(display.cursor(), (15, 0));
    }

    #[test]
    fn test_text_width_tracks_size_and_spacing() {
        let mut display = display_128x32();
        display.set_font(&FONT_4X8_SPACED);
        assert_eq!(display.text_width("ABC"), 18);
        // Unsupported characters contribute nothing.
        assert_eq!(display.text_width("A!C"), 12);
        display.set_font_x2(&FONT_4X8_SPACED);
        assert_eq!(display.text_width("ABC"), 36);
    }

    #[test]
    fn test_fmt_write_integration() {
        let mut display = display_128x32();
        display.set_font(&FONT_6X8);
        display.set_cursor(0, 0).unwrap();
        write!(display, "{}!", 42).unwrap();
        assert_eq!(display.cursor(), (18, 0));
    }

    #[test]
    fn test_output_ignored_without_font() {
        let mut display = display_128x32();
        display.set_cursor(3, 0).unwrap();
        display.print_str("hello\n").unwrap();
        assert_eq!(display.cursor(), (3, 0));
    }
}
