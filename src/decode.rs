//! UTF-8 decode state machine
//!
//! A tiny per-byte decoder used when a Unicode font set is bound: raw input
//! bytes accumulate into codepoints, one state transition per byte. ASCII
//! bytes pass straight through; multi-byte sequences carry 6 payload bits
//! per continuation byte.
//!
//! Malformed input is not resynchronized. A continuation byte arriving with
//! no sequence in progress folds its bits into whatever codepoint was last
//! accumulated and emits the result, and a truncated sequence is silently
//! abandoned by the next lead byte. Glyph lookup downstream drops whatever
//! nonsense falls out, so garbage input degrades to invisible characters
//! rather than corrupting state.

/// Decode state: the codepoint being accumulated and how many continuation
/// bytes are still expected
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8Decoder {
    codepoint: u32,
    remaining: u8,
}

impl Utf8Decoder {
    /// Create a decoder with no codepoint in progress
    pub const fn new() -> Self {
        Self {
            codepoint: 0,
            remaining: 0,
        }
    }

    /// Number of continuation bytes still expected
    pub fn pending(&self) -> u8 {
        self.remaining
    }

    /// Reset to the no-codepoint-in-progress state
    pub fn reset(&mut self) {
        self.codepoint = 0;
        self.remaining = 0;
    }

    /// Feed one input byte; returns a codepoint when one completes
    pub fn feed(&mut self, byte: u8) -> Option<u32> {
        if byte < 0x80 {
            self.remaining = 0;
            return Some(byte as u32);
        }
        if byte & 0xC0 == 0x80 {
            self.codepoint = (self.codepoint << 6) | (byte & 0x3F) as u32;
            if self.remaining > 0 {
                self.remaining -= 1;
            }
            if self.remaining == 0 {
                return Some(self.codepoint);
            }
            return None;
        }
        if byte & 0xE0 == 0xC0 {
            self.codepoint = (byte & 0x1F) as u32;
            self.remaining = 1;
        } else if byte & 0xF0 == 0xE0 {
            self.codepoint = (byte & 0x0F) as u32;
            self.remaining = 2;
        } else if byte & 0xF8 == 0xF0 {
            self.codepoint = (byte & 0x07) as u32;
            self.remaining = 3;
        }
        // 0xF8.. : not a valid lead byte, consumed without effect
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> alloc::vec::Vec<u32> {
        let mut decoder = Utf8Decoder::new();
        bytes.iter().filter_map(|b| decoder.feed(*b)).collect()
    }

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(decode(b"Hi!"), alloc::vec![0x48, 0x69, 0x21]);
    }

    #[test]
    fn test_two_byte_sequence() {
        // U+00E9 LATIN SMALL LETTER E WITH ACUTE
        assert_eq!(decode("é".as_bytes()), alloc::vec![0xE9]);
    }

    #[test]
    fn test_three_byte_sequence() {
        // U+20AC EURO SIGN
        assert_eq!(decode("€".as_bytes()), alloc::vec![0x20AC]);
    }

    #[test]
    fn test_four_byte_sequence() {
        // U+1F600
        assert_eq!(decode("😀".as_bytes()), alloc::vec![0x1F600]);
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(
            decode("aФb".as_bytes()),
            alloc::vec![0x61, 0x424, 0x62]
        );
    }

    #[test]
    fn test_pending_counts_down() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.feed(0xE2), None);
        assert_eq!(decoder.pending(), 2);
        assert_eq!(decoder.feed(0x82), None);
        assert_eq!(decoder.pending(), 1);
        assert_eq!(decoder.feed(0xAC), Some(0x20AC));
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_stray_continuation_folds_into_last_codepoint() {
        // No resync: the stray byte emits an accumulated-garbage codepoint.
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(0xD0), None);
        assert_eq!(decoder.feed(0x90), Some(0x410));
        let emitted = decoder.feed(0x90);
        assert!(emitted.is_some());
        assert_eq!(emitted, Some((0x410 << 6) | 0x10));
    }

    #[test]
    fn test_truncated_sequence_abandoned_by_next_lead() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(0xE2), None);
        // New lead byte replaces the unfinished sequence.
        assert_eq!(decoder.feed(0xD0), None);
        assert_eq!(decoder.feed(0x90), Some(0x410));
    }

    #[test]
    fn test_invalid_lead_byte_ignored() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(0xFF), None);
        assert_eq!(decoder.pending(), 0);
        assert_eq!(decoder.feed(0x41), Some(0x41));
    }
}
