//! Rune streams: one-rune lookahead over Unicode scalar values, with a
//! side buffer for multi-rune lexemes.
//!
//! This generalizes the teacher's byte/char `Cursor` to runes and to a
//! two-implementation contract: [`StrRuneStream`] over an in-memory
//! `&str` (used by the tokenizer and every test), and [`LineRuneStream`]
//! over a line-buffered reader (used only by the REPL, which cannot
//! hold the whole input up front).

use std::io::BufRead;

/// End-of-text sentinel. Never appears in valid UTF-8 source text, so
/// it can stand in for "no more input" without an `Option` at every
/// call site.
pub const EOT: char = '\u{4}';

/// The contract both rune stream implementations satisfy.
///
/// `head` is idempotent and keeps returning [`EOT`] once the input is
/// exhausted. `collect` is `advance` plus "remember the rune I just
/// moved past" — the tokenizer uses it to build up a lexeme one rune at
/// a time without a separate `String` per token.
pub trait RuneStream {
    /// Whether there is a non-sentinel rune at the head.
    fn has(&self) -> bool;

    /// The rune at the current position, or [`EOT`] past the end.
    fn head(&self) -> char;

    /// Move past the current rune without recording it.
    fn advance(&mut self);

    /// Move past the current rune, appending it to the collected buffer.
    ///
    /// Must not be called when `head()` is already [`EOT`].
    fn collect(&mut self);

    /// The runes collected so far, without draining them.
    fn peek_collected(&self) -> &[char];

    /// Drain and return the runes collected so far.
    fn pop_collected(&mut self) -> Vec<char>;

    /// Number of runes advanced past since the stream was created.
    fn count(&self) -> u64;
}

/// A [`RuneStream`] over an in-memory string. No I/O; this is the
/// implementation the tokenizer, parser, and test suite all use.
///
/// Tracks a byte position (like the teacher's `Cursor`) rather than
/// walking a `Chars` iterator, so the tokenizer can slice lexemes
/// directly out of the borrowed source instead of rebuilding them rune
/// by rune from the collected buffer.
pub struct StrRuneStream<'a> {
    source: &'a str,
    position: usize,
    head: char,
    collected: Vec<char>,
    count: u64,
}

impl<'a> StrRuneStream<'a> {
    /// Build a stream over `source`. Empty input behaves exactly like
    /// an immediate [`EOT`].
    pub fn new(source: &'a str) -> Self {
        let head = source.chars().next().unwrap_or(EOT);
        Self {
            source,
            position: 0,
            head,
            collected: Vec::new(),
            count: 0,
        }
    }

    /// The full source text this stream was built over.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The current byte offset into `source()`. Two calls bracketing a
    /// run of `advance`/`collect` calls give the byte range of the
    /// lexeme just scanned: `&stream.source()[start..stream.position()]`.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl RuneStream for StrRuneStream<'_> {
    fn has(&self) -> bool {
        self.head != EOT
    }

    fn head(&self) -> char {
        self.head
    }

    fn advance(&mut self) {
        if self.head == EOT {
            return;
        }
        self.position += self.head.len_utf8();
        self.count += 1;
        self.head = self.source[self.position..].chars().next().unwrap_or(EOT);
    }

    fn collect(&mut self) {
        debug_assert!(self.head != EOT, "must not collect the EOT sentinel");
        self.collected.push(self.head);
        self.advance();
    }

    fn peek_collected(&self) -> &[char] {
        &self.collected
    }

    fn pop_collected(&mut self) -> Vec<char> {
        std::mem::take(&mut self.collected)
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// A [`RuneStream`] over a line-buffered reader.
///
/// `rulelang-repl` uses this to pull one line at a time from stdin; it
/// satisfies the same contract as [`StrRuneStream`] but, since each
/// refill replaces its internal buffer, does not expose byte-addressable
/// lexeme slicing — the REPL tokenizes a line by handing its owned text
/// to a fresh [`StrRuneStream`], not by lexing directly over this type.
pub struct LineRuneStream<R> {
    reader: R,
    buffer: String,
    chars: Vec<char>,
    index: usize,
    head: char,
    collected: Vec<char>,
    count: u64,
    exhausted: bool,
}

impl<R: BufRead> LineRuneStream<R> {
    /// Build a stream over `reader`, reading the first line eagerly so
    /// `head()` is valid immediately.
    pub fn new(reader: R) -> Self {
        let mut stream = Self {
            reader,
            buffer: String::new(),
            chars: Vec::new(),
            index: 0,
            head: EOT,
            collected: Vec::new(),
            count: 0,
            exhausted: false,
        };
        stream.refill();
        stream
    }

    /// The line most recently read, including its trailing newline.
    pub fn current_line(&self) -> &str {
        &self.buffer
    }

    fn refill(&mut self) {
        if self.exhausted {
            self.head = EOT;
            return;
        }
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => {
                self.exhausted = true;
                self.head = EOT;
            }
            Ok(_) => {
                self.chars = self.buffer.chars().collect();
                self.index = 0;
                self.head = self.chars.first().copied().unwrap_or(EOT);
            }
            Err(_) => {
                self.exhausted = true;
                self.head = EOT;
            }
        }
    }

    fn advance_within_line(&mut self) {
        self.index += 1;
        if self.index < self.chars.len() {
            self.head = self.chars[self.index];
        } else {
            self.refill();
        }
    }
}

impl<R: BufRead> RuneStream for LineRuneStream<R> {
    fn has(&self) -> bool {
        self.head != EOT
    }

    fn head(&self) -> char {
        self.head
    }

    fn advance(&mut self) {
        if self.head == EOT {
            return;
        }
        self.count += 1;
        self.advance_within_line();
    }

    fn collect(&mut self) {
        debug_assert!(self.head != EOT, "must not collect the EOT sentinel");
        self.collected.push(self.head);
        self.advance();
    }

    fn peek_collected(&self) -> &[char] {
        &self.collected
    }

    fn pop_collected(&mut self) -> Vec<char> {
        std::mem::take(&mut self.collected)
    }

    fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_returns_eot_past_end() {
        let mut s = StrRuneStream::new("a");
        assert_eq!(s.head(), 'a');
        s.advance();
        assert_eq!(s.head(), EOT);
        assert_eq!(s.head(), EOT, "repeated reads past end are idempotent");
        s.advance();
        assert_eq!(s.head(), EOT, "advance past end is a no-op");
    }

    #[test]
    fn collect_appends_and_advances() {
        let mut s = StrRuneStream::new("abc");
        s.collect();
        s.collect();
        assert_eq!(s.peek_collected(), &['a', 'b']);
        assert_eq!(s.head(), 'c');
        assert_eq!(s.pop_collected(), vec!['a', 'b']);
        assert!(s.peek_collected().is_empty());
    }

    #[test]
    fn position_slices_match_advanced_runes() {
        let mut s = StrRuneStream::new("héllo");
        let start = s.position();
        for _ in 0..2 {
            s.advance();
        }
        assert_eq!(&s.source()[start..s.position()], "hé");
    }

    #[test]
    fn count_tracks_runes_advanced() {
        let mut s = StrRuneStream::new("héllo");
        assert_eq!(s.count(), 0);
        for _ in 0..5 {
            s.advance();
        }
        assert_eq!(s.count(), 5);
    }

    #[test]
    fn line_stream_matches_str_stream_contract() {
        let reader = std::io::Cursor::new("ab\ncd");
        let mut s = LineRuneStream::new(reader);
        let mut seen = String::new();
        while s.has() {
            seen.push(s.head());
            s.advance();
        }
        assert_eq!(seen, "ab\ncd");
        assert_eq!(s.head(), EOT);
    }

    #[test]
    fn empty_source_is_immediately_eot() {
        let s = StrRuneStream::new("");
        assert!(!s.has());
        assert_eq!(s.head(), EOT);
    }
}
