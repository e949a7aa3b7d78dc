use position::Position;

/// The character a fresh [`Cursor`] reports as previously consumed, such
/// that start-of-line checks succeed at the start of the input.
const START_CHAR: char = '\n';

/// An immutable view over the unconsumed input.
///
/// Reading from a [`Cursor`] never mutates it; each read returns the cursor
/// for the rest of the input. Bytes are produced by encoding characters as
/// UTF-8, with the trailing bytes of the most recent character held as
/// pending until they are emitted.
///
/// # Invariant
///
/// A character-level read requires that no bytes are pending. Callers mixing
/// [`Cursor::next_byte`] and [`Cursor::next_char`] must drain the pending
/// bytes first, or discard them with [`Cursor::ignore_pending_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'s> {
    position: Position,
    last_char: char,
    pending: PendingBytes,
    remaining: &'s str,
}

impl<'s> Cursor<'s> {
    pub fn new(source: &'s str) -> Cursor<'s> {
        let position = Position::START;
        let last_char = START_CHAR;
        let pending = PendingBytes::default();
        Cursor { position, last_char, pending, remaining: source }
    }

    /// The position after the last consumed character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The last consumed character, used for preceding-character checks.
    pub fn last_char(&self) -> char {
        self.last_char
    }

    /// The text that has not been consumed yet.
    pub fn remaining(&self) -> &'s str {
        self.remaining
    }

    /// The encoded bytes of the last character that were not emitted yet.
    pub fn pending_bytes(&self) -> &[u8] {
        self.pending.as_slice()
    }

    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty() && self.pending.is_empty()
    }

    /// Consumes a single character.
    ///
    /// # Panics
    ///
    /// Panics if bytes of the previous character are still pending.
    pub fn next_char(self) -> Option<(char, Cursor<'s>)> {
        assert!(
            self.pending.is_empty(),
            "invariant violated: character read with {} pending bytes",
            self.pending.len()
        );
        let mut chars = self.remaining.chars();
        let character = chars.next()?;
        let cursor = Cursor {
            position: self.position.advance(character),
            last_char: character,
            pending: PendingBytes::default(),
            remaining: chars.as_str(),
        };
        Some((character, cursor))
    }

    /// Consumes a single byte of the UTF-8 encoded input.
    ///
    /// Pending bytes are emitted first without moving the position. Otherwise
    /// the next character is consumed as in [`Cursor::next_char`], its first
    /// byte is returned and the rest are held as pending.
    pub fn next_byte(self) -> Option<(u8, Cursor<'s>)> {
        if let Some((byte, pending)) = self.pending.pop() {
            return Some((byte, Cursor { pending, ..self }));
        }
        let (character, cursor) = self.next_char()?;
        let (byte, pending) = PendingBytes::encode(character);
        Some((byte, Cursor { pending, ..cursor }))
    }

    /// Discards pending bytes so character-level reads may resume.
    #[must_use]
    pub fn ignore_pending_bytes(self) -> Cursor<'s> {
        let pending = PendingBytes::default();
        Cursor { pending, ..self }
    }
}

/// Compares by the bytes still pending, ignoring the drained ones.
#[derive(Debug, Default, Clone, Copy)]
struct PendingBytes {
    bytes: [u8; 4],
    start: u8,
    end: u8,
}

impl PartialEq for PendingBytes {
    fn eq(&self, other: &PendingBytes) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PendingBytes {}

impl PendingBytes {
    /// Encodes `character`, returning its first byte and the rest as pending.
    fn encode(character: char) -> (u8, PendingBytes) {
        let mut bytes = [0; 4];
        let end = character.encode_utf8(&mut bytes).len() as u8;
        (bytes[0], PendingBytes { bytes, start: 1, end })
    }

    fn pop(self) -> Option<(u8, PendingBytes)> {
        if self.is_empty() {
            return None;
        }
        let byte = self.bytes[self.start as usize];
        let start = self.start + 1;
        Some((byte, PendingBytes { start, ..self }))
    }

    fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[self.start as usize..self.end as usize]
    }
}
