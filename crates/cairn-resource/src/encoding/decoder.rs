//! Incremental byte-to-text decoding.

use super::TextEncoding;

/// Position of the first byte that could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Offset from the start of the input.
    pub offset: u64,
}

/// Decodes a byte stream chunk by chunk.
///
/// Sequences split across chunk boundaries are held back until the next
/// chunk arrives. Malformed input is reported, never replaced.
#[derive(Debug, Clone)]
pub struct Decoder {
    encoding: TextEncoding,
    pending: Vec<u8>,
    consumed: u64,
}

impl Decoder {
    /// Creates a decoder for `encoding`.
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            pending: Vec::new(),
            consumed: 0,
        }
    }

    /// The encoding this decoder reads.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Decodes as much of `chunk` (plus any held-back bytes) as possible.
    pub fn decode(&mut self, chunk: &[u8]) -> Result<String, DecodeError> {
        match self.encoding {
            TextEncoding::Utf8 => self.decode_utf8(chunk),
            TextEncoding::Utf16Le => self.decode_utf16(chunk, u16::from_le_bytes),
            TextEncoding::Utf16Be => self.decode_utf16(chunk, u16::from_be_bytes),
            TextEncoding::Latin1 => Ok(self.decode_latin1(chunk)),
            TextEncoding::Ascii => self.decode_ascii(chunk),
        }
    }

    /// Signals end of input.
    ///
    /// Fails if an incomplete sequence is still held back.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(self.error_at(0))
        }
    }

    fn decode_utf8(&mut self, chunk: &[u8]) -> Result<String, DecodeError> {
        self.pending.extend_from_slice(chunk);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => self.pending.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(self.error_at(e.valid_up_to())),
        };

        let text = std::str::from_utf8(&self.pending[..valid])
            .map_err(|e| self.error_at(e.valid_up_to()))?
            .to_owned();
        self.advance(valid);
        Ok(text)
    }

    fn decode_utf16(
        &mut self,
        chunk: &[u8],
        unit: fn([u8; 2]) -> u16,
    ) -> Result<String, DecodeError> {
        self.pending.extend_from_slice(chunk);

        let mut usable = self.pending.len() & !1;
        if usable >= 2 {
            let last = unit([self.pending[usable - 2], self.pending[usable - 1]]);
            // A trailing high surrogate waits for its pair.
            if (0xD800..0xDC00).contains(&last) {
                usable -= 2;
            }
        }

        let units = self.pending[..usable]
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]));

        let mut text = String::with_capacity(usable / 2);
        let mut position = 0;
        for decoded in char::decode_utf16(units) {
            match decoded {
                Ok(ch) => {
                    text.push(ch);
                    position += ch.len_utf16() * 2;
                }
                Err(_) => return Err(self.error_at(position)),
            }
        }

        self.advance(usable);
        Ok(text)
    }

    fn decode_latin1(&mut self, chunk: &[u8]) -> String {
        self.consumed += chunk.len() as u64;
        chunk.iter().copied().map(char::from).collect()
    }

    fn decode_ascii(&mut self, chunk: &[u8]) -> Result<String, DecodeError> {
        if let Some(position) = chunk.iter().position(|b| !b.is_ascii()) {
            return Err(self.error_at(position));
        }
        Ok(self.decode_latin1(chunk))
    }

    fn advance(&mut self, len: usize) {
        self.pending.drain(..len);
        self.consumed += len as u64;
    }

    fn error_at(&self, position: usize) -> DecodeError {
        DecodeError {
            offset: self.consumed + position as u64,
        }
    }
}
