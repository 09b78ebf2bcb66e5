//! Token model plus the shared token writer and reader.

use irbridge_buffers::{Reader, Writer};

use crate::{StreamError, LONG_MATCH, MAX_LITERAL, MAX_MATCH, MIN_MATCH, WINDOW_SIZE};

/// One unit of a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Bytes copied verbatim. Runs longer than [`MAX_LITERAL`] are written as
    /// several consecutive literal blocks.
    Literal(&'a [u8]),
    /// Copy `length` bytes from `distance` bytes back in the output.
    Match { distance: usize, length: usize },
}

impl Token<'_> {
    /// Exact number of bytes this token occupies once written.
    pub fn encoded_len(&self) -> usize {
        match *self {
            Token::Literal(bytes) => bytes.len() + bytes.len().div_ceil(MAX_LITERAL),
            Token::Match { length, .. } => {
                if length < LONG_MATCH {
                    2
                } else {
                    3
                }
            }
        }
    }
}

/// Encoded size of a whole parse.
pub fn compressed_len(tokens: &[Token<'_>]) -> usize {
    tokens.iter().map(Token::encoded_len).sum()
}

/// Serializes tokens in firmware layout.
pub fn write_tokens(writer: &mut Writer, tokens: &[Token<'_>]) {
    for token in tokens {
        match *token {
            Token::Literal(bytes) => {
                for block in bytes.chunks(MAX_LITERAL) {
                    writer.u8((block.len() - 1) as u8);
                    writer.buf(block);
                }
            }
            Token::Match { distance, length } => {
                debug_assert!((1..=WINDOW_SIZE).contains(&distance));
                debug_assert!((MIN_MATCH..=MAX_MATCH).contains(&length));
                let offset = distance - 1;
                let units = length - 2;
                let high = (offset >> 8) as u8;
                if units < 7 {
                    writer.u8((units as u8) << 5 | high);
                } else {
                    writer.u8(7 << 5 | high);
                    writer.u8((units - 7) as u8);
                }
                writer.u8(offset as u8);
            }
        }
    }
}

/// Iterates over the tokens of a compressed stream.
///
/// ```
/// use irbridge_tuya_stream::{tokens, Token};
///
/// let stream = [0x02, b'a', b'b', b'c', 0x80, 0x02];
/// let parsed: Vec<_> = tokens(&stream).collect::<Result<_, _>>().unwrap();
/// assert_eq!(
///     parsed,
///     vec![
///         Token::Literal(b"abc"),
///         Token::Match { distance: 3, length: 6 },
///     ]
/// );
/// ```
pub fn tokens(stream: &[u8]) -> TokenReader<'_> {
    TokenReader::new(stream)
}

/// Single left-to-right pass over a compressed stream.
///
/// Yields at most one error, after which iteration ends.
pub struct TokenReader<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> TokenReader<'a> {
    pub fn new(stream: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(stream),
            failed: false,
        }
    }

    fn read_token(&mut self) -> Result<Token<'a>, StreamError> {
        let offset = self.reader.x;
        let truncated = |_| StreamError::Truncated { offset };

        let control = self.reader.u8().map_err(truncated)?;
        let kind = control >> 5;
        if kind == 0 {
            let run = usize::from(control & 0x1F) + 1;
            let bytes = self.reader.buf(run).map_err(truncated)?;
            return Ok(Token::Literal(bytes));
        }

        let mut length = usize::from(kind) + 2;
        if kind == 7 {
            length += usize::from(self.reader.u8().map_err(truncated)?);
        }
        let low = self.reader.u8().map_err(truncated)?;
        let distance = (usize::from(control & 0x1F) << 8 | usize::from(low)) + 1;
        Ok(Token::Match { distance, length })
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token<'a>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let token = self.read_token();
        self.failed = token.is_err();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(tokens: &[Token<'_>]) -> Vec<u8> {
        let mut writer = Writer::new();
        write_tokens(&mut writer, tokens);
        writer.flush()
    }

    #[test]
    fn literal_block_header_is_length_minus_one() {
        assert_eq!(written(&[Token::Literal(b"x")]), vec![0x00, b'x']);
        let run = [7u8; 32];
        let out = written(&[Token::Literal(&run)]);
        assert_eq!(out[0], 0x1F);
        assert_eq!(out.len(), 33);
    }

    #[test]
    fn long_literal_splits_into_blocks() {
        let run = [1u8; 70];
        let out = written(&[Token::Literal(&run)]);
        assert_eq!(out.len(), 73);
        assert_eq!(out[0], 31);
        assert_eq!(out[33], 31);
        assert_eq!(out[66], 5);
        assert_eq!(Token::Literal(&run).encoded_len(), 73);
    }

    #[test]
    fn short_match_layout() {
        let out = written(&[Token::Match {
            distance: 3,
            length: 6,
        }]);
        assert_eq!(out, vec![0x80, 0x02]);
    }

    #[test]
    fn long_match_layout() {
        let out = written(&[Token::Match {
            distance: 0x1234 + 1,
            length: MAX_MATCH,
        }]);
        assert_eq!(out, vec![0xF2, 0xFF, 0x34]);
        assert_eq!(
            tokens(&out).next(),
            Some(Ok(Token::Match {
                distance: 0x1235,
                length: MAX_MATCH
            }))
        );
    }

    #[test]
    fn boundary_lengths_pick_the_right_form() {
        let short = Token::Match {
            distance: 1,
            length: LONG_MATCH - 1,
        };
        let long = Token::Match {
            distance: 1,
            length: LONG_MATCH,
        };
        assert_eq!(written(&[short]), vec![0xC0, 0x00]);
        assert_eq!(written(&[long]), vec![0xE0, 0x00, 0x00]);
        assert_eq!(short.encoded_len(), 2);
        assert_eq!(long.encoded_len(), 3);
    }

    #[test]
    fn max_window_distance() {
        let token = Token::Match {
            distance: WINDOW_SIZE,
            length: MIN_MATCH,
        };
        let out = written(&[token]);
        assert_eq!(out, vec![0x3F, 0xFF]);
        assert_eq!(tokens(&out).next(), Some(Ok(token)));
    }

    #[test]
    fn reader_stops_after_error() {
        let mut reader = tokens(&[0x05, 1, 2]);
        assert_eq!(reader.next(), Some(Err(StreamError::Truncated { offset: 0 })));
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn compressed_len_sums_tokens() {
        let parse = [
            Token::Literal(b"abc"),
            Token::Match {
                distance: 3,
                length: 12,
            },
        ];
        assert_eq!(compressed_len(&parse), 4 + 3);
        assert_eq!(written(&parse).len(), 7);
    }
}
