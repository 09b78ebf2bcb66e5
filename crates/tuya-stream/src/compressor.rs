//! Level dispatch, the size guard between levels, and decompression.

use irbridge_buffers::Writer;

use crate::strategy::{balanced, fast, none, optimal};
use crate::token::{compressed_len, tokens, write_tokens};
use crate::{CompressionLevel, StreamError, Token};

/// Parses `data` into tokens at the given level.
///
/// `Fast` and `Balanced` fall back to the next cheaper level's parse when
/// their own search produced a longer stream, so output size never grows with
/// the level. `Optimal` needs no guard: its edge set contains every token the
/// cheaper levels can emit.
pub fn parse(data: &[u8], level: CompressionLevel) -> Vec<Token<'_>> {
    match level {
        CompressionLevel::None => none::parse(data),
        CompressionLevel::Fast => smaller(fast::parse(data), none::parse(data)),
        CompressionLevel::Balanced => {
            smaller(balanced::parse(data), parse(data, CompressionLevel::Fast))
        }
        CompressionLevel::Optimal => optimal::parse(data),
    }
}

fn smaller<'a>(candidate: Vec<Token<'a>>, fallback: Vec<Token<'a>>) -> Vec<Token<'a>> {
    if compressed_len(&candidate) <= compressed_len(&fallback) {
        candidate
    } else {
        trace!("search lost to the cheaper level, using its parse");
        fallback
    }
}

/// Compresses `data` into a Tuya stream.
pub fn compress(data: &[u8], level: CompressionLevel) -> Vec<u8> {
    let parsed = parse(data, level);
    let mut writer = Writer::with_capacity(compressed_len(&parsed));
    write_tokens(&mut writer, &parsed);
    let out = writer.flush();
    debug!(
        "compressed {} -> {} bytes at level {} ({} tokens)",
        data.len(),
        out.len(),
        level,
        parsed.len()
    );
    out
}

/// Expands a Tuya stream back to the original bytes.
pub fn decompress(stream: &[u8]) -> Result<Vec<u8>, StreamError> {
    let mut out = Vec::with_capacity(stream.len() * 2);
    for token in tokens(stream) {
        match token? {
            Token::Literal(bytes) => out.extend_from_slice(bytes),
            Token::Match { distance, length } => {
                if distance > out.len() {
                    return Err(StreamError::DistanceOutOfRange {
                        distance,
                        produced: out.len(),
                    });
                }
                let start = out.len() - distance;
                // Byte-wise: the source may overlap the bytes being written.
                for i in start..start + length {
                    let byte = out[i];
                    out.push(byte);
                }
            }
        }
    }
    trace!("decompressed {} -> {} bytes", stream.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_stream() {
        for level in CompressionLevel::ALL {
            assert!(compress(&[], level).is_empty());
        }
        assert_eq!(decompress(&[]), Ok(vec![]));
    }

    #[test]
    fn none_is_one_literal_block_per_32_bytes() {
        let data = b"test data";
        let out = compress(data, CompressionLevel::None);
        assert_eq!(out[0] as usize, data.len() - 1);
        assert_eq!(&out[1..], data);
    }

    #[test]
    fn lone_short_repeat_breaks_even() {
        // The match saves one byte; splitting the literal run costs one.
        let data = b"abcdefghijXYZklmnopqrXYZstuvwxyz";
        let searched = fast::parse(data);
        assert_eq!(searched.len(), 3);
        assert_eq!(compressed_len(&searched), data.len() + 1);
        assert_eq!(compress(data, CompressionLevel::Fast).len(), 33);
        assert_eq!(compress(data, CompressionLevel::None).len(), 33);
    }

    #[test]
    fn guard_keeps_the_smaller_parse() {
        let short = vec![Token::Literal(b"ab")];
        let long = vec![Token::Literal(b"abc")];
        assert_eq!(smaller(long.clone(), short.clone()), short);
        assert_eq!(smaller(short.clone(), long), short);
    }

    #[test]
    fn overlapping_match_expands_run() {
        let stream = [0x00, b'a', 0xE0, 0x0A, 0x00];
        assert_eq!(decompress(&stream).unwrap(), vec![b'a'; 20]);
    }

    #[test]
    fn match_before_output_is_rejected() {
        assert_eq!(
            decompress(&[0x20, 0x00]),
            Err(StreamError::DistanceOutOfRange {
                distance: 1,
                produced: 0
            })
        );
        assert_eq!(
            decompress(&[0x01, 1, 2, 0x20, 0x02]),
            Err(StreamError::DistanceOutOfRange {
                distance: 3,
                produced: 2
            })
        );
    }
}
