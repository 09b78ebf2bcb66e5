//! Wire fixtures and laws for the Tuya stream compressor.

use std::sync::Once;

use irbridge_tuya_stream::{
    compress, compressed_len, decompress, parse, tokens, CompressionLevel, StreamError, Token,
    MAX_LITERAL, MAX_MATCH, WINDOW_SIZE,
};
use proptest::prelude::*;

static INIT: Once = Once::new();

/// Setup function that is only run once, even if called multiple times.
fn setup() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

fn searching_levels() -> [CompressionLevel; 3] {
    [
        CompressionLevel::Fast,
        CompressionLevel::Balanced,
        CompressionLevel::Optimal,
    ]
}

/// Little-endian u16 serialization, the shape the encoder feeds in.
fn le_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

// ---------------------------------------------------------------------------
// Golden streams
// ---------------------------------------------------------------------------

#[test]
fn golden_repeated_triplet() {
    setup();
    let data = b"abcabcabc";
    for level in searching_levels() {
        assert_eq!(
            hex::encode(compress(data, level)),
            "026162638002",
            "level {level}"
        );
    }
    assert_eq!(
        compress(data, CompressionLevel::None),
        [&[0x08u8][..], &data[..]].concat()
    );
}

#[test]
fn golden_long_run() {
    setup();
    let data = [b'a'; 20];
    for level in searching_levels() {
        assert_eq!(hex::encode(compress(&data, level)), "0061e00a00", "level {level}");
    }
}

#[test]
fn golden_timing_pairs() {
    setup();
    // Header pair followed by four identical bit pairs.
    let data = le_bytes(&[9000, 4500, 560, 560, 560, 560, 560, 560, 560, 560]);
    assert_eq!(hex::encode(&data[..8]), "2823941130023002");
    for level in searching_levels() {
        let stream = compress(&data, level);
        assert_eq!(hex::encode(&stream), "05282394113002e00501", "level {level}");
        assert_eq!(
            tokens(&stream).collect::<Result<Vec<_>, _>>().unwrap(),
            vec![
                Token::Literal(&data[..6]),
                Token::Match {
                    distance: 2,
                    length: 14
                }
            ]
        );
        assert_eq!(decompress(&stream).unwrap(), data);
    }
}

// ---------------------------------------------------------------------------
// Level 0 size is a function of input length only
// ---------------------------------------------------------------------------

#[test]
fn level_none_size_matrix() {
    setup();
    for len in [0usize, 1, 31, 32, 33, 64, 65, 300, 1000] {
        let zeros = vec![0u8; len];
        let ramp: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
        let expected = len + len.div_ceil(MAX_LITERAL);
        assert_eq!(compress(&zeros, CompressionLevel::None).len(), expected);
        assert_eq!(compress(&ramp, CompressionLevel::None).len(), expected);
    }
}

// ---------------------------------------------------------------------------
// Corrupt streams
// ---------------------------------------------------------------------------

#[test]
fn corrupt_stream_matrix() {
    setup();
    let cases: Vec<(&[u8], StreamError)> = vec![
        (&[0x05, 1, 2][..], StreamError::Truncated { offset: 0 }),
        (&[0x00, 9, 0x20][..], StreamError::Truncated { offset: 2 }),
        (&[0x00, 9, 0xE0, 0x01][..], StreamError::Truncated { offset: 2 }),
        (
            &[0x20, 0x00][..],
            StreamError::DistanceOutOfRange {
                distance: 1,
                produced: 0,
            },
        ),
        (
            &[0x00, 9, 0x3F, 0xFF][..],
            StreamError::DistanceOutOfRange {
                distance: WINDOW_SIZE,
                produced: 1,
            },
        ),
    ];
    for (stream, expected) in cases {
        assert_eq!(decompress(stream), Err(expected), "stream {stream:02x?}");
    }
}

// ---------------------------------------------------------------------------
// Token invariants
// ---------------------------------------------------------------------------

#[test]
fn parses_respect_token_bounds() {
    setup();
    let mut data = Vec::new();
    for i in 0..3000u32 {
        data.extend_from_slice(&((i % 17) as u16 * 100 + 500).to_le_bytes());
    }
    for level in CompressionLevel::ALL {
        let mut produced = 0usize;
        for token in parse(&data, level) {
            match token {
                Token::Literal(bytes) => produced += bytes.len(),
                Token::Match { distance, length } => {
                    assert!(distance >= 1 && distance <= WINDOW_SIZE);
                    assert!(distance <= produced);
                    assert!((3..=MAX_MATCH).contains(&length));
                    produced += length;
                }
            }
        }
        assert_eq!(produced, data.len());
    }
}

#[test]
fn compressed_len_matches_written_len() {
    setup();
    let data = le_bytes(&[4446, 4416, 609, 1584, 609, 1584, 609, 548, 609, 548]);
    for level in CompressionLevel::ALL {
        assert_eq!(
            compressed_len(&parse(&data, level)),
            compress(&data, level).len()
        );
    }
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

fn ir_like_bytes() -> impl Strategy<Value = Vec<u8>> {
    // Real payloads draw from a handful of distinct durations.
    (
        prop::collection::vec(300u16..12000, 1..6),
        prop::collection::vec(any::<prop::sample::Index>(), 0..400),
    )
        .prop_map(|(alphabet, picks)| {
            let values: Vec<u16> = picks.iter().map(|i| *i.get(&alphabet)).collect();
            le_bytes(&values)
        })
}

proptest! {
    #[test]
    fn roundtrip_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..600)) {
        for level in CompressionLevel::ALL {
            prop_assert_eq!(decompress(&compress(&data, level)).unwrap(), data.clone());
        }
    }

    #[test]
    fn roundtrip_ir_like(data in ir_like_bytes()) {
        for level in CompressionLevel::ALL {
            prop_assert_eq!(decompress(&compress(&data, level)).unwrap(), data.clone());
        }
    }

    #[test]
    fn size_is_monotonic_in_level(data in ir_like_bytes()) {
        let sizes: Vec<usize> = CompressionLevel::ALL
            .iter()
            .map(|level| compress(&data, *level).len())
            .collect();
        prop_assert!(sizes[3] <= sizes[2], "{:?}", sizes);
        prop_assert!(sizes[2] <= sizes[1], "{:?}", sizes);
        prop_assert!(sizes[1] <= sizes[0], "{:?}", sizes);
    }

    #[test]
    fn size_is_monotonic_on_low_entropy_bytes(data in prop::collection::vec(0u8..4, 0..500)) {
        let sizes: Vec<usize> = CompressionLevel::ALL
            .iter()
            .map(|level| compress(&data, *level).len())
            .collect();
        prop_assert!(sizes.windows(2).all(|w| w[1] <= w[0]), "{:?}", sizes);
    }
}
