// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the envelope framing.

use farcache_remote::{Envelope, ErrorKind, FLAGS_LEN};

#[test]
fn encoded_length_is_payload_plus_header() {
    for len in [0usize, 1, 4, 100, 4096] {
        let envelope = Envelope::new(42, vec![7; len]);
        assert_eq!(envelope.to_bytes().len(), len + FLAGS_LEN);
    }
}

#[test]
fn round_trip_preserves_flags_and_payload() {
    let cases = [
        (0u32, Vec::new()),
        (0, b"plain".to_vec()),
        (1, vec![0; 64]),
        (u32::MAX, vec![0xAB; 3]),
        (0x0102_0304, (0..=255).collect()),
    ];

    for (flags, payload) in cases {
        let bytes = Envelope::new(flags, payload.clone()).to_bytes();
        let decoded = Envelope::from_bytes(&bytes).expect("round trip failed");
        assert_eq!(decoded.flags(), flags);
        assert_eq!(decoded.payload(), payload.as_slice());
    }
}

#[test]
fn header_bytes_are_big_endian() {
    let bytes = Envelope::new(0x0102_0304, b"x".to_vec()).to_bytes();
    assert_eq!(&bytes[..FLAGS_LEN], &[0x01, 0x02, 0x03, 0x04]);
}

#[test]
fn decode_rejects_inputs_shorter_than_header() {
    for len in 0..FLAGS_LEN {
        let error = Envelope::from_bytes(&vec![0xFF; len]).expect_err("short input accepted");
        assert_eq!(error.kind(), ErrorKind::MalformedEnvelope);
    }
}

#[test]
fn decode_accepts_exactly_the_header() {
    let decoded = Envelope::from_bytes(&[0, 0, 0, 9]).expect("header-only input rejected");
    assert_eq!(decoded.flags(), 9);
    assert!(decoded.payload().is_empty());
}

#[test]
fn decoded_payload_is_independently_owned() {
    let mut stored = Envelope::new(5, b"original".to_vec()).to_bytes();
    let decoded = Envelope::from_bytes(&stored).expect("decode failed");

    // Corrupt the source buffer after decoding.
    stored.iter_mut().for_each(|b| *b = 0);

    assert_eq!(decoded.into_payload(), b"original".to_vec());
}
