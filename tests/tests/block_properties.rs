//! Property tests for the padded block adapters

use dcrypt_stream_adapters::{BlockDecryptor, BlockEncryptor, SliceReader, VecWriter};
use dcrypt_stream_api::{Algorithm, Error, Result, StreamConfig, WriteStream};
use dcrypt_stream_cipher::RustCryptoProvider;
use dcrypt_stream_tests::sinks::AlignmentRecorder;
use dcrypt_stream_tests::{random_bytes, Material, BLOCK_ALGORITHMS};
use proptest::prelude::*;

const B: usize = 16;

fn encrypt_chunked<W: WriteStream>(
    sink: W,
    material: &Material,
    algorithm: Algorithm,
    plaintext: &[u8],
    chunks: &[usize],
    window: usize,
) -> Result<W> {
    let config = StreamConfig::new().with_window_capacity(window);
    let mut enc =
        BlockEncryptor::<_, RustCryptoProvider>::with_config(sink, &material.spec(algorithm), &config)?;
    let mut rest = plaintext;
    let mut sizes = chunks.iter().cycle();
    while !rest.is_empty() {
        let n = sizes.next().copied().unwrap_or(rest.len()).clamp(1, rest.len());
        enc.write_all(&rest[..n])?;
        rest = &rest[n..];
    }
    enc.finish()
}

fn decrypt_chunked(
    material: &Material,
    algorithm: Algorithm,
    ciphertext: &[u8],
    max_span: usize,
    window: usize,
) -> Result<Vec<u8>> {
    let config = StreamConfig::new().with_window_capacity(window);
    let mut dec = BlockDecryptor::<_, RustCryptoProvider>::with_config(
        SliceReader::with_max_span(ciphertext, max_span),
        &material.spec(algorithm),
        &config,
    )?;
    let mut out = Vec::new();
    dec.read_to_end(&mut out)?;
    Ok(out)
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(BLOCK_ALGORITHMS.to_vec())
}

proptest! {
    #[test]
    fn round_trip_under_any_chunking(
        algorithm in algorithm(),
        seed in any::<u64>(),
        len in 0usize..700,
        chunks in prop::collection::vec(1usize..80, 1..8),
        sink_span in 1usize..100,
        read_span in 1usize..100,
        window in (2 * B)..300,
    ) {
        let material = Material::random(algorithm, seed);
        let plaintext = random_bytes(seed, len);

        let ciphertext = encrypt_chunked(
            VecWriter::with_span(sink_span),
            &material,
            algorithm,
            &plaintext,
            &chunks,
            window,
        ).unwrap().into_inner();
        prop_assert_eq!(ciphertext.len(), (len / B + 1) * B);

        let decrypted = decrypt_chunked(&material, algorithm, &ciphertext, read_span, window).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn chunking_does_not_change_ciphertext(
        seed in any::<u64>(),
        len in 0usize..300,
        chunks in prop::collection::vec(1usize..40, 1..6),
    ) {
        let material = Material::random(Algorithm::Aes256, seed);
        let plaintext = random_bytes(seed ^ 1, len);
        let chunked = encrypt_chunked(VecWriter::new(), &material, Algorithm::Aes256, &plaintext, &chunks, 48).unwrap();
        let whole = encrypt_chunked(VecWriter::new(), &material, Algorithm::Aes256, &plaintext, &[len.max(1)], 4096).unwrap();
        prop_assert_eq!(chunked.into_inner(), whole.into_inner());
    }
}

#[test]
fn boundary_lengths_round_trip() {
    let material = Material::random(Algorithm::Aes128, 7);
    for len in [0, B - 1, B, B + 1, 2 * B - 1, 2 * B, 2 * B + 1, 10 * B] {
        let plaintext = random_bytes(len as u64, len);
        let ciphertext = encrypt_chunked(VecWriter::new(), &material, Algorithm::Aes128, &plaintext, &[3], 2 * B)
            .unwrap()
            .into_inner();
        assert_eq!(ciphertext.len(), (len / B + 1) * B, "length {len}");
        for span in [1, B, B + 1] {
            assert_eq!(
                decrypt_chunked(&material, Algorithm::Aes128, &ciphertext, span, 2 * B).unwrap(),
                plaintext
            );
        }
    }
}

#[test]
fn sink_commits_are_block_aligned() {
    let material = Material::random(Algorithm::Aes192, 11);
    let plaintext = random_bytes(11, 1000);
    let recorder = encrypt_chunked(
        AlignmentRecorder::new(VecWriter::with_span(4096)),
        &material,
        Algorithm::Aes192,
        &plaintext,
        &[1, 7, 13, 31, 64],
        40,
    )
    .unwrap();
    assert!(!recorder.writes.is_empty());
    assert!(recorder.aligned_to(B));
}

/// Flips `delta` into byte `index` of the final plaintext block by
/// tampering with the preceding ciphertext block
fn tamper_last_block(ciphertext: &mut [u8], index: usize, delta: u8) {
    let prev = ciphertext.len() - 2 * B;
    ciphertext[prev + index] ^= delta;
}

#[test]
fn length_byte_beyond_block_is_corruption() {
    let material = Material::random(Algorithm::Aes128, 3);
    let plaintext = random_bytes(3, 20);
    let mut ciphertext = encrypt_chunked(VecWriter::new(), &material, Algorithm::Aes128, &plaintext, &[20], 64)
        .unwrap()
        .into_inner();
    // 20 bytes carry a 12 byte trailer; turn the length byte into B + 1.
    tamper_last_block(&mut ciphertext, B - 1, 12 ^ (B as u8 + 1));

    let err = decrypt_chunked(&material, Algorithm::Aes128, &ciphertext, 64, 64).unwrap_err();
    assert!(matches!(err, Error::Corrupted { .. }), "{err}");
    assert!(err.is_fatal());
}

#[test]
fn dirty_fill_byte_is_corruption() {
    let material = Material::random(Algorithm::Aes128, 5);
    let plaintext = random_bytes(5, 20);
    let mut ciphertext = encrypt_chunked(VecWriter::new(), &material, Algorithm::Aes128, &plaintext, &[20], 64)
        .unwrap()
        .into_inner();
    tamper_last_block(&mut ciphertext, B - 2, 0x01);

    let err = decrypt_chunked(&material, Algorithm::Aes128, &ciphertext, 64, 64).unwrap_err();
    assert!(matches!(err, Error::Corrupted { .. }), "{err}");
}

#[test]
fn plaintext_before_a_bad_tail_is_still_released() {
    let material = Material::random(Algorithm::Aes128, 9);
    let plaintext = random_bytes(9, 40);
    let mut ciphertext = encrypt_chunked(VecWriter::new(), &material, Algorithm::Aes128, &plaintext, &[40], 64)
        .unwrap()
        .into_inner();
    tamper_last_block(&mut ciphertext, B - 1, 0xFF);

    let mut dec = BlockDecryptor::<_, RustCryptoProvider>::with_config(
        SliceReader::new(&ciphertext),
        &material.spec(Algorithm::Aes128),
        &StreamConfig::new().with_window_capacity(64),
    )
    .unwrap();
    let mut out = Vec::new();
    assert!(dec.read_to_end(&mut out).is_err());
    // The tampered second block decrypts to garbage but is not the tail.
    assert_eq!(out.len(), 32);
    assert_eq!(out[..16], plaintext[..16]);
}
