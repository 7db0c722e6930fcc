//! Failures of wrapped streams and misuse surface through the adapters

use std::io::Cursor;

use dcrypt_stream_adapters::{
    BlockDecryptor, BlockEncryptor, IoReader, IoWriter, SliceReader, StreamDecryptor,
    StreamEncryptor, VecWriter,
};
use dcrypt_stream_api::stream::{read_to_end, write_all};
use dcrypt_stream_api::{Algorithm, Error, ErrorKind, ReadStream, StreamConfig};
use dcrypt_stream_cipher::{initialize_library, is_initialized, RustCryptoProvider};
use dcrypt_stream_tests::sinks::{CountingSource, FailingSink, FailingSource};
use dcrypt_stream_tests::{random_bytes, Material};

fn window(capacity: usize) -> StreamConfig {
    StreamConfig::new().with_window_capacity(capacity)
}

#[test]
fn initialization_is_idempotent() {
    initialize_library().unwrap();
    initialize_library().unwrap();
    assert!(is_initialized());
}

#[test]
fn block_encryptor_propagates_sink_failure() {
    let material = Material::random(Algorithm::Aes128, 1);
    let mut enc = BlockEncryptor::<_, RustCryptoProvider>::with_config(
        FailingSink::new(16),
        &material.spec(Algorithm::Aes128),
        &window(64),
    )
    .unwrap();
    enc.write_all(&[0u8; 20]).unwrap();
    let err = enc.write_all(&[0u8; 20]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(matches!(err, Error::Io { context: "failing sink", .. }));
}

#[test]
fn stream_encryptor_propagates_sink_failure() {
    let material = Material::random(Algorithm::ChaCha20, 2);
    let mut enc = StreamEncryptor::<_, RustCryptoProvider>::with_provider(
        FailingSink::new(10),
        &material.spec(Algorithm::ChaCha20),
    )
    .unwrap();
    write_all(&mut enc, &[1u8; 10]).unwrap();
    assert!(matches!(write_all(&mut enc, &[1u8; 1]), Err(Error::Io { .. })));
}

#[test]
fn decryptors_propagate_source_failure() {
    let material = Material::random(Algorithm::Aes256, 3);
    let spec = material.spec(Algorithm::Aes256);

    let mut dec = StreamDecryptor::<_, RustCryptoProvider>::with_config(
        FailingSource::new(vec![0u8; 10]),
        &spec,
        &window(64),
    )
    .unwrap();
    assert_eq!(dec.next_read().unwrap().map(<[u8]>::len), Some(10));
    dec.advance_read(10).unwrap();
    assert!(matches!(dec.next_read(), Err(Error::Io { context: "failing source", .. })));

    let mut dec = BlockDecryptor::<_, RustCryptoProvider>::with_config(
        FailingSource::new(vec![0u8; 48]),
        &spec,
        &window(64),
    )
    .unwrap();
    let mut out = Vec::new();
    assert!(matches!(dec.read_to_end(&mut out), Err(Error::Io { .. })));
}

#[test]
fn flushed_decryptor_never_pulls_its_source() {
    let material = Material::random(Algorithm::Aes128, 4);
    let spec = material.spec(Algorithm::Aes128);
    let plaintext = random_bytes(4, 50);

    let mut enc =
        BlockEncryptor::<_, RustCryptoProvider>::with_config(VecWriter::new(), &spec, &window(64)).unwrap();
    enc.write_all(&plaintext).unwrap();
    let ciphertext = enc.finish().unwrap().into_inner();

    let mut dec = BlockDecryptor::<_, RustCryptoProvider>::with_config(
        CountingSource::new(SliceReader::new(&ciphertext)),
        &spec,
        &window(64),
    )
    .unwrap();
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, plaintext);

    let pulls = dec.get_ref().pulls;
    assert!(dec.next_read().unwrap().is_none());
    assert!(dec.next_read().unwrap().is_none());
    assert_eq!(dec.get_ref().pulls, pulls);
}

#[test]
fn adapters_compose_with_std_io() {
    let material = Material::random(Algorithm::Aes192, 5);
    let spec = material.spec(Algorithm::Aes192);
    let plaintext = random_bytes(5, 5000);

    let mut enc = BlockEncryptor::<_, RustCryptoProvider>::with_config(
        IoWriter::with_capacity(Vec::new(), 100),
        &spec,
        &window(256),
    )
    .unwrap();
    enc.write_all(&plaintext).unwrap();
    let ciphertext = enc.finish().unwrap().into_inner().unwrap();
    assert_eq!(ciphertext.len(), 5008);

    let mut dec = BlockDecryptor::<_, RustCryptoProvider>::with_config(
        IoReader::with_capacity(Cursor::new(ciphertext), 77),
        &spec,
        &window(128),
    )
    .unwrap();
    let mut out = Vec::new();
    dec.read_to_end(&mut out).unwrap();
    assert_eq!(out, plaintext);
}

#[test]
fn stream_adapters_compose_with_std_io() {
    let material = Material::random(Algorithm::ChaCha20, 6);
    let spec = material.spec(Algorithm::ChaCha20);
    let plaintext = random_bytes(6, 3000);

    let mut enc = StreamEncryptor::<_, RustCryptoProvider>::with_provider(
        IoWriter::with_capacity(Vec::new(), 64),
        &spec,
    )
    .unwrap();
    write_all(&mut enc, &plaintext).unwrap();
    let ciphertext = enc.into_inner().into_inner().unwrap();

    let mut dec = StreamDecryptor::<_, RustCryptoProvider>::with_config(
        IoReader::with_capacity(ciphertext.as_slice(), 50),
        &spec,
        &window(32),
    )
    .unwrap();
    let mut out = Vec::new();
    read_to_end(&mut dec, &mut out).unwrap();
    assert_eq!(out, plaintext);
}
