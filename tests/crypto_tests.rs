//! Integration tests for the PassVault crypto module.

use passvault::crypto::kdf::MIN_MEMORY_KIB;
use passvault::crypto::{
    decrypt, derive_key, encrypt, generate_password, generate_salt, GeneratorOptions, KdfParams,
    MasterKey, SessionKey,
};
use passvault::errors::PassVaultError;

fn fast_kdf() -> KdfParams {
    KdfParams::argon2id(MIN_MEMORY_KIB)
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = MasterKey::new([0xAB; 32]);
    let header = b"PVLT-header";
    let plaintext = br#"{"entries":[{"title":"Bank"}]}"#;

    let sealed = encrypt(&key, header, plaintext).expect("encrypt should succeed");
    assert_eq!(sealed.ciphertext.len(), plaintext.len());

    let recovered = decrypt(&key, header, &sealed).expect("decrypt should succeed");
    assert_eq!(recovered.as_slice(), plaintext);
}

#[test]
fn encrypt_produces_different_output_each_time() {
    let key = MasterKey::new([0xCD; 32]);

    let a = encrypt(&key, b"", b"same").unwrap();
    let b = encrypt(&key, b"", b"same").unwrap();

    // Each call draws a new random nonce.
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a, b);
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let sealed = encrypt(&MasterKey::new([1; 32]), b"aad", b"secret").unwrap();
    assert!(matches!(
        decrypt(&MasterKey::new([2; 32]), b"aad", &sealed),
        Err(PassVaultError::AuthenticationFailed)
    ));
}

#[test]
fn decrypt_with_other_header_fails() {
    let key = MasterKey::new([3; 32]);
    let sealed = encrypt(&key, b"header-v1", b"secret").unwrap();
    assert!(decrypt(&key, b"header-v2", &sealed).is_err());
}

#[test]
fn decrypt_with_corrupted_tag_fails() {
    let key = MasterKey::new([4; 32]);
    let mut sealed = encrypt(&key, b"", b"secret").unwrap();
    sealed.tag[0] ^= 0xFF;
    assert!(matches!(
        decrypt(&key, b"", &sealed),
        Err(PassVaultError::AuthenticationFailed)
    ));
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = [7u8; 16];
    let a = derive_key(b"master1", &salt, &fast_kdf()).unwrap();
    let b = derive_key(b"master1", &salt, &fast_kdf()).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn derive_key_different_salts_different_keys() {
    let a = derive_key(b"master1", &generate_salt(), &fast_kdf()).unwrap();
    let b = derive_key(b"master1", &generate_salt(), &fast_kdf()).unwrap();
    assert_ne!(a.as_bytes(), b.as_bytes());
}

#[test]
fn derive_key_different_passwords_different_keys() {
    let salt = [9u8; 16];
    let a = derive_key(b"master1", &salt, &fast_kdf()).unwrap();
    let b = derive_key(b"master2", &salt, &fast_kdf()).unwrap();
    assert_ne!(a.as_bytes(), b.as_bytes());
}

#[test]
fn derive_key_rejects_weak_params() {
    let result = derive_key(b"pw", &[0u8; 16], &KdfParams::argon2id(1024));
    assert!(matches!(result, Err(PassVaultError::KeyDerivationFailed(_))));
}

// ---------------------------------------------------------------------------
// Session keys
// ---------------------------------------------------------------------------

#[test]
fn session_key_matches_only_its_password() {
    let session = SessionKey::generate(b"master1", fast_kdf()).unwrap();
    assert!(session.matches_password(b"master1").unwrap());
    assert!(!session.matches_password(b"master2").unwrap());
}

#[test]
fn session_key_debug_hides_key_material() {
    let session = SessionKey::generate(b"master1", fast_kdf()).unwrap();
    let shown = format!("{session:?}");
    assert!(!shown.contains(&format!("{:?}", session.key().as_bytes())));
}

// ---------------------------------------------------------------------------
// End-to-end: password -> key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let session = SessionKey::generate(b"correct horse", fast_kdf()).unwrap();
    let sealed = encrypt(session.key(), session.salt(), b"payload").unwrap();

    let again = SessionKey::derive(b"correct horse", *session.salt(), session.params()).unwrap();
    let plaintext = decrypt(again.key(), again.salt(), &sealed).unwrap();
    assert_eq!(plaintext.as_slice(), b"payload");
}

// ---------------------------------------------------------------------------
// Password generator
// ---------------------------------------------------------------------------

#[test]
fn generated_passwords_differ() {
    let opts = GeneratorOptions::default();
    let a = generate_password(&opts).unwrap();
    let b = generate_password(&opts).unwrap();
    assert_eq!(a.len(), opts.length);
    assert_ne!(a.as_str(), b.as_str());
}
