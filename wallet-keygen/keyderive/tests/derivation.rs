use std::collections::HashSet;

use keyderive::{DeriveError, Scheme, derive, derive_seed, derive_with};

const SECRET: &str = "saltABC";
const SUBJECT: &str = "wallet_address";

#[test]
fn test_fixed_vector() {
    let seed = derive_seed(SECRET, SUBJECT).unwrap();
    assert_eq!(
        hex::encode(seed.as_slice()),
        "5d9cecd5c9ccd7a863a70ffcfa7b6855d5ea24dc073f3c53c446163bbe9ce3bc"
    );

    let keypair = derive(SECRET, SUBJECT).unwrap();
    assert_eq!(
        hex::encode(keypair.public_key()),
        "64f65b4973794459589a577e978478adcaa6e695314d05370523fe9a88cac241"
    );
    assert_eq!(keypair.address(), "7o7edYFr7Bu9rHzEQiBKGz6o91PokVWAmQCpJpzSjzAt");
    assert_eq!(keypair.secret_seed().as_slice(), seed.as_slice());
}

#[test]
fn test_fixed_vector_length_prefixed() {
    let keypair = derive_with(Scheme::LengthPrefixed, SECRET, SUBJECT).unwrap();
    assert_eq!(
        hex::encode(keypair.secret_seed().as_slice()),
        "99966dd605522966195480a23f93e493f370506d84b9e07a28b4e12d9518590e"
    );
    assert_eq!(keypair.address(), "AG8hTfdaPQuWtVdb4DrYwMPyqJhgFn6mcnN7C3NK8dBo");
}

#[test]
fn test_deterministic() {
    let a = derive(SECRET, SUBJECT).unwrap();
    let b = derive(SECRET, SUBJECT).unwrap();
    assert_eq!(a.to_keypair_bytes(), b.to_keypair_bytes());
}

#[test]
fn test_subject_sensitivity() {
    assert_ne!(
        derive(SECRET, "a").unwrap().public_key(),
        derive(SECRET, "b").unwrap().public_key()
    );

    let keys: HashSet<[u8; 32]> = (0..1000)
        .map(|i| derive(SECRET, &format!("agent-{i}")).unwrap().public_key())
        .collect();
    assert_eq!(keys.len(), 1000);
}

#[test]
fn test_secret_sensitivity() {
    assert_ne!(
        derive("s1", SUBJECT).unwrap().public_key(),
        derive("s2", SUBJECT).unwrap().public_key()
    );
}

#[test]
fn test_invalid_arguments() {
    for (secret, subject) in [("", "x"), ("x", ""), ("", "")] {
        for scheme in [Scheme::Delimited, Scheme::LengthPrefixed] {
            match derive_with(scheme, secret, subject) {
                Err(DeriveError::InvalidArgument(_)) => {}
                other => {
                    panic!("expected InvalidArgument for {secret:?}/{subject:?}, got {other:?}")
                }
            }
        }
    }
}

#[test]
fn test_delimiter_ambiguity() {
    // Unescaped delimiter: both splits hash "a:b:c".
    assert_eq!(derive("a", "b:c").unwrap(), derive("a:b", "c").unwrap());
    assert_ne!(
        derive_with(Scheme::LengthPrefixed, "a", "b:c").unwrap(),
        derive_with(Scheme::LengthPrefixed, "a:b", "c").unwrap()
    );
}

#[test]
fn test_concurrent_matches_sequential() {
    let subjects: Vec<String> = (0..64).map(|i| format!("subject-{i}")).collect();
    let sequential: Vec<[u8; 32]> = subjects
        .iter()
        .map(|s| derive(SECRET, s).unwrap().public_key())
        .collect();

    let concurrent: Vec<[u8; 32]> = std::thread::scope(|scope| {
        let handles: Vec<_> = subjects
            .iter()
            .map(|s| scope.spawn(move || derive(SECRET, s).unwrap().public_key()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}
