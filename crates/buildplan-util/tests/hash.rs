use buildplan_util::hash::sha256_chunks;

#[test]
fn test_sha256_chunks_empty() {
    let hash = sha256_chunks(std::iter::empty::<&[u8]>());
    assert_eq!(
        hash,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_chunks_hello() {
    let hash = sha256_chunks([b"hello".as_slice()]);
    assert_eq!(
        hash,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn test_sha256_chunks_matches_concatenation() {
    let whole = sha256_chunks([b"helloworld".as_slice()]);
    let split = sha256_chunks([b"hello".as_slice(), b"world".as_slice()]);
    assert_eq!(whole, split);
}

#[test]
fn test_sha256_chunks_deterministic() {
    let a = sha256_chunks([b"build".as_slice(), b"plan".as_slice()]);
    let b = sha256_chunks([b"build".as_slice(), b"plan".as_slice()]);
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}
