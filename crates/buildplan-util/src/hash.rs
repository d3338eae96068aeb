use sha2::{Digest, Sha256};

/// Hash several byte chunks as one stream, returning a lowercase hex string.
pub fn sha256_chunks<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = Sha256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    format!("{:x}", hasher.finalize())
}
