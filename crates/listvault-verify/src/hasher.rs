use md5::{Digest, Md5};

pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

pub struct Md5Hasher(Md5);

impl Hasher for Md5Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

impl Default for Md5Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5Hasher {
    pub fn new() -> Self { Self(Md5::new()) }

    /// Lowercase hex MD5 of `data`.
    pub fn hex_digest(data: &[u8]) -> String { hex::encode(Md5::digest(data)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hasher() {
        let mut hasher = Md5Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hex::encode(hasher.finalize()), Md5Hasher::hex_digest(b"hello world"));
    }

    #[test]
    fn test_hex_digest() {
        assert_eq!(
            Md5Hasher::hex_digest(b"hello world"),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
    }
}
