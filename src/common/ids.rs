//! Deterministic fingerprints for datasets recorded in artifact metadata.

/// 64-bit FNV-1a hash. Not cryptographic; only used to tell datasets apart.
#[derive(Copy, Clone, Debug)]
pub struct Fingerprint(u64);

impl Fingerprint {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    pub fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    /// Feed bytes into the hash function.
    pub fn update(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 = (self.0 ^ u64::from(*b)).wrapping_mul(Self::PRIME);
        }
    }

    pub fn finish(&self) -> u64 {
        self.0
    }

    /// 16-character lowercase hex rendering.
    pub fn finish_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_vectors() {
        assert_eq!(Fingerprint::new().finish(), 0xcbf2_9ce4_8422_2325);
        let mut fp = Fingerprint::new();
        fp.update(b"a");
        assert_eq!(fp.finish_hex(), "af63dc4c8601ec8c");
    }

    #[test]
    fn chunking_does_not_change_digest() {
        let mut whole = Fingerprint::new();
        whole.update(b"Pclass,Sex,Age");
        let mut parts = Fingerprint::new();
        parts.update(b"Pclass,");
        parts.update(b"Sex,Age");
        assert_eq!(whole.finish(), parts.finish());
    }
}
