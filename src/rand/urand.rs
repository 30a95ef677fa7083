//! Buffered `/dev/urandom` reader.
//!
//! Bytes are handed out once: every byte copied to a caller is wiped from
//! the buffer, and the whole buffer is wiped before each refill and on drop.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

pub const URANDOM_PATH: &str = "/dev/urandom";

const BUF_SIZE: usize = 4096;

pub fn is_available() -> bool {
    Path::new(URANDOM_PATH).exists()
}

pub struct UrandomRng {
    file: File,
    buf: Box<[u8; BUF_SIZE]>,
    pos: usize,
}

impl UrandomRng {
    pub fn open() -> Result<Self, rand_core::Error> {
        Self::open_path(URANDOM_PATH)
    }

    pub(crate) fn open_path(path: impl AsRef<Path>) -> Result<Self, rand_core::Error> {
        let file = File::open(path).map_err(rand_core::Error::new)?;
        Ok(Self {
            file,
            buf: Box::new([0u8; BUF_SIZE]),
            pos: BUF_SIZE,
        })
    }

    #[cold]
    fn refill(&mut self) -> Result<(), rand_core::Error> {
        self.buf[..].zeroize();
        self.pos = BUF_SIZE;
        self.file
            .read_exact(&mut self.buf[..])
            .map_err(rand_core::Error::new)?;
        self.pos = 0;
        Ok(())
    }
}

impl RngCore for UrandomRng {
    fn next_u32(&mut self) -> u32 {
        let mut word = [0u8; 4];
        self.fill_bytes(&mut word);
        u32::from_le_bytes(word)
    }

    fn next_u64(&mut self) -> u64 {
        let mut word = [0u8; 8];
        self.fill_bytes(&mut word);
        u64::from_le_bytes(word)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("{URANDOM_PATH}: {e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let mut written = 0;
        while written < dest.len() {
            if self.pos == BUF_SIZE {
                self.refill()?;
            }
            let n = (BUF_SIZE - self.pos).min(dest.len() - written);
            let chunk = &mut self.buf[self.pos..self.pos + n];
            dest[written..written + n].copy_from_slice(chunk);
            chunk.zeroize();
            self.pos += n;
            written += n;
        }
        Ok(())
    }
}

impl CryptoRng for UrandomRng {}

impl Drop for UrandomRng {
    fn drop(&mut self) {
        self.buf[..].zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_device_is_an_error() {
        assert!(UrandomRng::open_path("/nonexistent/urandom").is_err());
    }

    #[test]
    fn short_source_fails_instead_of_repeating() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAB; 16]).unwrap();
        let mut rng = UrandomRng::open_path(file.path()).unwrap();
        let mut buf = [0u8; 8];
        assert!(rng.try_fill_bytes(&mut buf).is_err());
    }

    #[test]
    fn consumed_bytes_are_wiped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..BUF_SIZE).map(|i| (i % 251) as u8 + 1).collect();
        file.write_all(&data).unwrap();
        let mut rng = UrandomRng::open_path(file.path()).unwrap();

        let mut out = [0u8; 100];
        rng.try_fill_bytes(&mut out).unwrap();
        assert_eq!(&out[..], &data[..100]);
        assert!(rng.buf[..100].iter().all(|&b| b == 0));
        assert_eq!(rng.buf[100], data[100]);
    }

    #[cfg(unix)]
    #[test]
    fn reads_across_refills() {
        if !is_available() {
            return;
        }
        let mut rng = UrandomRng::open().unwrap();
        let mut big = vec![0u8; BUF_SIZE * 2 + 17];
        rng.try_fill_bytes(&mut big).unwrap();
        assert!(big.iter().any(|&b| b != 0));
    }
}
