//! Compressed size measurement.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Length in bytes of `content` after gzip at maximum compression.
pub fn gzip_size(content: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(content.len() / 2), Compression::best());
    encoder.write_all(content)?;
    let compressed = encoder.finish()?;
    Ok(compressed.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn repetitive_content_shrinks() {
        let content = "function noop() {}\n".repeat(500);
        let size = gzip_size(content.as_bytes()).unwrap();
        assert!(size > 0);
        assert!(size < content.len() as u64 / 10);
    }

    #[test]
    fn size_matches_a_real_gzip_stream() {
        let content = b"var a = 1;";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(content).unwrap();
        let stream = encoder.finish().unwrap();

        assert_eq!(gzip_size(content).unwrap(), stream.len() as u64);

        let mut decoded = String::new();
        GzDecoder::new(stream.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded.as_bytes(), content);
    }
}
