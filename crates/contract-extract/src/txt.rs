//! Plain-text uploads

/// Decode bytes as UTF-8, silently dropping undecodable sequences
pub fn extract_txt(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
