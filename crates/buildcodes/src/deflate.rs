//! Raw deflate streams (no zlib header or checksum).

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use crate::error::BuildCodeError;

pub const LEVEL: u32 = 9;

pub fn compress(bytes: &[u8]) -> Result<Vec<u8>, BuildCodeError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(LEVEL));
    encoder.write_all(bytes).map_err(BuildCodeError::Deflate)?;
    encoder.finish().map_err(BuildCodeError::Deflate)
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, BuildCodeError> {
    let mut out = Vec::new();
    DeflateDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(BuildCodeError::Inflate)?;
    Ok(out)
}
