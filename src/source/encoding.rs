//! Text encoding detection for source files.
//!
//! Detection runs in three steps, most reliable first:
//!
//! - Byte order mark (UTF-8, UTF-16LE, UTF-16BE)
//! - NUL byte parity, which exposes BOM-less UTF-16
//! - Statistical guess by `chardetng` over a bounded sample

use crate::error::{Result, SvError};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Block size used while sampling
const SAMPLE_BLOCK: usize = 8192;

/// Share of NUL bytes (in percent) on one parity that marks UTF-16
const UTF16_NUL_PERCENT: usize = 90;

/// Detect the encoding of the file at `path`
///
/// Reads at most `sample_limit` bytes through its own file handle; the caller's
/// decode reads are independent of this pass.
///
/// # Errors
/// * The file cannot be opened or read
pub fn detect_encoding(path: &Path, sample_limit: usize) -> Result<&'static Encoding> {
    let mut file = File::open(path).map_err(|e| {
        SvError::file_error(
            format!("Failed to open file for encoding detection: {}", path.display()),
            e,
        )
    })?;

    let mut block = vec![0u8; SAMPLE_BLOCK];
    let first_len = read_block(&mut file, &mut block, sample_limit)?;
    let first = &block[..first_len];

    if let Some(encoding) = detect_by_marks(first) {
        return Ok(encoding);
    }

    let mut detector = EncodingDetector::new();
    let mut ascii_only = first.is_ascii();
    let mut sampled = first_len;
    let mut last = first_len < SAMPLE_BLOCK || sampled >= sample_limit;
    detector.feed(first, last);

    while !last {
        let len = read_block(&mut file, &mut block, sample_limit - sampled)?;
        sampled += len;
        last = len < SAMPLE_BLOCK || sampled >= sample_limit;
        ascii_only &= block[..len].is_ascii();
        detector.feed(&block[..len], last);
    }

    Ok(settle_guess(&detector, ascii_only))
}

/// ASCII decodes the same under every candidate, so prefer UTF-8 for it
fn settle_guess(detector: &EncodingDetector, ascii_only: bool) -> &'static Encoding {
    if ascii_only {
        UTF_8
    } else {
        detector.guess(None, true)
    }
}

/// Fill `block` with up to `limit` bytes, retrying short reads
fn read_block(file: &mut File, block: &mut [u8], limit: usize) -> Result<usize> {
    let want = block.len().min(limit);
    let mut filled = 0;
    while filled < want {
        let n = file
            .read(&mut block[filled..want])
            .map_err(|e| SvError::file_error("Failed to read encoding sample", e))?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// BOM and UTF-16 parity checks
fn detect_by_marks(sample: &[u8]) -> Option<&'static Encoding> {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(sample) {
        return Some(encoding);
    }
    detect_utf16_by_parity(sample)
}

/// ASCII-heavy UTF-16 text has a NUL in every other byte
fn detect_utf16_by_parity(sample: &[u8]) -> Option<&'static Encoding> {
    let mut even = 0usize;
    let mut odd = 0usize;
    for idx in memchr::memchr_iter(0, sample) {
        if idx % 2 == 0 {
            even += 1;
        } else {
            odd += 1;
        }
    }

    let units = sample.len() / 2;
    if units == 0 || even + odd < units / 2 {
        return None;
    }

    if odd * 100 >= (even + odd) * UTF16_NUL_PERCENT {
        Some(UTF_16LE)
    } else if even * 100 >= (even + odd) * UTF16_NUL_PERCENT {
        Some(UTF_16BE)
    } else {
        None
    }
}
