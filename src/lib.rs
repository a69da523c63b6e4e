use std::path::Path;

use anyhow::{Context, Result};

pub mod heightmap;
mod solutions;

pub use solutions::*;

/// Result is only correct if bytes represents a valid positive number without any additional
/// characters!
pub fn parse_u32_from_bytes(bytes: &[u8]) -> usize {
    let mut ret = 0;
    for b in bytes {
        ret = ret * 10 + (b - b'0') as usize;
    }
    ret
}

/// Reads `<dir>/<day>.txt`.
pub fn load_input(dir: &Path, day: usize) -> Result<String> {
    let path = dir.join(format!("{}.txt", day));
    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read input for day {} from {}", day, path.display()))
}

pub fn default_input(day: usize) -> Result<String> {
    load_input(Path::new("inputs"), day)
}
