use anyhow::{Context, Result};

/// Characters processed once the last `window` characters are pairwise distinct.
fn marker(stream: &[u8], window: usize) -> Option<usize> {
    stream
        .windows(window)
        .position(|w| {
            let mut seen = 0u128;
            w.iter().all(|&b| {
                let bit = 1u128 << (b & 0x7f);
                let fresh = seen & bit == 0;
                seen |= bit;
                fresh
            })
        })
        .map(|start| start + window)
}

pub fn day6(input: &str) -> Result<(usize, usize)> {
    let stream = input.trim().as_bytes();
    let packet = marker(stream, 4).context("no start-of-packet marker")?;
    let message = marker(stream, 14).context("no start-of-message marker")?;
    Ok((packet, message))
}
