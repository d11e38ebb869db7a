/// Returns compressible synthetic data of the given size.
///
/// The output imitates retro-platform graphic tiles: short runs and small
/// repeating structures, which is the payload shape the codec is tuned for.
pub fn tile_data(size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(size);
    let mut tile = 0u32;
    while out.len() < size {
        let pattern = [
            (tile % 7) as u8,
            (tile % 7) as u8,
            0x00,
            0xFF,
            (tile % 3) as u8,
            (tile % 3) as u8,
            (tile % 3) as u8,
            0x00,
        ];
        let rem = size - out.len();
        out.extend_from_slice(&pattern[..pattern.len().min(rem)]);
        tile += 1;
    }
    out
}

/// Returns Latin-like text data of the given size (a different matching
/// profile: longer literals, mid-range offsets).
#[allow(dead_code)]
pub fn text_data(size: usize) -> Vec<u8> {
    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
        sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. \
        Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi \
        ut aliquip ex ea commodo consequat. ";

    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        let rem = size - out.len();
        let take = rem.min(LOREM.len());
        out.extend_from_slice(&LOREM[..take]);
    }
    out
}

/// Returns benchmark corpus chunks, each of exactly `chunk_size` bytes.
///
/// If the environment variable `DAN3_CORPUS_DIR` is set, files are read
/// from that directory and padded / truncated to `chunk_size`.  Otherwise
/// synthetic chunks are returned so that `cargo bench` always works without
/// any external corpus present.
#[allow(dead_code)]
pub fn corpus_chunks(chunk_size: usize) -> Vec<Vec<u8>> {
    use std::io::Read;

    if let Ok(dir) = std::env::var("DAN3_CORPUS_DIR") {
        let mut chunks = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if let Ok(mut f) = std::fs::File::open(&path) {
                    let mut buf = Vec::new();
                    if f.read_to_end(&mut buf).is_ok() && !buf.is_empty() {
                        let chunk = if buf.len() >= chunk_size {
                            buf[..chunk_size].to_vec()
                        } else {
                            // Pad by repeating the file content.
                            let mut c = buf.clone();
                            while c.len() < chunk_size {
                                let rem = chunk_size - c.len();
                                let take = rem.min(buf.len());
                                c.extend_from_slice(&buf[..take]);
                            }
                            c
                        };
                        chunks.push(chunk);
                    }
                }
            }
        }
        if !chunks.is_empty() {
            return chunks;
        }
    }

    // Synthetic fallback — always works, no external files required.
    vec![tile_data(chunk_size), text_data(chunk_size)]
}
