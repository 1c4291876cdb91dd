use std::sync::LazyLock;

/// Number of symbols in the nucleotide alphabet.
pub const ALPHABET_SIZE: usize = 4;

/// Symbols in code order: `A=0, C=1, G=2, T=3`.
pub const SYMBOLS: &[u8; ALPHABET_SIZE] = b"ACGT";

const INVALID: u8 = 255;

static DNA_CODES: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [INVALID; 256];
    for (code, &b) in SYMBOLS.iter().enumerate() {
        map[b as usize] = code as u8;
        map[b.to_ascii_lowercase() as usize] = code as u8;
    }
    // be forgiving: read RNA as DNA
    map[b'U' as usize] = map[b'T' as usize];
    map[b'u' as usize] = map[b't' as usize];
    map
});

/// Code of a single nucleotide, or `None` for anything outside `ACGTU`.
#[inline]
pub fn encode_symbol(b: u8) -> Option<u8> {
    match DNA_CODES[b as usize] {
        INVALID => None,
        code => Some(code),
    }
}

#[inline]
pub fn decode_symbol(code: u8) -> u8 {
    SYMBOLS[code as usize]
}

/// Encode a nucleotide string. On failure returns the offending byte and its position.
pub fn encode(seq: &[u8]) -> Result<Vec<u8>, (u8, usize)> {
    let mut codes = Vec::with_capacity(seq.len());
    for (pos, &b) in seq.iter().enumerate() {
        match encode_symbol(b) {
            Some(code) => codes.push(code),
            None => return Err((b, pos)),
        }
    }
    Ok(codes)
}

pub fn decode(codes: &[u8]) -> Vec<u8> {
    codes.iter().map(|&c| decode_symbol(c)).collect()
}
