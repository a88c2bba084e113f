//! Six-bit character packing and the SLIP `HASH` function.
//!
//! The memory rule picks one of its four transformations by hashing the
//! last word of the sentence that triggered it. The word's final chunk of
//! up to six characters is packed into a 36-bit machine word using the
//! IBM 7090 BCD character codes, and the middle bits of its square select
//! the slot.

/// BCD code for a blank. Characters outside the table encode as blanks.
const BLANK: u64 = 0o60;

/// Characters per 36-bit machine word.
const CHUNK: usize = 6;

/// The IBM 7090 BCD code for a character.
pub fn bcd(ch: char) -> u64 {
    let ch = ch.to_ascii_uppercase();
    let offset = |base: char| u64::from(ch) - u64::from(base);
    match ch {
        '0'..='9' => offset('0'),
        '=' => 0o13,
        '\'' => 0o14,
        '+' => 0o20,
        'A'..='I' => 0o21 + offset('A'),
        '.' => 0o33,
        ')' => 0o34,
        '-' => 0o40,
        'J'..='R' => 0o41 + offset('J'),
        '$' => 0o53,
        '*' => 0o54,
        ' ' => BLANK,
        '/' => 0o61,
        'S'..='Z' => 0o62 + offset('S'),
        ',' => 0o73,
        '(' => 0o74,
        _ => BLANK,
    }
}

/// Pack the last chunk of `word` into a 36-bit datum.
///
/// Words are split into six-character chunks from the left; the final,
/// possibly short, chunk is right-padded with blanks.
pub fn last_chunk(word: &str) -> u64 {
    let chars: Vec<char> = word.chars().collect();
    let start = chars.len().saturating_sub(1) / CHUNK * CHUNK;
    let tail = &chars[start..];
    (0..CHUNK).fold(0, |datum, i| {
        let code = tail.get(i).copied().map_or(BLANK, bcd);
        (datum << 6) | code
    })
}

/// SLIP `HASH(D, N)`: square the datum, ignoring its sign bit, and take
/// `bits` bits from the middle of the product.
pub fn hash(datum: u64, bits: u32) -> usize {
    let magnitude = u128::from(datum & 0o377_777_777_777);
    let square = magnitude * magnitude;
    let middle = square >> (35 - bits / 2);
    (middle & ((1 << bits) - 1)) as usize
}

/// The memory slot selected by a sentence's last word.
pub fn memory_slot(word: &str) -> usize {
    hash(last_chunk(word), 2)
}
