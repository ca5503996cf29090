//! Spreadsheet column-letter arithmetic.

/// Zero-based index of the last column a worksheet can hold (`XFD`).
pub const MAX_COLUMN_INDEX: usize = 16_383;

/// Zero-based column index of a cell reference such as `"BC5"`.
///
/// The leading run of uppercase ASCII letters is read as a base-26 number
/// with digits `A=1..Z=26`. A reference without a letter prefix yields its
/// own length; callers must not rely on that value for malformed input.
pub fn column_index(reference: &str) -> usize {
    let letters = reference
        .bytes()
        .take_while(|b| b.is_ascii_uppercase())
        .map(|b| usize::from(b - b'A') + 1);

    let mut seen = false;
    let mut col = 0usize;
    for digit in letters {
        seen = true;
        col = col.saturating_mul(26).saturating_add(digit);
    }

    if seen {
        col - 1
    } else {
        reference.len()
    }
}

/// Column letters for a zero-based index (`0 -> "A"`, `26 -> "AA"`).
///
/// Defined for every `usize`, well past [`MAX_COLUMN_INDEX`].
pub fn column_letters(index: usize) -> String {
    let mut n = index;
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
