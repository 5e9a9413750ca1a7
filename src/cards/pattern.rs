//! Pattern label generation for new boards.

use super::card::PatternId;

/// Spreadsheet-style label for index `n`: `A`..`Z`, `AA`, `AB`, ...
#[must_use]
pub fn label_for(mut n: usize) -> PatternId {
    let mut bytes = Vec::new();
    loop {
        bytes.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    bytes.reverse();
    PatternId(bytes.into_iter().map(char::from).collect())
}

/// Generate `count` distinct labels.
#[must_use]
pub fn generate(count: usize) -> Vec<PatternId> {
    (0..count).map(label_for).collect()
}

/// Resolve the labels for `needed` pairs.
///
/// Supplied patterns shorter than `needed` are repeated cyclically, so a
/// label may then appear on more than two cards. `None` or an empty list
/// falls back to generated labels.
#[must_use]
pub fn resolve(supplied: Option<&[PatternId]>, needed: usize) -> Vec<PatternId> {
    match supplied {
        Some(patterns) if !patterns.is_empty() => {
            patterns.iter().cycle().take(needed).cloned().collect()
        }
        _ => generate(needed),
    }
}
