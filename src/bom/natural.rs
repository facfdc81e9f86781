//! Natural ("human") ordering of designators.
//!
//! `R2` sorts before `R10`: strings are split into runs of ASCII digits and
//! runs of everything else, digit runs compare by numeric value and other
//! runs compare case-sensitively.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Split a string into alternating digit and non-digit runs.
fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        if let Some(prev) = in_digits {
            if prev != digit {
                out.push(make_chunk(&s[start..i], prev));
                start = i;
            }
        }
        in_digits = Some(digit);
    }

    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(s)
    } else {
        Chunk::Text(s)
    }
}

/// Compare two digit runs by value without parsing, so arbitrarily long
/// runs cannot overflow.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_chunk(a: &Chunk<'_>, b: &Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
        (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
    }
}

/// Natural comparison. Strings that are equal chunk-by-chunk (e.g. `R01`
/// and `R1`) fall back to plain lexical order so the result is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ca = chunks(a);
    let cb = chunks(b);

    for (x, y) in ca.iter().zip(cb.iter()) {
        match cmp_chunk(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    ca.len().cmp(&cb.len()).then_with(|| a.cmp(b))
}

/// Reorder a whitespace-separated designator list ("R1 R3 R2" → "R1 R2 R3").
pub fn sort_designators(list: &str) -> String {
    let mut designators: Vec<&str> = list.split_whitespace().collect();
    designators.sort_by(|a, b| natural_cmp(a, b));
    designators.join(" ")
}
