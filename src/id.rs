//! Record ID generation with date-based sequencing.
//!
//! IDs have the form `PREFIX-YYYY-MM-DD-SSS-XXX`: the record kind prefix,
//! the creation date, a base36 sequence within that date and kind, and a
//! random base36 suffix.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rand::Rng;
use std::fmt::{self, Display, Formatter};

use crate::record::RecordKind;

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new record ID for `kind` on `date`.
///
/// The sequence continues from the highest one found among `existing` IDs
/// with the same prefix and date.
pub fn generate_id<'a, I>(kind: RecordKind, date: NaiveDate, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let seq = next_sequence(kind, date, existing);
    RecordId {
        kind,
        date,
        sequence: seq,
        suffix: random_base36(3),
    }
    .to_string()
}

fn next_sequence<'a, I>(kind: RecordKind, date: NaiveDate, existing: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    existing
        .into_iter()
        .filter_map(|id| RecordId::parse(id).ok())
        .filter(|id| id.kind == kind && id.date == date)
        .map(|id| id.sequence)
        .max()
        .unwrap_or(0)
        + 1
}

/// Format a number as base36 with zero-padding.
pub fn format_base36(n: u32, width: usize) -> String {
    if n == 0 {
        return "0".repeat(width);
    }

    let mut result = Vec::new();
    let mut num = n;

    while num > 0 {
        let digit = (num % 36) as usize;
        result.push(BASE36_CHARS[digit] as char);
        num /= 36;
    }

    result.reverse();
    let s: String = result.into_iter().collect();

    if s.len() < width {
        format!("{:0>width$}", s, width = width)
    } else {
        s
    }
}

/// Parse a base36 string to a number.
fn parse_base36(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut result = 0u32;

    for c in s.chars() {
        let pos = BASE36_CHARS.iter().position(|&b| b as char == c)?;
        result = result.checked_mul(36)?.checked_add(pos as u32)?;
    }

    Some(result)
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36_CHARS[rng.gen_range(0..36)] as char)
        .collect()
}

/// A parsed record ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordId {
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub sequence: u32,
    pub suffix: String,
}

impl RecordId {
    pub fn parse(input: &str) -> Result<Self> {
        let (prefix, rest) = input
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid record ID '{}'", input))?;

        let kind = RecordKind::ALL
            .into_iter()
            .find(|k| k.id_prefix() == prefix)
            .ok_or_else(|| anyhow!("Unknown record prefix '{}' in '{}'", prefix, input))?;

        // rest: YYYY-MM-DD-SSS-XXX
        let parts: Vec<&str> = rest.split('-').collect();
        if parts.len() != 5 {
            return Err(anyhow!("Invalid record ID '{}'", input));
        }

        let date = NaiveDate::parse_from_str(&parts[..3].join("-"), "%Y-%m-%d")
            .map_err(|e| anyhow!("Invalid date in record ID '{}': {}", input, e))?;
        let sequence = parse_base36(parts[3])
            .ok_or_else(|| anyhow!("Invalid sequence in record ID '{}'", input))?;

        Ok(RecordId {
            kind,
            date,
            sequence,
            suffix: parts[4].to_string(),
        })
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.kind.id_prefix(),
            self.date.format("%Y-%m-%d"),
            format_base36(self.sequence, 3),
            self.suffix
        )
    }
}
