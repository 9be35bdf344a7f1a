//! Common data and helpers shared across the marketing tools.
//!
//! Sector and platform lookups are case-insensitive; unknown sectors fall
//! back to generic lists.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Sectors with dedicated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    Tech,
    Fashion,
    Food,
}

impl Sector {
    /// Parse a user-supplied sector name (`tech`, `mode`, `alimentation`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "tech" => Some(Self::Tech),
            "mode" => Some(Self::Fashion),
            "alimentation" => Some(Self::Food),
            _ => None,
        }
    }
}

/// Pick `amount` distinct items at random (all of them if the list is shorter).
pub fn sample<'a>(items: &[&'a str], amount: usize, rng: &mut StdRng) -> Vec<&'a str> {
    items
        .choose_multiple(rng, amount.min(items.len()))
        .copied()
        .collect()
}

/// Append a numbered list (`1. item`) to `out`.
pub fn push_numbered(out: &mut String, items: &[&str]) {
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item));
    }
}

/// Format an integer with comma thousands separators (`12345` -> `12,345`).
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
