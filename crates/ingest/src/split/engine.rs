//! Recursive separator-tier splitting engine.
//!
//! Shared by the sized strategies (code, markdown, prose). The engine
//! partitions text at separator boundaries, recursing into finer tiers for
//! oversized pieces, then packs the pieces into chunks with an exact
//! character-count overlap carried between neighbors.
//!
//! Invariants:
//! - concatenating all chunks with the first `overlap` characters of every
//!   chunk but the first removed reproduces the input byte-for-byte
//! - no chunk exceeds `chunk_size` characters
//! - every chunk after the first starts with exactly the last `overlap`
//!   characters of its predecessor
//! - empty input yields no chunks; no chunk is ever empty

use crate::types::Chunk;

/// Where a separator attaches when a piece is cut around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// Separator ends the preceding piece (terminators: `\n\n`, `. `)
    Preceding,

    /// Separator begins the following piece (markers: `\n# `, `\ndef `)
    Following,
}

/// One separator tier. Tiers are tried in order; a tier that does not divide
/// a piece defers to the next one.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub sep: &'static str,
    pub attach: Attach,
}

/// Terminator-style tier: the separator stays with the text before it.
pub const fn trailing(sep: &'static str) -> Tier {
    Tier {
        sep,
        attach: Attach::Preceding,
    }
}

/// Marker-style tier: the separator opens the text after it.
pub const fn leading(sep: &'static str) -> Tier {
    Tier {
        sep,
        attach: Attach::Following,
    }
}

/// Character-budgeted splitter over an ordered list of separator tiers.
#[derive(Debug, Clone, Copy)]
pub struct TierSplitter {
    tiers: &'static [Tier],
    chunk_size: usize,
    overlap: usize,
}

impl TierSplitter {
    /// `overlap` must be strictly smaller than `chunk_size`.
    pub const fn new(tiers: &'static [Tier], chunk_size: usize, overlap: usize) -> Self {
        assert!(overlap < chunk_size);
        Self {
            tiers,
            chunk_size,
            overlap,
        }
    }

    /// Split `content` into overlapping chunks.
    pub fn split(&self, content: &str) -> Vec<Chunk> {
        if content.is_empty() {
            return Vec::new();
        }

        // Units are capped so that an overlap prefix plus any single unit
        // still fits within chunk_size.
        let unit_limit = self.chunk_size - self.overlap;

        let mut units = Vec::new();
        partition(content, self.tiers, unit_limit, &mut units);

        self.pack(&units)
    }

    /// Greedily pack units into chunks, carrying the overlap suffix of each
    /// closed chunk into the next.
    fn pack(&self, units: &[&str]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_chars = 0usize;

        for unit in units {
            let unit_chars = unit.chars().count();

            if current_chars > 0 && current_chars + unit_chars > self.chunk_size {
                let carry = tail_chars(&current, self.overlap);
                let carry_chars = carry.chars().count();
                chunks.push(Chunk::new(std::mem::replace(&mut current, carry)));
                current_chars = carry_chars;
            }

            current.push_str(unit);
            current_chars += unit_chars;
        }

        if !current.is_empty() {
            chunks.push(Chunk::new(current));
        }

        chunks
    }
}

/// Recursively partition `text` into units of at most `limit` characters,
/// cutting at the coarsest tier that divides each piece. Concatenating the
/// emitted units reproduces `text` exactly.
fn partition<'a>(text: &'a str, tiers: &[Tier], limit: usize, out: &mut Vec<&'a str>) {
    if text.is_empty() {
        return;
    }

    if text.chars().count() <= limit {
        out.push(text);
        return;
    }

    match tiers.split_first() {
        Some((tier, rest)) => {
            let pieces = cut(text, tier);
            if pieces.len() > 1 {
                for piece in pieces {
                    partition(piece, rest, limit, out);
                }
            } else {
                partition(text, rest, limit, out);
            }
        }
        None => hard_split(text, limit, out),
    }
}

/// Cut `text` around every occurrence of the tier's separator, keeping the
/// separator attached per the tier's attachment side. Never produces empty
/// pieces.
fn cut<'a>(text: &'a str, tier: &Tier) -> Vec<&'a str> {
    let mut positions = Vec::new();

    for (idx, matched) in text.match_indices(tier.sep) {
        let pos = match tier.attach {
            Attach::Following => idx,
            Attach::Preceding => idx + matched.len(),
        };
        if pos > 0 && pos < text.len() {
            positions.push(pos);
        }
    }

    let mut pieces = Vec::with_capacity(positions.len() + 1);
    let mut start = 0;
    for pos in positions {
        pieces.push(&text[start..pos]);
        start = pos;
    }
    pieces.push(&text[start..]);
    pieces
}

/// Last-resort split at character boundaries, for pieces no tier divides.
fn hard_split<'a>(text: &'a str, limit: usize, out: &mut Vec<&'a str>) {
    let mut remaining = text;
    while !remaining.is_empty() {
        let end = remaining
            .char_indices()
            .nth(limit)
            .map(|(idx, _)| idx)
            .unwrap_or(remaining.len());
        out.push(&remaining[..end]);
        remaining = &remaining[end..];
    }
}

/// Last `count` characters of `text`, as an owned string.
fn tail_chars(text: &str, count: usize) -> String {
    if count == 0 {
        return String::new();
    }

    let total = text.chars().count();
    if total <= count {
        return text.to_string();
    }

    let start = text
        .char_indices()
        .nth(total - count)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    text[start..].to_string()
}
