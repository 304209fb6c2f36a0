//! Source-code splitting along declaration boundaries.
//!
//! The language grammar is selected from the detected extension through an
//! explicit mapping table; each language contributes the declaration markers
//! that make good chunk openers. Extensions absent from the table fall back
//! to a generic prose-style split at code sizes.

use super::engine::{leading, trailing, Tier, TierSplitter};
use super::Splitter;
use crate::types::Chunk;

const CHUNK_SIZE: usize = 1000;
const OVERLAP: usize = 100;

const PYTHON: &[Tier] = &[
    leading("\nclass "),
    leading("\ndef "),
    leading("\n\tdef "),
    trailing("\n\n"),
    trailing("\n"),
    trailing(" "),
];

const JS: &[Tier] = &[
    leading("\nfunction "),
    leading("\nconst "),
    leading("\nlet "),
    leading("\nvar "),
    leading("\nclass "),
    leading("\nif "),
    leading("\nfor "),
    leading("\nwhile "),
    leading("\nswitch "),
    leading("\ncase "),
    leading("\ndefault "),
    trailing("\n\n"),
    trailing("\n"),
    trailing(" "),
];

const GO: &[Tier] = &[
    leading("\nfunc "),
    leading("\nvar "),
    leading("\nconst "),
    leading("\ntype "),
    leading("\nif "),
    leading("\nfor "),
    leading("\nswitch "),
    leading("\ncase "),
    trailing("\n\n"),
    trailing("\n"),
    trailing(" "),
];

const JAVA: &[Tier] = &[
    leading("\nclass "),
    leading("\npublic "),
    leading("\nprotected "),
    leading("\nprivate "),
    leading("\nstatic "),
    leading("\nif "),
    leading("\nfor "),
    leading("\nwhile "),
    leading("\nswitch "),
    leading("\ncase "),
    trailing("\n\n"),
    trailing("\n"),
    trailing(" "),
];

const CPP: &[Tier] = &[
    leading("\nclass "),
    leading("\nvoid "),
    leading("\nint "),
    leading("\nfloat "),
    leading("\ndouble "),
    leading("\nif "),
    leading("\nfor "),
    leading("\nwhile "),
    leading("\nswitch "),
    leading("\ncase "),
    trailing("\n\n"),
    trailing("\n"),
    trailing(" "),
];

const RUST: &[Tier] = &[
    leading("\nfn "),
    leading("\nconst "),
    leading("\nlet "),
    leading("\nif "),
    leading("\nwhile "),
    leading("\nfor "),
    leading("\nloop "),
    leading("\nmatch "),
    trailing("\n\n"),
    trailing("\n"),
    trailing(" "),
];

/// Generic fallback for extensions without a language entry: prose-style
/// separators at code sizes.
const GENERIC: &[Tier] = &[
    trailing("\n\n"),
    trailing("\n"),
    trailing(". "),
    trailing("? "),
    trailing("! "),
];

/// Exhaustive extension-to-grammar table for the supported code extensions.
fn language_tiers(file_type: &str) -> Option<(&'static str, &'static [Tier])> {
    match file_type.to_ascii_lowercase().as_str() {
        ".py" => Some(("python", PYTHON)),
        ".ts" | ".js" => Some(("js", JS)),
        ".go" => Some(("go", GO)),
        ".java" => Some(("java", JAVA)),
        ".cpp" => Some(("cpp", CPP)),
        ".rs" => Some(("rust", RUST)),
        _ => None,
    }
}

/// Splitter for source code.
pub struct CodeSplitter;

impl Splitter for CodeSplitter {
    fn split(&self, file_type: &str, content: &str) -> Vec<Chunk> {
        let tiers = match language_tiers(file_type) {
            Some((language, tiers)) => {
                tracing::debug!(language, "language-aware code split");
                tiers
            }
            None => {
                tracing::debug!(file_type, "no grammar for extension, using generic split");
                GENERIC
            }
        };

        TierSplitter::new(tiers, CHUNK_SIZE, OVERLAP).split(content)
    }
}
