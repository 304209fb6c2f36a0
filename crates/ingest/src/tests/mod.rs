//! Crate-level tests spanning detection and splitting.
