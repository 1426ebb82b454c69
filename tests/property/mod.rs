//! Property-based tests over randomly generated tree pairs
