//! Integration tests for tree comparison and purging

mod cli;
mod reconcile_invariants;
mod test_utils;
