//! Property-based tests for the line grammar, url decomposition and tree
//! insertion.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.
