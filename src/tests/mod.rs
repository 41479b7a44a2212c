//! Tests for the codec core.

#[cfg(test)]
mod field_presence_tests;
