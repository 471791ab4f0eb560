//! Unit tests for the developer roster.
