//! Unit tests for the task tree engine.
