//! Unit tests for the in-memory store mock
