//! Unit tests for the code engine
