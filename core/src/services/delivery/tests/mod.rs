//! Unit tests for the delivery orchestrator
