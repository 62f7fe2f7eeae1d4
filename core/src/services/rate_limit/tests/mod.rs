//! Unit tests for the rate limiter
