//! Unit tests for the token engine

mod service_tests;
