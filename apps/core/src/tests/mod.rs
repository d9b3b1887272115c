//! Test Module
//!
//! Cross-module test suites for Brandlens Core. Unit tests for individual
//! components live next to the code they cover.
//!
//! ## Test Categories
//! - `analysis_tests`: Mention analyzer and visibility score properties
//! - `coordinator_tests`: Fan-out isolation, ordering, timeouts, fallback chain
//! - `engine_tests`: End-to-end visibility queries over mock providers


pub mod analysis_tests;
