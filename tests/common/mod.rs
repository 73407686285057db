//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A wiremock-backed service fixture
//! - Credential store doubles
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

pub use fixtures::*;
