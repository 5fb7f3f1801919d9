//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Fixed-size memory pools
//! - Pausable timers
//! - Seeded random numbers and prime-stride index shuffling
//! - String helpers
//! - Logging setup

pub mod math;
pub mod memory;
pub mod time;
pub mod random;
pub mod prime_search;
pub mod strings;
pub mod utils;
pub mod logging;
