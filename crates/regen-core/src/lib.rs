//! Random string generation from regular expressions.
//!
//! This crate provides the [`Generator`], which parses a Perl-style regular
//! expression once and then produces random strings matching it. Every
//! point where the pattern allows a choice (classes, alternations,
//! repetitions) is decided by a seeded RNG, so the same seed reproduces the
//! same strings.
//!
//! # Architecture
//!
//! ```text
//! pattern text
//!        │  regex-syntax (parse + translate)
//!        ▼
//!      Node tree ──────────────┐
//!        │                     │ Class(RangeSet)
//!        ▼                     ▼
//! ┌─────────────────┐   ┌─────────────┐
//! │    Generator    │──▶│  RangeSet   │
//! │                 │   └─────────────┘
//! │  - root (Node)  │
//! │  - rng (StdRng) │
//! │  - limit        │
//! └────────┬────────┘
//!          │
//!          ▼
//!       String
//! ```
//!
//! # Example
//!
//! ```rust
//! use regen_core::Generator;
//!
//! let mut generator = Generator::new("[01]{5}").unwrap().with_seed(42);
//! let s = generator.generate();
//! assert_eq!(s.len(), 5);
//! assert!(s.chars().all(|c| c == '0' || c == '1'));
//! ```
//!
//! # Repetition limit
//!
//! `*`, `+` and open-ended `{n,}` repetitions are bounded by the generator's
//! limit (10 by default), as are `{n,m}` repetitions whose `m` exceeds it.
//! The limit never lowers a repetition below its minimum count.
//!
//! # Unsupported constructs
//!
//! `.` and word boundaries contribute nothing to the output, so strings
//! generated from patterns that use them may not match the pattern.

pub mod generator;
pub mod node;
pub mod parse;
pub mod range;

// Re-exports for convenience
pub use generator::{default_seed, Generator, Strings, DEFAULT_LIMIT};
pub use node::Node;
pub use parse::{parse, PatternError, MAX_REPEAT};
pub use range::{Interval, RangeSet};
