//! Random string generator driven by a parsed pattern.

use crate::node::Node;
use crate::parse::{parse, PatternError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Default bound on `*`, `+` and open-ended repetitions.
pub const DEFAULT_LIMIT: u32 = 10;

/// Seed derived from the wall clock, used when no seed is given.
pub fn default_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as i64)
        .unwrap_or(0)
}

/// Generator that produces random strings matching a pattern.
///
/// The generator owns its random source, so independent generators can be
/// used from different threads. A single generator needs `&mut self` to
/// generate and is not meant to be shared without external locking.
#[derive(Debug)]
pub struct Generator {
    /// Parsed pattern, read-only after construction
    root: Node,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Upper bound substituted for unbounded or oversized repetition counts
    limit: u32,
}

impl Generator {
    /// Create a generator for `pattern`, seeded from the clock.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let root = parse(pattern)?;
        debug!("Parsed pattern {pattern:?}");
        Ok(Self::from_node(root))
    }

    /// Create a generator over an already parsed tree.
    pub fn from_node(root: Node) -> Self {
        Self {
            root,
            rng: StdRng::seed_from_u64(default_seed() as u64),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Builder form of [`Generator::set_seed`].
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.set_seed(seed);
        self
    }

    /// Builder form of [`Generator::set_limit`].
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.set_limit(limit);
        self
    }

    /// Replace the random source with one derived from `seed`.
    ///
    /// Two generators for the same pattern produce the same sequence of
    /// strings after being seeded with the same value.
    /// Negative seeds are valid and distinct from their positive
    /// counterparts.
    pub fn set_seed(&mut self, seed: i64) {
        debug!("Seeding generator with {seed}");
        self.rng = StdRng::seed_from_u64(seed as u64);
    }

    /// Set the repetition limit.
    ///
    /// Negative values are ignored and the previous limit stays in effect.
    /// A limit of 0 makes every repetition produce its minimum count.
    pub fn set_limit(&mut self, limit: i64) {
        if limit < 0 {
            debug!("Ignoring negative repetition limit {limit}");
            return;
        }
        self.limit = u32::try_from(limit).unwrap_or(u32::MAX);
    }

    /// Get the repetition limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Get the parsed pattern.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Generate one random string.
    pub fn generate(&mut self) -> String {
        let mut out = String::new();
        emit(&self.root, &mut self.rng, self.limit, &mut out);
        out
    }

    /// Generate `count` strings lazily.
    pub fn strings(&mut self, count: u64) -> Strings<'_> {
        Strings {
            generator: self,
            remaining: count,
        }
    }
}

/// Append one random expansion of `node` to `out`.
///
/// Children are visited depth-first, left to right, so the sequence of
/// random draws depends only on the tree and the draws already made.
fn emit<R: Rng + ?Sized>(node: &Node, rng: &mut R, limit: u32, out: &mut String) {
    match node {
        Node::NoMatch
        | Node::EmptyMatch
        | Node::BeginLine
        | Node::EndLine
        | Node::BeginText
        | Node::EndText => {}

        Node::Literal(run) => out.push_str(run),

        Node::Class(set) => {
            if let Some(c) = set.random_char(rng) {
                out.push(c);
            }
        }

        // No character is chosen for `.`, and boundaries are not checked.
        Node::AnyChar | Node::AnyCharNotNewline | Node::WordBoundary | Node::NoWordBoundary => {}

        Node::Capture { sub, .. } => emit(sub, rng, limit, out),

        Node::Star(subs) => {
            let count = rng.random_range(0..=limit);
            emit_repeated(subs, count, rng, limit, out);
        }

        Node::Plus(subs) => {
            let count = rng.random_range(1..=limit.max(1));
            emit_repeated(subs, count, rng, limit, out);
        }

        Node::Quest(subs) => {
            if rng.random_bool(0.5) {
                emit_repeated(subs, 1, rng, limit, out);
            }
        }

        Node::Repeat { min, max, subs } => {
            let max = match *max {
                Some(max) if max <= limit => max,
                _ => limit,
            };
            let draw = if max > *min {
                rng.random_range(0..=max)
            } else {
                0
            };
            emit_repeated(subs, draw.max(*min), rng, limit, out);
        }

        Node::Concat(subs) => {
            for sub in subs {
                emit(sub, rng, limit, out);
            }
        }

        Node::Alternate(subs) => {
            if !subs.is_empty() {
                let idx = rng.random_range(0..subs.len());
                emit(&subs[idx], rng, limit, out);
            }
        }
    }
}

/// Emit every sub-expression in order, `count` times.
fn emit_repeated<R: Rng + ?Sized>(
    subs: &[Node],
    count: u32,
    rng: &mut R,
    limit: u32,
    out: &mut String,
) {
    for _ in 0..count {
        for sub in subs {
            emit(sub, rng, limit, out);
        }
    }
}

/// Iterator that lazily generates strings.
pub struct Strings<'a> {
    generator: &'a mut Generator,
    remaining: u64,
}

impl Iterator for Strings<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Strings<'_> {}
