//! Character ranges used to pick random characters from classes.
//!
//! A [`RangeSet`] is an ordered list of inclusive [`Interval`]s. The
//! intervals are kept in insertion order and may overlap; overlapping
//! values are simply more likely to be picked.

use rand::Rng;
use std::fmt;

/// An inclusive range of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    min: char,
    max: char,
}

impl Interval {
    /// Create an interval covering both endpoints, in either order.
    pub fn new(a: char, b: char) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Create an interval holding exactly one character.
    pub fn single(c: char) -> Self {
        Self { min: c, max: c }
    }

    pub fn min(&self) -> char {
        self.min
    }

    pub fn max(&self) -> char {
        self.max
    }

    /// Whether `c` lies within the interval, bounds included.
    pub fn contains(&self, c: char) -> bool {
        self.min <= c && c <= self.max
    }

    /// Pick a character uniformly among those the interval spans.
    ///
    /// Surrogate code points are not characters, so an interval crossing
    /// the surrogate block never yields one.
    pub fn random_char<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        rng.random_range(self.min..=self.max)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// A union of character intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    intervals: Vec<Interval>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a flat list of `(start, end)` endpoint pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, char)>,
    {
        pairs.into_iter().map(|(a, b)| Interval::new(a, b)).collect()
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether any interval contains `c`.
    pub fn contains(&self, c: char) -> bool {
        self.intervals.iter().any(|interval| interval.contains(c))
    }

    /// Pick a random character from the set.
    ///
    /// The interval is chosen first, uniformly and regardless of its width,
    /// then a character is chosen uniformly within it. Returns `None` when
    /// the set is empty.
    pub fn random_char<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<char> {
        if self.intervals.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.intervals.len());
        Some(self.intervals[idx].random_char(rng))
    }
}

impl FromIterator<Interval> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for interval in &self.intervals {
            write!(f, "{interval}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ITERATIONS: usize = 100;

    fn digits() -> Interval {
        Interval::new('0', '9')
    }

    fn lowercase() -> Interval {
        Interval::new('a', 'z')
    }

    fn uppercase() -> Interval {
        Interval::new('A', 'Z')
    }

    fn graphical() -> Interval {
        Interval::new('!', '~')
    }

    fn alphanumeric() -> RangeSet {
        [lowercase(), uppercase(), digits()].into_iter().collect()
    }

    fn whitespace() -> RangeSet {
        RangeSet::from_pairs([('\t', '\t'), (' ', ' '), ('\n', '\r')])
    }

    fn punctuation() -> RangeSet {
        RangeSet::from_pairs([('!', '/'), (':', '@'), ('[', '`'), ('{', '~')])
    }

    #[test]
    fn test_interval_normalizes_endpoints() {
        let interval = Interval::new('z', 'a');
        assert_eq!(interval.min(), 'a');
        assert_eq!(interval.max(), 'z');
    }

    #[test]
    fn test_interval_random_char_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for interval in [digits(), lowercase(), uppercase(), graphical()] {
            for _ in 0..ITERATIONS {
                let c = interval.random_char(&mut rng);
                assert!(interval.contains(c), "{c:?} not in {interval}");
            }

            for c in interval.min()..=interval.max() {
                assert!(interval.contains(c), "{c:?} not in {interval}");
            }
        }
    }

    #[test]
    fn test_interval_contains_bounds_only() {
        let interval = digits();
        assert!(interval.contains('0'));
        assert!(interval.contains('9'));
        assert!(!interval.contains('/'));
        assert!(!interval.contains(':'));
    }

    #[test]
    fn test_interval_across_surrogates() {
        let mut rng = StdRng::seed_from_u64(7);
        let interval = Interval::new('\u{D7FE}', '\u{E001}');

        for _ in 0..ITERATIONS {
            let c = interval.random_char(&mut rng);
            assert!(interval.contains(c));
            assert!(!(0xD800..=0xDFFF).contains(&(c as u32)));
        }
    }

    #[test]
    fn test_range_set_random_char_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for set in [alphanumeric(), whitespace(), punctuation()] {
            for _ in 0..ITERATIONS {
                let c = set.random_char(&mut rng).unwrap();
                assert!(set.contains(c), "{c:?} not in {set}");
            }
        }
    }

    #[test]
    fn test_range_set_picks_intervals_uniformly() {
        let mut rng = StdRng::seed_from_u64(42);
        // One wide and one single-character interval: each is picked about
        // half of the time.
        let set = RangeSet::from_pairs([('a', 'z'), ('0', '0')]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.intervals()[1], Interval::single('0'));

        let zeros = (0..1000)
            .filter(|_| set.random_char(&mut rng) == Some('0'))
            .count();
        assert!((400..=600).contains(&zeros), "picked '0' {zeros} times");
    }

    #[test]
    fn test_empty_range_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let set = RangeSet::new();

        assert!(set.is_empty());
        assert!(!set.contains('a'));
        assert_eq!(set.random_char(&mut rng), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(alphanumeric().to_string(), "a-zA-Z0-9");
        assert_eq!(RangeSet::from_pairs([('x', 'x'), ('0', '3')]).to_string(), "x0-3");
        assert_eq!(RangeSet::new().to_string(), "");
    }
}
