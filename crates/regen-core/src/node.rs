//! The regex tree that generation walks.
//!
//! Each variant carries only what its operator needs. The tree is built
//! once by [`crate::parse`] and is never modified afterwards.

use crate::range::RangeSet;

/// A node of a parsed regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches no strings.
    NoMatch,
    /// Matches the empty string.
    EmptyMatch,
    /// `^` in multi-line mode.
    BeginLine,
    /// `$` in multi-line mode.
    EndLine,
    /// `\A`, or `^` outside multi-line mode.
    BeginText,
    /// `\z`, or `$` outside multi-line mode.
    EndText,
    /// A fixed run of characters.
    Literal(String),
    /// One character out of a set.
    Class(RangeSet),
    /// `.` with `s` set.
    AnyChar,
    /// `.`
    AnyCharNotNewline,
    /// `\b`
    WordBoundary,
    /// `\B`
    NoWordBoundary,
    /// A capturing group.
    Capture {
        index: u32,
        name: Option<String>,
        sub: Box<Node>,
    },
    /// Zero or more repetitions of the body.
    Star(Vec<Node>),
    /// One or more repetitions of the body.
    Plus(Vec<Node>),
    /// Zero or one repetition of the body.
    Quest(Vec<Node>),
    /// Between `min` and `max` repetitions of the body; `max` of `None` is
    /// unbounded.
    Repeat {
        min: u32,
        max: Option<u32>,
        subs: Vec<Node>,
    },
    /// Each sub-expression in order.
    Concat(Vec<Node>),
    /// Exactly one of the sub-expressions.
    Alternate(Vec<Node>),
}

impl Node {
    /// The direct children of this node, in generation order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Capture { sub, .. } => std::slice::from_ref(sub.as_ref()),
            Node::Star(subs)
            | Node::Plus(subs)
            | Node::Quest(subs)
            | Node::Repeat { subs, .. }
            | Node::Concat(subs)
            | Node::Alternate(subs) => subs,
            Node::NoMatch
            | Node::EmptyMatch
            | Node::BeginLine
            | Node::EndLine
            | Node::BeginText
            | Node::EndText
            | Node::Literal(_)
            | Node::Class(_)
            | Node::AnyChar
            | Node::AnyCharNotNewline
            | Node::WordBoundary
            | Node::NoWordBoundary => &[],
        }
    }
}
