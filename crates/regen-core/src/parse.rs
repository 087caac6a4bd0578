//! Pattern parsing.
//!
//! Patterns are parsed with `regex-syntax` (Perl dialect) and lowered into
//! [`Node`] trees. The parser's AST keeps the operator kinds generation
//! cares about (`*` versus `{0,}`, `.` versus an explicit class), while its
//! translator supplies the flattened ranges of character classes.

use crate::node::Node;
use crate::range::{Interval, RangeSet};
use regex_syntax::ast::parse::ParserBuilder;
use regex_syntax::ast::{
    self, AssertionKind, Ast, Flag, FlagsItemKind, GroupKind, RepetitionKind, RepetitionRange,
};
use regex_syntax::hir::translate::TranslatorBuilder;
use regex_syntax::hir::{Class, HirKind};

/// Largest repetition count accepted, alone or multiplied through nesting.
pub const MAX_REPEAT: u32 = 1000;

/// Error returned when a pattern cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The parser rejected the pattern
    #[error(transparent)]
    Syntax(#[from] regex_syntax::Error),

    /// A repetition count, or the product of nested counts, exceeds [`MAX_REPEAT`]
    #[error("invalid repeat count: `{span}`")]
    RepeatTooLarge { span: String },
}

/// Parse `pattern` into a node tree.
///
/// The whole pattern is also run through the translator once, so errors
/// that only show up there (unknown Unicode classes, classes that could
/// match invalid UTF-8) are reported here rather than ignored.
pub fn parse(pattern: &str) -> Result<Node, PatternError> {
    let ast = ParserBuilder::new()
        .build()
        .parse(pattern)
        .map_err(regex_syntax::Error::from)?;
    TranslatorBuilder::new()
        .build()
        .translate(pattern, &ast)
        .map_err(regex_syntax::Error::from)?;

    Lowerer::new(pattern).lower(&ast)
}

/// Flags that change how the AST is lowered.
#[derive(Debug, Clone, Copy)]
struct Flags {
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    unicode: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            unicode: true,
        }
    }
}

impl Flags {
    fn apply(&mut self, flags: &ast::Flags) {
        let mut enable = true;
        for item in &flags.items {
            match item.kind {
                FlagsItemKind::Negation => enable = false,
                FlagsItemKind::Flag(Flag::CaseInsensitive) => self.case_insensitive = enable,
                FlagsItemKind::Flag(Flag::MultiLine) => self.multi_line = enable,
                FlagsItemKind::Flag(Flag::DotMatchesNewLine) => self.dot_matches_new_line = enable,
                FlagsItemKind::Flag(Flag::Unicode) => self.unicode = enable,
                // Greediness, CRLF mode and verbose mode do not affect output.
                FlagsItemKind::Flag(_) => {}
            }
        }
    }
}

/// Walks the AST depth-first, left to right, tracking flags the way the
/// translator does: set flags hold until the end of the enclosing group.
struct Lowerer<'p> {
    pattern: &'p str,
    flags: Flags,
}

impl<'p> Lowerer<'p> {
    fn new(pattern: &'p str) -> Self {
        Self {
            pattern,
            flags: Flags::default(),
        }
    }

    fn lower(&mut self, ast: &Ast) -> Result<Node, PatternError> {
        match ast {
            Ast::Empty(_) => Ok(Node::EmptyMatch),
            Ast::Flags(set) => {
                self.flags.apply(&set.flags);
                Ok(Node::EmptyMatch)
            }
            // Kept verbatim under `(?i)`: the written casing always matches.
            Ast::Literal(lit) => Ok(Node::Literal(lit.c.to_string())),
            Ast::Dot(_) => Ok(if self.flags.dot_matches_new_line {
                Node::AnyChar
            } else {
                Node::AnyCharNotNewline
            }),
            Ast::Assertion(assertion) => Ok(self.assertion(&assertion.kind)),
            Ast::ClassUnicode(_) | Ast::ClassPerl(_) | Ast::ClassBracketed(_) => {
                self.translate_leaf(ast)
            }
            Ast::Repetition(rep) => {
                let subs = vec![self.lower(&rep.ast)?];
                Ok(match &rep.op.kind {
                    RepetitionKind::ZeroOrOne => Node::Quest(subs),
                    RepetitionKind::ZeroOrMore => Node::Star(subs),
                    RepetitionKind::OneOrMore => Node::Plus(subs),
                    RepetitionKind::Range(range) => {
                        let (min, max) = match *range {
                            RepetitionRange::Exactly(n) => (n, Some(n)),
                            RepetitionRange::AtLeast(n) => (n, None),
                            RepetitionRange::Bounded(m, n) => (m, Some(n)),
                        };
                        let node = Node::Repeat { min, max, subs };
                        let largest = max.unwrap_or(min).max(min);
                        if largest > MAX_REPEAT
                            || (largest >= 2 && !repeat_fits(&node, MAX_REPEAT))
                        {
                            let span = &self.pattern[rep.span.start.offset..rep.span.end.offset];
                            return Err(PatternError::RepeatTooLarge {
                                span: span.to_string(),
                            });
                        }
                        node
                    }
                })
            }
            Ast::Group(group) => {
                let saved = self.flags;
                let node = match &group.kind {
                    GroupKind::CaptureIndex(index) => Node::Capture {
                        index: *index,
                        name: None,
                        sub: Box::new(self.lower(&group.ast)?),
                    },
                    GroupKind::CaptureName { name, .. } => Node::Capture {
                        index: name.index,
                        name: Some(name.name.clone()),
                        sub: Box::new(self.lower(&group.ast)?),
                    },
                    GroupKind::NonCapturing(flags) => {
                        self.flags.apply(flags);
                        self.lower(&group.ast)?
                    }
                };
                self.flags = saved;
                Ok(node)
            }
            Ast::Alternation(alt) => {
                let subs = alt
                    .asts
                    .iter()
                    .map(|ast| self.lower(ast))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Alternate(subs))
            }
            Ast::Concat(concat) => {
                let mut subs: Vec<Node> = Vec::with_capacity(concat.asts.len());
                for ast in &concat.asts {
                    match self.lower(ast)? {
                        Node::EmptyMatch => {}
                        Node::Literal(run) => match subs.last_mut() {
                            Some(Node::Literal(prev)) => prev.push_str(&run),
                            _ => subs.push(Node::Literal(run)),
                        },
                        node => subs.push(node),
                    }
                }
                if subs.len() <= 1 {
                    Ok(subs.pop().unwrap_or(Node::EmptyMatch))
                } else {
                    Ok(Node::Concat(subs))
                }
            }
        }
    }

    fn assertion(&self, kind: &AssertionKind) -> Node {
        match kind {
            AssertionKind::StartLine if self.flags.multi_line => Node::BeginLine,
            AssertionKind::StartLine | AssertionKind::StartText => Node::BeginText,
            AssertionKind::EndLine if self.flags.multi_line => Node::EndLine,
            AssertionKind::EndLine | AssertionKind::EndText => Node::EndText,
            AssertionKind::WordBoundary => Node::WordBoundary,
            AssertionKind::NotWordBoundary => Node::NoWordBoundary,
            // \b{start}, \b{end}, \<, \> and the half boundaries.
            _ => Node::WordBoundary,
        }
    }

    /// Translate a single class under the current flags and turn the result
    /// into a leaf node. A class holding one character comes back as a
    /// literal.
    fn translate_leaf(&self, ast: &Ast) -> Result<Node, PatternError> {
        let hir = TranslatorBuilder::new()
            .case_insensitive(self.flags.case_insensitive)
            .unicode(self.flags.unicode)
            .build()
            .translate(self.pattern, ast)
            .map_err(regex_syntax::Error::from)?;

        let set: RangeSet = match hir.kind() {
            HirKind::Literal(lit) => {
                return Ok(Node::Literal(String::from_utf8_lossy(&lit.0).into_owned()))
            }
            HirKind::Class(Class::Unicode(class)) => class
                .iter()
                .map(|range| Interval::new(range.start(), range.end()))
                .collect(),
            HirKind::Class(Class::Bytes(class)) => class
                .iter()
                .map(|range| Interval::new(char::from(range.start()), char::from(range.end())))
                .collect(),
            _ => return Ok(Node::EmptyMatch),
        };

        if set.is_empty() {
            Ok(Node::NoMatch)
        } else {
            Ok(Node::Class(set))
        }
    }
}

/// Whether the counts of nested repetitions multiply to at most `budget`.
///
/// Each repeat divides the budget by its largest count before its
/// children are checked, so `(a{1000}){1000}` fails while `(a{10}){10}`
/// passes.
fn repeat_fits(node: &Node, budget: u32) -> bool {
    let mut budget = budget;
    if let Node::Repeat { min, max, .. } = node {
        let largest = max.unwrap_or(*min);
        if largest > budget {
            return false;
        }
        if largest > 0 {
            budget /= largest;
        }
    }
    node.children().iter().all(|child| repeat_fits(child, budget))
}
