//! Syntax tree consumed by the generator.
//!
//! Patterns are parsed by `regex-syntax` and its `Hir` is lowered once into
//! [`Node`], a closed enum with one variant per construct the generator
//! knows about. Everything zero-width ends up in [`Node::Unsupported`].

use crate::config::GeneratorConfig;
use crate::error::Result;
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{self, Class, Hir, HirKind};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(String),
    /// Literal text of the exact form `<gN>`.
    Backreference(Backreference),
    Class(CharClass),
    AnyCharNoNewline,
    AnyChar,
    Capture {
        index: u32,
        children: Vec<Node>,
    },
    Star(Vec<Node>),
    Plus(Vec<Node>),
    Quest(Vec<Node>),
    Repeat {
        min: u32,
        /// `None` is unbounded.
        max: Option<u32>,
        children: Vec<Node>,
    },
    Concat(Vec<Node>),
    Alternate(Vec<Node>),
    Unsupported(ZeroWidth),
}

/// Constructs that always contribute an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroWidth {
    EmptyMatch,
    NoMatch,
    Assertion(hir::Look),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    /// Inclusive `(low, high)` pairs.
    pub ranges: Vec<(char, char)>,
    /// Sample the supported alphabet minus `ranges` instead of the
    /// intersection. Lowered classes never set this; their negation is
    /// already folded into `ranges`.
    pub negated: bool,
}

impl CharClass {
    pub fn new(ranges: Vec<(char, char)>) -> Self {
        Self {
            ranges,
            negated: false,
        }
    }

    pub fn negated(ranges: Vec<(char, char)>) -> Self {
        Self {
            ranges,
            negated: true,
        }
    }

    pub fn in_ranges(&self, c: char) -> bool {
        self.ranges.iter().any(|&(low, high)| low <= c && c <= high)
    }

    pub fn allows(&self, c: char) -> bool {
        self.in_ranges(c) != self.negated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backreference {
    /// Group index, base 10. Saturates at `usize::MAX`.
    pub index: usize,
    /// The same digits read as an octal character code. `None` when the
    /// digits contain 8 or 9 or the value is not a valid `char`.
    pub octal: Option<char>,
    pub digits: String,
}

impl Backreference {
    /// Recognizes `<g` + one or more ASCII digits + `>` and nothing else.
    pub fn parse(text: &str) -> Option<Backreference> {
        let digits = text.strip_prefix("<g")?.strip_suffix('>')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let index = digits.parse::<usize>().unwrap_or(usize::MAX);
        let octal = u32::from_str_radix(digits, 8)
            .ok()
            .and_then(char::from_u32);
        Some(Backreference {
            index,
            octal,
            digits: digits.to_string(),
        })
    }
}

impl Node {
    /// Number of capture groups anywhere in the tree.
    pub fn capture_count(&self) -> usize {
        match self {
            Node::Capture { children, .. } => {
                1 + children.iter().map(Node::capture_count).sum::<usize>()
            }
            Node::Star(children)
            | Node::Plus(children)
            | Node::Quest(children)
            | Node::Repeat { children, .. }
            | Node::Concat(children)
            | Node::Alternate(children) => children.iter().map(Node::capture_count).sum(),
            Node::Literal(_)
            | Node::Backreference(_)
            | Node::Class(_)
            | Node::AnyCharNoNewline
            | Node::AnyChar
            | Node::Unsupported(_) => 0,
        }
    }
}

/// Parses `pattern` with the configured flags and lowers it.
pub fn parse(pattern: &str, config: &GeneratorConfig) -> Result<Node> {
    let hir = ParserBuilder::new()
        .case_insensitive(config.case_insensitive)
        .dot_matches_new_line(config.dot_matches_new_line)
        .ignore_whitespace(config.ignore_whitespace)
        .nest_limit(config.nest_limit)
        .build()
        .parse(pattern)?;
    trace!(pattern = %pattern, hir = ?hir, "Pattern parsed");
    Ok(Node::from(&hir))
}

impl From<&Hir> for Node {
    fn from(hir: &Hir) -> Self {
        match hir.kind() {
            HirKind::Empty => Node::Unsupported(ZeroWidth::EmptyMatch),
            HirKind::Literal(hir::Literal(bytes)) => {
                let text = String::from_utf8_lossy(bytes);
                match Backreference::parse(&text) {
                    Some(backref) => Node::Backreference(backref),
                    None => Node::Literal(text.into_owned()),
                }
            }
            HirKind::Class(class) => lower_class(class),
            HirKind::Look(look) => Node::Unsupported(ZeroWidth::Assertion(*look)),
            HirKind::Repetition(rep) => {
                let children = vec![Node::from(&*rep.sub)];
                match (rep.min, rep.max) {
                    (0, None) => Node::Star(children),
                    (1, None) => Node::Plus(children),
                    (0, Some(1)) => Node::Quest(children),
                    (min, max) => Node::Repeat { min, max, children },
                }
            }
            HirKind::Capture(cap) => Node::Capture {
                index: cap.index,
                children: vec![Node::from(&*cap.sub)],
            },
            HirKind::Concat(subs) => Node::Concat(subs.iter().map(Node::from).collect()),
            HirKind::Alternation(subs) => Node::Alternate(subs.iter().map(Node::from).collect()),
        }
    }
}

fn lower_class(class: &Class) -> Node {
    let ranges: Vec<(char, char)> = match class {
        Class::Unicode(cls) => {
            let ranges: Vec<(char, char)> =
                cls.ranges().iter().map(|r| (r.start(), r.end())).collect();
            match ranges[..] {
                [('\0', '\u{10FFFF}')] => return Node::AnyChar,
                [('\0', '\t'), ('\u{0B}', '\u{10FFFF}')] => return Node::AnyCharNoNewline,
                _ => {}
            }
            ranges
        }
        Class::Bytes(cls) => {
            let bytes: Vec<(u8, u8)> = cls.ranges().iter().map(|r| (r.start(), r.end())).collect();
            // `(?s-u:.)` and `(?-u:.)`
            match bytes[..] {
                [(0x00, 0xFF)] => return Node::AnyChar,
                [(0x00, 0x09), (0x0B, 0xFF)] => return Node::AnyCharNoNewline,
                _ => {}
            }
            bytes
                .into_iter()
                .map(|(low, high)| (char::from(low), char::from(high)))
                .collect()
        }
    };

    if ranges.is_empty() {
        return Node::Unsupported(ZeroWidth::NoMatch);
    }
    Node::Class(CharClass::new(ranges))
}
