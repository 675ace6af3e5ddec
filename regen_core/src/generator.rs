//! Random string generation over a lowered syntax tree.
//!
//! # Example
//! ```
//! use regen_core::Generator;
//!
//! let mut generator = Generator::new(r"[a-z]{3}-\d{2}").unwrap();
//! let value = generator.generate();
//! assert_eq!(value.len(), 6);
//! ```

use crate::alphabet::Alphabet;
use crate::config::{CapturePolicy, GeneratorConfig};
use crate::error::Result;
use crate::tree::{self, Backreference, CharClass, Node};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Most recent value generated for each capture group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureStore {
    groups: HashMap<u32, String>,
}

impl CaptureStore {
    pub fn get(&self, index: u32) -> Option<&str> {
        self.groups.get(&index).map(String::as_str)
    }

    pub fn insert(&mut self, index: u32, value: String) {
        self.groups.insert(index, value);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Text for a `<gN>` directive.
    ///
    /// A stored value for `N` wins. Otherwise, when `N` is larger than the
    /// number of stored groups, the digits are read as an octal character
    /// code. Anything else resolves to the empty string.
    pub fn resolve(&self, backref: &Backreference) -> Resolved<'_> {
        let stored = u32::try_from(backref.index)
            .ok()
            .and_then(|index| self.get(index));
        if let Some(value) = stored {
            return Resolved::Group(value);
        }
        if backref.index > self.len() {
            return match backref.octal {
                Some(c) => Resolved::Octal(c),
                None => Resolved::InvalidOctal,
            };
        }
        Resolved::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Group(&'a str),
    Octal(char),
    /// Octal fallback applies but the digits do not form a character.
    InvalidOctal,
    Empty,
}

/// Generates random strings matching a pattern.
///
/// The capture store is owned by the generator. Whether it survives between
/// calls is decided by [`CapturePolicy`].
#[derive(Debug, Clone)]
pub struct Generator<R = StdRng> {
    root: Arc<Node>,
    captures: CaptureStore,
    rng: R,
    repeat_cap: u32,
    capture_policy: CapturePolicy,
}

impl Generator<StdRng> {
    /// Parses `pattern` with the default configuration and an OS-seeded
    /// random source.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_config(pattern, &GeneratorConfig::default())
    }

    /// Seeds from `config.seed` when set, otherwise from the OS.
    pub fn with_config(pattern: &str, config: &GeneratorConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(pattern, config, rng)
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(pattern: &str, config: &GeneratorConfig, rng: R) -> Result<Self> {
        let root = tree::parse(pattern, config)?;
        debug!(
            pattern = %pattern,
            captures = root.capture_count(),
            "Created generator"
        );
        Ok(Self::from_tree(root, config, rng))
    }

    /// Builds a generator over an already lowered (or hand-built) tree.
    pub fn from_tree(root: Node, config: &GeneratorConfig, rng: R) -> Self {
        Self {
            root: Arc::new(root),
            captures: CaptureStore::default(),
            rng,
            repeat_cap: config.repeat_cap,
            capture_policy: config.capture_policy,
        }
    }

    /// The lowered syntax tree this generator walks.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Values captured so far.
    pub fn captures(&self) -> &CaptureStore {
        &self.captures
    }

    pub fn reset_captures(&mut self) {
        self.captures.clear();
    }

    /// Produces one string from the pattern's language.
    ///
    /// Zero-width assertions are not honored, so patterns containing them
    /// may yield strings the original pattern rejects.
    pub fn generate(&mut self) -> String {
        if self.capture_policy == CapturePolicy::Reset {
            self.captures.clear();
        }
        let root = Arc::clone(&self.root);
        let mut out = String::new();
        self.emit(&root, &mut out);
        trace!(result_length = out.len(), "Generated string");
        out
    }

    fn emit(&mut self, node: &Node, out: &mut String) {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Backreference(backref) => self.emit_backreference(backref, out),
            Node::Class(class) => {
                if let Some(c) = self.sample_class(class) {
                    out.push(c);
                }
            }
            Node::AnyCharNoNewline => self.emit_from(Alphabet::PrintableNoNewline, out),
            Node::AnyChar => self.emit_from(Alphabet::Printable, out),
            Node::Capture { index, children } => {
                let start = out.len();
                self.emit_repeated(children, 1, out);
                self.captures.insert(*index, out[start..].to_string());
            }
            Node::Star(children) => {
                let count = self.rng.random_range(0..=self.repeat_cap);
                self.emit_repeated(children, count, out);
            }
            Node::Plus(children) => {
                let count = self.rng.random_range(1..=self.repeat_cap.max(1));
                self.emit_repeated(children, count, out);
            }
            Node::Quest(children) => {
                let count = self.rng.random_range(0..=1);
                self.emit_repeated(children, count, out);
            }
            Node::Repeat { min, max, children } => {
                let max = max.unwrap_or(self.repeat_cap).max(*min);
                let count = self.rng.random_range(*min..=max);
                self.emit_repeated(children, count, out);
            }
            Node::Concat(children) => self.emit_repeated(children, 1, out),
            Node::Alternate(children) => {
                if let Some(child) = children.choose(&mut self.rng) {
                    self.emit(child, out);
                }
            }
            Node::Unsupported(_) => {}
        }
    }

    /// Appends `count` passes over `children`, each pass in order.
    fn emit_repeated(&mut self, children: &[Node], count: u32, out: &mut String) {
        for _ in 0..count {
            for child in children {
                self.emit(child, out);
            }
        }
    }

    fn emit_backreference(&self, backref: &Backreference, out: &mut String) {
        match self.captures.resolve(backref) {
            Resolved::Group(value) => out.push_str(value),
            Resolved::Octal(c) => out.push(c),
            Resolved::InvalidOctal => {
                warn!(
                    digits = %backref.digits,
                    "Backreference falls back to octal but the digits are not a valid character code"
                );
            }
            Resolved::Empty => {}
        }
    }

    fn emit_from(&mut self, alphabet: Alphabet, out: &mut String) {
        if let Some(&c) = alphabet.chars().choose(&mut self.rng) {
            out.push(c);
        }
    }

    fn sample_class(&mut self, class: &CharClass) -> Option<char> {
        let candidates: Vec<char> = Alphabet::PrintableNoControl
            .chars()
            .iter()
            .copied()
            .filter(|&c| class.allows(c))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}

impl<R: Rng> Iterator for Generator<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.generate())
    }
}
