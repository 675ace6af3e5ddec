//! Fixed character sets the generator samples from.
//!
//! The sets are deliberately narrower than the full codepoint space: `.` and
//! character classes only ever produce ASCII from the lists below.

use once_cell::sync::Lazy;

pub const DIGITS: &str = "0123456789";
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const PUNCTUATION: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
/// Filler control characters: tab, vertical tab, form feed, carriage return.
pub const CONTROL: &str = "\t\x0b\x0c\r";
pub const NEWLINE: &str = "\n";

static PRINTABLE: Lazy<Box<[char]>> =
    Lazy::new(|| collect(&[DIGITS, LETTERS, PUNCTUATION, CONTROL, NEWLINE]));
static PRINTABLE_NO_NEWLINE: Lazy<Box<[char]>> =
    Lazy::new(|| collect(&[DIGITS, LETTERS, PUNCTUATION, CONTROL]));
static PRINTABLE_NO_CONTROL: Lazy<Box<[char]>> =
    Lazy::new(|| collect(&[DIGITS, LETTERS, PUNCTUATION, NEWLINE]));

fn collect(parts: &[&str]) -> Box<[char]> {
    parts.iter().flat_map(|part| part.chars()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// Sampled by `(?s).`
    Printable,
    /// Sampled by `.`
    PrintableNoNewline,
    /// Candidate set for character classes. Control characters other than
    /// newline are left out.
    PrintableNoControl,
}

impl Alphabet {
    pub fn chars(self) -> &'static [char] {
        match self {
            Alphabet::Printable => &PRINTABLE,
            Alphabet::PrintableNoNewline => &PRINTABLE_NO_NEWLINE,
            Alphabet::PrintableNoControl => &PRINTABLE_NO_CONTROL,
        }
    }

    /// Whether `c` belongs to this set.
    pub fn contains(self, c: char) -> bool {
        self.chars().contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_sizes() {
        assert_eq!(PUNCTUATION.len(), 33);
        assert_eq!(Alphabet::Printable.chars().len(), 10 + 52 + 33 + 4 + 1);
        assert_eq!(Alphabet::PrintableNoNewline.chars().len(), 10 + 52 + 33 + 4);
        assert_eq!(Alphabet::PrintableNoControl.chars().len(), 10 + 52 + 33 + 1);
    }

    #[test]
    fn test_newline_membership() {
        assert!(Alphabet::Printable.contains('\n'));
        assert!(!Alphabet::PrintableNoNewline.contains('\n'));
        assert!(Alphabet::PrintableNoControl.contains('\n'));
    }

    #[test]
    fn test_control_only_outside_class_alphabet() {
        for c in CONTROL.chars() {
            assert!(Alphabet::Printable.contains(c));
            assert!(Alphabet::PrintableNoNewline.contains(c));
            assert!(!Alphabet::PrintableNoControl.contains(c));
        }
    }

    #[test]
    fn test_everything_is_ascii_and_unique() {
        let chars = Alphabet::Printable.chars();
        assert!(chars.iter().all(char::is_ascii));
        let mut sorted = chars.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), chars.len());
    }
}
