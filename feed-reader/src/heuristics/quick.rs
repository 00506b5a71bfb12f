use crate::traits::{Heuristic, Occurrences};
use crate::types::{EntityCategory, EntityOccurrence};
use std::collections::HashSet;
use std::iter::Peekable;

/// Lowercased words that are not entities when they open a sentence.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "it", "he", "she", "we", "they", "i",
    "you", "in", "on", "at", "but", "and", "or", "if", "when", "what", "why", "how", "there",
    "his", "her", "our", "their", "as", "of", "for", "to", "by", "with", "from",
];

/// Capitalization-based, offline, single pass.
///
/// Tokens starting with an uppercase letter are candidates. Candidates separated
/// only by spaces or tabs are coalesced into one name ("New York Times"); any
/// other delimiter ends the run. Every category is `Other`.
#[derive(Debug, Clone)]
pub struct QuickHeuristic {
    stopwords: HashSet<String>,
}

impl QuickHeuristic {
    pub const NAME: &'static str = "quick";

    pub fn new() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().copied())
    }

    /// Treats every capitalized token as a candidate, sentence-initial ones included.
    pub fn without_stopwords() -> Self {
        Self {
            stopwords: HashSet::new(),
        }
    }

    pub fn with_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn is_candidate(&self, token: &Token<'_>) -> bool {
        let starts_upper = token
            .text
            .chars()
            .next()
            .map(is_uppercase_letter)
            .unwrap_or(false);

        if !starts_upper {
            return false;
        }

        !(token.sentence_initial && self.stopwords.contains(&token.text.to_lowercase()))
    }
}

impl Default for QuickHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for QuickHeuristic {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn extract<'a>(&'a self, text: &'a str) -> Occurrences<'a> {
        Box::new(QuickScan {
            heuristic: self,
            tokens: Tokens::new(text).peekable(),
        })
    }
}

struct QuickScan<'a> {
    heuristic: &'a QuickHeuristic,
    tokens: Peekable<Tokens<'a>>,
}

impl Iterator for QuickScan<'_> {
    type Item = EntityOccurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.tokens.next()?;
            if !self.heuristic.is_candidate(&token) {
                continue;
            }

            let mut name = strip_possessive(token.text).to_string();
            let mut open = !is_possessive(token.text);

            while open {
                match self.tokens.peek() {
                    Some(next) if next.joined && self.heuristic.is_candidate(next) => {
                        name.push(' ');
                        name.push_str(strip_possessive(next.text));
                        open = !is_possessive(next.text);
                        self.tokens.next();
                    }
                    _ => break,
                }
            }

            return Some(EntityOccurrence::new(name, EntityCategory::Other));
        }
    }
}

/// A word plus what separated it from the previous word.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token<'a> {
    text: &'a str,
    /// First word of the text or of a sentence
    sentence_initial: bool,
    /// Only horizontal whitespace since the previous token
    joined: bool,
}

struct Tokens<'a> {
    text: &'a str,
    pos: usize,
    sentence_start: bool,
    broken: bool,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            sentence_start: true,
            broken: true,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let rest = &text[self.pos..];
        let mut chars = rest.char_indices().peekable();

        let start = loop {
            match chars.next() {
                None => {
                    self.pos = text.len();
                    return None;
                }
                Some((i, c)) if c.is_alphanumeric() => break i,
                Some((_, c)) => {
                    if is_sentence_end(c) {
                        self.sentence_start = true;
                    }
                    if !is_inline_space(c) {
                        self.broken = true;
                    }
                }
            }
        };

        let mut end = rest.len();
        while let Some(&(i, c)) = chars.peek() {
            if c.is_alphanumeric() {
                chars.next();
                continue;
            }
            if is_joiner(c) {
                let after = &rest[i + c.len_utf8()..];
                if after.chars().next().map(char::is_alphanumeric).unwrap_or(false) {
                    chars.next();
                    continue;
                }
            }
            end = i;
            break;
        }

        let token = Token {
            text: &rest[start..end],
            sentence_initial: self.sentence_start,
            joined: !self.broken,
        };

        self.pos += end;
        self.sentence_start = false;
        self.broken = false;

        Some(token)
    }
}

/// General category Lu. `char::is_uppercase` also accepts the
/// Other_Uppercase symbols: Roman numerals, circled and squared letters.
fn is_uppercase_letter(c: char) -> bool {
    c.is_uppercase()
        && !matches!(
            c,
            '\u{2160}'..='\u{216F}'
                | '\u{24B6}'..='\u{24CF}'
                | '\u{1F130}'..='\u{1F149}'
                | '\u{1F150}'..='\u{1F169}'
                | '\u{1F170}'..='\u{1F189}'
        )
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n' | '\u{2026}')
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\u{a0}'
}

fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

fn is_possessive(word: &str) -> bool {
    word.ends_with("'s") || word.ends_with("\u{2019}s")
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}
