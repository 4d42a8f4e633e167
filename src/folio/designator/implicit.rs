//! Implicit identifiers rendered from titles
//!
//!     A level without an authored identifier can still be linked to through its title. The
//!     title is flattened to plain text, then canonicalized into a string made only of ASCII
//!     letters, digits, `-` and `_`:
//!
//!     ```text
//!     Chapter 1: The Beginning   ->   Chapter1_TheBeginning
//!     Foo (bar) baz              ->   Foo_bar_baz
//!     Café crème                 ->   CafeCreme
//!     ```
//!
//!     Delimited blocks and punctuation become `_`, which also splits the string into implicit
//!     tags (`Chapter1`, `TheBeginning`). Words after a space are camel-cased. Changing any of
//!     these rules changes which titles collide, so they are kept identical to what renderers
//!     produce for anchors.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::tag::{tag_set, Tag};
use crate::folio::ast::{Node, NodeKind};

/// Renders a title node into an implicit identifier segment.
pub trait ImplicitRenderer: Send + Sync {
    /// `None` when the title renders to nothing usable.
    fn render(&self, title: &Node) -> Option<String>;
}

/// The rendering rules described in the module documentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalRenderer;

impl ImplicitRenderer for CanonicalRenderer {
    fn render(&self, title: &Node) -> Option<String> {
        let canonical = canonical_form(&textualize(title));
        if canonical.is_empty() {
            None
        } else {
            Some(canonical)
        }
    }
}

/// Implicit tags of a title: its rendering split on `_`.
pub fn implicit_tags(renderer: &dyn ImplicitRenderer, title: &Node) -> BTreeSet<Tag> {
    match renderer.render(title) {
        Some(rendered) => tag_set(rendered.split('_')),
        None => BTreeSet::new(),
    }
}

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.;?!:]+").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());
static LOW_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());
static WORD_BUT_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ([0-9a-zA-Z]+(?:-[0-9a-zA-Z]+)*)").unwrap());
static LEADING_HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A-+").unwrap());
static LEADING_LOW_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A_+").unwrap());
static TRAILING_HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+\z").unwrap());
static TRAILING_LOW_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+\z").unwrap());
static NOT_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z\-_]+").unwrap());
static NOT_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").unwrap());

/// Canonicalizes flattened title text. Each step feeds the next one; the order matters.
pub fn canonical_form(text: &str) -> String {
    let s = PUNCTUATION.replace_all(text, "_");
    let s = fold_diacritics(&s);
    let s = collapse(&s);
    // sequences that would fool camel-casing
    let s = s.replace(" _", "_").replace("_ ", "_");
    let s = WORD_BUT_FIRST
        .replace_all(&s, |captures: &Captures| first_to_upper_case(&captures[1]))
        .into_owned();
    let s = LEADING_HYPHENS.replace_all(&s, "");
    let s = LEADING_LOW_LINES.replace_all(&s, "");
    let s = TRAILING_HYPHENS.replace_all(&s, "");
    let s = TRAILING_LOW_LINES.replace_all(&s, "");
    let s = collapse(&s);
    let s = s.replace("-_", "_").replace("_-", "_");
    NOT_IDENTIFIER.replace_all(&s, "").into_owned()
}

fn collapse(text: &str) -> String {
    let s = SPACES.replace_all(text, " ");
    let s = HYPHENS.replace_all(&s, "-");
    LOW_LINES.replace_all(&s, "_").into_owned()
}

fn first_to_upper_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn as_literal(text: &str) -> String {
    NOT_ALPHANUMERIC.replace_all(text, "-").into_owned()
}

/// Decomposes to NFD and drops combining marks, so `Ş`, `ễ` and `ů` lose their accents.
/// Letters that have no decomposition go through [`fold_letter`].
fn fold_diacritics(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        match fold_letter(c) {
            Some(ascii) => folded.push_str(ascii),
            None => folded.push(c),
        }
    }
    folded
}

fn fold_letter(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ħ' => "h",
        'Ħ' => "H",
        'ı' => "i",
        'þ' => "th",
        'Þ' => "TH",
        _ => return None,
    };
    Some(ascii)
}

#[derive(Clone, Copy, PartialEq)]
enum Spacing {
    Start,
    AfterWord,
    Glued,
}

/// Flattens inline content to plain text: words separated by single spaces, punctuation
/// glued to the preceding word, delimited blocks wrapped in `_`.
pub fn textualize(node: &Node) -> String {
    let mut out = String::new();
    let mut spacing = Spacing::Start;
    write_children(node, &mut out, &mut spacing);
    out
}

fn write_children(node: &Node, out: &mut String, spacing: &mut Spacing) {
    for child in node.child_nodes() {
        write_node(child, out, spacing);
    }
}

fn write_word(word: &str, out: &mut String, spacing: &mut Spacing) {
    if *spacing == Spacing::AfterWord {
        out.push(' ');
    }
    out.push_str(word);
    *spacing = Spacing::AfterWord;
}

fn write_node(node: &Node, out: &mut String, spacing: &mut Spacing) {
    match node.kind() {
        NodeKind::Word | NodeKind::UrlLiteral => {
            write_word(node.text().unwrap_or_default(), out, spacing)
        }
        NodeKind::BlockOfLiteralInsideGraveAccents | NodeKind::LinesOfLiteral => {
            write_word(&as_literal(node.text().unwrap_or_default()), out, spacing)
        }
        NodeKind::ApostropheWordmate => {
            out.push_str(node.text().unwrap_or("'"));
            *spacing = Spacing::Glued;
        }
        NodeKind::PunctuationSign => {
            out.push_str(node.text().unwrap_or_default());
            *spacing = Spacing::AfterWord;
        }
        kind if kind.is_punctuation_sign() => {
            let sign = node.text().or(kind.sign_text()).unwrap_or_default();
            out.push_str(sign);
            *spacing = Spacing::AfterWord;
        }
        NodeKind::BlockInsideParenthesis
        | NodeKind::BlockInsideSquareBrackets
        | NodeKind::BlockInsideDoubleQuotes
        | NodeKind::BlockInsideHyphenPairs => {
            if *spacing == Spacing::AfterWord {
                out.push(' ');
            }
            out.push('_');
            let mut inner = Spacing::Start;
            write_children(node, out, &mut inner);
            out.push('_');
            *spacing = Spacing::AfterWord;
        }
        NodeKind::Whitespace
        | NodeKind::LineBreak
        | NodeKind::Tag
        | NodeKind::ExplicitTag
        | NodeKind::ImplicitTag
        | NodeKind::PromotedTag
        | NodeKind::AbsoluteIdentifier
        | NodeKind::RelativeIdentifier
        | NodeKind::ImplicitIdentifier
        | NodeKind::ExplicitIdentifier
        | NodeKind::CollidingExplicitIdentifier => {}
        _ => write_children(node, out, spacing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::testing::title;
    use rstest::rstest;

    #[rstest]
    #[case("hello world", "helloWorld")]
    #[case("Chapter 1: The Beginning", "Chapter1_TheBeginning")]
    #[case("Café crème", "CafeCreme")]
    #[case("What?", "What")]
    #[case("l'été", "lete")]
    #[case("One, two, three.", "One_two_three")]
    #[case("Déjà vu", "DejaVu")]
    #[case::turkish("Şişli", "Sisli")]
    #[case::turkish_dotted_capital("İstanbul", "Istanbul")]
    #[case::turkish_dotless("Kırmızı ışık", "KirmiziIsik")]
    #[case::vietnamese("Nguyễn Du", "NguyenDu")]
    #[case::vietnamese_stroke("Đà Nẵng", "DaNang")]
    #[case::czech("Příliš žluťoučký kůň", "PrilisZlutouckyKun")]
    #[case::ligatures("Straße Œuvre", "StrasseOEuvre")]
    fn test_renders_titles(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(
            CanonicalRenderer.render(&title(text)),
            Some(expected.to_string())
        );
    }

    #[rstest]
    #[case("?!")]
    #[case("...")]
    fn test_blank_rendering_is_none(#[case] text: &str) {
        assert_eq!(CanonicalRenderer.render(&title(text)), None);
    }

    #[test]
    fn test_delimited_block_becomes_low_line() {
        let node = Node::new(NodeKind::LevelTitle).with_children([
            Node::leaf(NodeKind::Word, "Foo"),
            Node::new(NodeKind::BlockInsideParenthesis)
                .with_child(Node::leaf(NodeKind::Word, "bar")),
            Node::leaf(NodeKind::Word, "baz"),
        ]);
        assert_eq!(textualize(&node), "Foo _bar_ baz");
        assert_eq!(CanonicalRenderer.render(&node), Some("Foo_bar_baz".into()));
    }

    #[test]
    fn test_literal_non_alphanumerics_become_hyphens() {
        let node = Node::new(NodeKind::LevelTitle).with_children([
            Node::leaf(NodeKind::Word, "Use"),
            Node::leaf(NodeKind::BlockOfLiteralInsideGraveAccents, "a+b"),
            Node::leaf(NodeKind::Word, "now"),
        ]);
        assert_eq!(CanonicalRenderer.render(&node), Some("UseA-bNow".into()));
    }

    #[test]
    fn test_implicit_tags_split_on_low_line() {
        let tags = implicit_tags(&CanonicalRenderer, &title("Chapter 1: The Beginning"));
        let names: Vec<&str> = tags.iter().map(Tag::name).collect();
        assert_eq!(names, ["Chapter1", "TheBeginning"]);
    }

    #[test]
    fn test_canonical_form_trims_and_collapses() {
        assert_eq!(canonical_form("__a--b__"), "a-b");
        assert_eq!(canonical_form("a -_ b"), "a_b");
    }
}
