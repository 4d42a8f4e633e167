//! Node kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a kind participates in tagging and identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagBehavior {
    /// Owns the tags declared directly under it and scopes nested content.
    Scope,
    /// Structural container, walked through.
    Traversable,
    /// Owns tags but contains no further structure.
    Terminal,
    /// Inline content; never walked into by structural passes.
    NonTraversable,
}

macro_rules! node_kinds {
    ( $( $variant:ident => $name:literal, $behavior:ident, $punctuation:literal; )* ) => {
        /// Closed enumeration of every node kind of the document tree.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum NodeKind {
            $( $variant, )*
        }

        impl NodeKind {
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$variant, )* ];

            /// SCREAMING_SNAKE_CASE name, identical to the serialized form.
            pub fn name(self) -> &'static str {
                match self {
                    $( NodeKind::$variant => $name, )*
                }
            }

            pub fn tag_behavior(self) -> TagBehavior {
                match self {
                    $( NodeKind::$variant => TagBehavior::$behavior, )*
                }
            }

            pub fn is_punctuation_sign(self) -> bool {
                match self {
                    $( NodeKind::$variant => $punctuation, )*
                }
            }
        }
    };
}

node_kinds! {
    Opus => "OPUS", Traversable, false;
    Novella => "NOVELLA", Traversable, false;
    ParagraphsInsideAngledBracketPairs => "PARAGRAPHS_INSIDE_ANGLED_BRACKET_PAIRS", Scope, false;
    Level => "LEVEL", Scope, false;
    LevelIntroducer => "LEVEL_INTRODUCER", NonTraversable, false;
    LevelIntroducerIndent => "LEVEL_INTRODUCER_INDENT", NonTraversable, false;
    LevelTitle => "LEVEL_TITLE", NonTraversable, false;
    ParagraphRegular => "PARAGRAPH_REGULAR", Terminal, false;
    ParagraphAsListItemWithTripleHyphen => "PARAGRAPH_AS_LIST_ITEM_WITH_TRIPLE_HYPHEN", Terminal, false;
    ListWithTripleHyphen => "LIST_WITH_TRIPLE_HYPHEN", Traversable, false;
    ParagraphAsListItem => "PARAGRAPH_AS_LIST_ITEM", NonTraversable, false;
    EmbeddedListItemWithHyphen => "EMBEDDED_LIST_ITEM_WITH_HYPHEN", NonTraversable, false;
    EmbeddedListWithHyphen => "EMBEDDED_LIST_WITH_HYPHEN", NonTraversable, false;
    EmbeddedListItem => "EMBEDDED_LIST_ITEM", NonTraversable, false;
    BlockInsideParenthesis => "BLOCK_INSIDE_PARENTHESIS", NonTraversable, false;
    BlockInsideSquareBrackets => "BLOCK_INSIDE_SQUARE_BRACKETS", NonTraversable, false;
    BlockInsideDoubleQuotes => "BLOCK_INSIDE_DOUBLE_QUOTES", NonTraversable, false;
    BlockInsideHyphenPairs => "BLOCK_INSIDE_HYPHEN_PAIRS", NonTraversable, false;
    BlockOfLiteralInsideGraveAccents => "BLOCK_OF_LITERAL_INSIDE_GRAVE_ACCENTS", NonTraversable, false;
    LinesOfLiteral => "LINES_OF_LITERAL", NonTraversable, false;
    UrlLiteral => "URL_LITERAL", NonTraversable, false;
    Word => "WORD", NonTraversable, false;
    Whitespace => "WHITESPACE", NonTraversable, false;
    LineBreak => "LINE_BREAK", NonTraversable, false;
    Tag => "TAG", NonTraversable, false;
    AbsoluteIdentifier => "ABSOLUTE_IDENTIFIER", NonTraversable, false;
    RelativeIdentifier => "RELATIVE_IDENTIFIER", NonTraversable, false;
    PunctuationSign => "PUNCTUATION_SIGN", NonTraversable, false;
    ApostropheWordmate => "APOSTROPHE_WORDMATE", NonTraversable, false;
    SignComma => "SIGN_COMMA", NonTraversable, true;
    SignFullstop => "SIGN_FULLSTOP", NonTraversable, true;
    SignEllipsis => "SIGN_ELLIPSIS", NonTraversable, true;
    SignQuestionmark => "SIGN_QUESTIONMARK", NonTraversable, true;
    SignExclamationmark => "SIGN_EXCLAMATIONMARK", NonTraversable, true;
    SignSemicolon => "SIGN_SEMICOLON", NonTraversable, true;
    SignColon => "SIGN_COLON", NonTraversable, true;
    Style => "STYLE", NonTraversable, false;
    PreservedWhitespace => "PRESERVED_WHITESPACE", NonTraversable, false;
    ImplicitIdentifier => "IMPLICIT_IDENTIFIER", NonTraversable, false;
    ExplicitIdentifier => "EXPLICIT_IDENTIFIER", NonTraversable, false;
    CollidingExplicitIdentifier => "COLLIDING_EXPLICIT_IDENTIFIER", NonTraversable, false;
    ImplicitTag => "IMPLICIT_TAG", NonTraversable, false;
    PromotedTag => "PROMOTED_TAG", NonTraversable, false;
    ExplicitTag => "EXPLICIT_TAG", NonTraversable, false;
}

impl NodeKind {
    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Literal text of a punctuation sign, `None` for other kinds.
    pub fn sign_text(self) -> Option<&'static str> {
        match self {
            NodeKind::SignComma => Some(","),
            NodeKind::SignFullstop => Some("."),
            NodeKind::SignEllipsis => Some("..."),
            NodeKind::SignQuestionmark => Some("?"),
            NodeKind::SignExclamationmark => Some("!"),
            NodeKind::SignSemicolon => Some(";"),
            NodeKind::SignColon => Some(":"),
            _ => None,
        }
    }

    pub fn is_identifier_marker(self) -> bool {
        matches!(
            self,
            NodeKind::ImplicitIdentifier
                | NodeKind::ExplicitIdentifier
                | NodeKind::CollidingExplicitIdentifier
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
