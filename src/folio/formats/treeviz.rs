//! Treeviz formatter for document trees
//!
//! One line per node, nesting drawn with box connectors, so a tree can be scanned at a
//! glance:
//!
//!     <prefix><connector> <icon> <KIND> <text, truncated to 30 characters>
//!
//! Icons
//!     Roots:
//!         Opus: ⧉
//!         Novella: ▤
//!     Structure:
//!         Level: §
//!         LevelTitle: ⊤
//!         Paragraph: ¶
//!         List: ☰
//!         ListItem: •
//!         Block: ❲
//!         Literal: 𝒱
//!     Markers:
//!         Identifier: ⌖
//!         Tag: #
//!     Spans:
//!         Word: ◦
//!         everything else: ○

use super::snapshot::TreeSnapshot;
use crate::folio::ast::{Node, NodeKind};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(kind: NodeKind) -> &'static str {
    use NodeKind::*;
    match kind {
        Opus => "⧉",
        Novella => "▤",
        Level => "§",
        LevelTitle => "⊤",
        ParagraphRegular | ParagraphAsListItem | ParagraphAsListItemWithTripleHyphen => "¶",
        ListWithTripleHyphen | EmbeddedListWithHyphen => "☰",
        EmbeddedListItem | EmbeddedListItemWithHyphen => "•",
        BlockInsideParenthesis
        | BlockInsideSquareBrackets
        | BlockInsideDoubleQuotes
        | BlockInsideHyphenPairs
        | ParagraphsInsideAngledBracketPairs => "❲",
        BlockOfLiteralInsideGraveAccents | LinesOfLiteral => "𝒱",
        AbsoluteIdentifier
        | RelativeIdentifier
        | ImplicitIdentifier
        | ExplicitIdentifier
        | CollidingExplicitIdentifier => "⌖",
        Tag | ImplicitTag | PromotedTag | ExplicitTag => "#",
        Word => "◦",
        _ => "○",
    }
}

fn label(snapshot: &TreeSnapshot) -> String {
    match &snapshot.text {
        Some(text) => format!("{} {}", snapshot.kind, truncate(text, 30)),
        None => snapshot.kind.to_string(),
    }
}

fn format_snapshot(
    snapshot: &TreeSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(snapshot.kind),
        label(snapshot)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }

    output
}

pub fn to_treeviz_str(node: &Node) -> String {
    let snapshot = TreeSnapshot::of(node);
    let mut output = format!("{} {}\n", get_icon(snapshot.kind), label(&snapshot));

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::testing::{novella, paragraph, titled_level};

    #[test]
    fn test_nested_tree() {
        let node = novella([titled_level("Intro", [paragraph("Hello")])]);
        insta::assert_snapshot!(to_treeviz_str(&node), @r"
        ▤ NOVELLA
        └─ § LEVEL
          ├─ ⊤ LEVEL_TITLE
          │ └─ ◦ WORD Intro
          └─ ¶ PARAGRAPH_REGULAR
            └─ ◦ WORD Hello
        ");
    }

    #[test]
    fn test_long_text_is_truncated() {
        let node = Node::leaf(NodeKind::Word, "a".repeat(40));
        assert_eq!(to_treeviz_str(&node), format!("◦ WORD {}…\n", "a".repeat(30)));
    }
}
