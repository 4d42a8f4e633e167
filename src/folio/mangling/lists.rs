//! List passes
//!
//!     Embedded lists (`- item` inside a paragraph) come out of the parser as flat
//!     `EMBEDDED_LIST_ITEM_WITH_HYPHEN` siblings interleaved with separators. The
//!     indentation before each item decides its nesting: same indentation appends to the
//!     current list, deeper indentation opens a sublist inside it, shallower indentation
//!     closes it. A line break resets the indentation count.
//!
//!     ```text
//!     - a             EMBEDDED_LIST_WITH_HYPHEN
//!       - b     -->     EMBEDDED_LIST_ITEM (a)
//!     - c               EMBEDDED_LIST_WITH_HYPHEN
//!                         EMBEDDED_LIST_ITEM (b)
//!                       EMBEDDED_LIST_ITEM (c)
//!     ```
//!
//!     Triple hyphen paragraphs (`--- item`) are block level: once separators are gone, each
//!     run of adjacent ones becomes a `LIST_WITH_TRIPLE_HYPHEN` of `PARAGRAPH_AS_LIST_ITEM`.

use crate::folio::ast::{Node, NodeKind};
use crate::folio::tree::edit;
use crate::folio::tree::error::TreeResult;
use crate::folio::tree::{Tree, Treepath};

/// Groups raw embedded list items under the end of `path` into nested lists.
pub fn rehierarchize_embedded_lists(path: &Treepath<Node>) -> TreeResult<Treepath<Node>> {
    rewrite_children_everywhere(path, &|children| {
        children
            .iter()
            .any(|child| child.is(NodeKind::EmbeddedListItemWithHyphen))
            .then(|| group_embedded_items(children))
    })
}

/// Groups runs of triple hyphen paragraphs under the end of `path` into lists.
pub fn rehierarchize_lists(path: &Treepath<Node>) -> TreeResult<Treepath<Node>> {
    rewrite_children_everywhere(path, &|children| {
        children
            .iter()
            .any(|child| child.is(NodeKind::ParagraphAsListItemWithTripleHyphen))
            .then(|| group_triple_hyphen_paragraphs(children))
    })
}

/// Offers the children of every node, top down, to `rewrite`. Nodes for which it returns
/// `None` are kept as they are.
fn rewrite_children_everywhere(
    path: &Treepath<Node>,
    rewrite: &dyn Fn(&[Node]) -> Option<Vec<Node>>,
) -> TreeResult<Treepath<Node>> {
    let mut path = path.clone();
    if let Some(children) = rewrite(path.tree_at_end().child_nodes()) {
        let rebuilt = path.tree_at_end().adopt(children);
        path = edit::replace_end(&path, rebuilt);
    }
    for index in 0..path.tree_at_end().child_count() {
        path = rewrite_children_everywhere(&path.child(index), rewrite)?.parent()?;
    }
    Ok(path)
}

fn group_embedded_items(children: &[Node]) -> Vec<Node> {
    let mut grouped = Vec::with_capacity(children.len());
    let mut index = 0;
    while index < children.len() {
        if !children[index].is(NodeKind::EmbeddedListItemWithHyphen) {
            grouped.push(children[index].clone());
            index += 1;
            continue;
        }

        let mut items = Vec::new();
        let mut indentation = indentation_before(children, index);
        let mut last_item = index;
        while index < children.len() {
            let child = &children[index];
            match child.kind() {
                NodeKind::EmbeddedListItemWithHyphen => {
                    items.push((indentation, child));
                    last_item = index;
                    indentation = 0;
                }
                NodeKind::Whitespace => indentation = width(child),
                NodeKind::LineBreak => indentation = 0,
                _ => break,
            }
            index += 1;
        }

        let mut cursor = 0;
        let first_indentation = items[0].0;
        grouped.push(build_embedded_list(&items, &mut cursor, first_indentation, true));
        // Separators after the last item belong to the surrounding text.
        grouped.extend(children[last_item + 1..index].iter().cloned());
    }
    grouped
}

fn indentation_before(children: &[Node], index: usize) -> usize {
    match index.checked_sub(1).map(|previous| &children[previous]) {
        Some(previous) if previous.is(NodeKind::Whitespace) => width(previous),
        _ => 0,
    }
}

fn width(whitespace: &Node) -> usize {
    whitespace.text().map_or(0, |text| text.chars().count())
}

/// Consumes items from `cursor` while they belong to the list at `indentation`. The
/// outermost list also takes items shallower than its first one.
fn build_embedded_list(
    items: &[(usize, &Node)],
    cursor: &mut usize,
    indentation: usize,
    outermost: bool,
) -> Node {
    let location = items[*cursor].1.location().cloned();
    let mut entries = Vec::new();
    while let Some(&(item_indentation, item)) = items.get(*cursor) {
        if item_indentation > indentation {
            entries.push(build_embedded_list(items, cursor, item_indentation, false));
        } else if item_indentation < indentation && !outermost {
            break;
        } else {
            entries.push(
                Node::new(NodeKind::EmbeddedListItem)
                    .with_optional_location(item.location().cloned())
                    .with_children(item.child_nodes().iter().cloned()),
            );
            *cursor += 1;
        }
    }
    Node::new(NodeKind::EmbeddedListWithHyphen)
        .with_optional_location(location)
        .with_children(entries)
}

fn group_triple_hyphen_paragraphs(children: &[Node]) -> Vec<Node> {
    let mut grouped: Vec<Node> = Vec::with_capacity(children.len());
    let mut run: Vec<Node> = Vec::new();
    for child in children {
        if child.is(NodeKind::ParagraphAsListItemWithTripleHyphen) {
            run.push(child.with_kind(NodeKind::ParagraphAsListItem));
        } else {
            flush_list(&mut run, &mut grouped);
            grouped.push(child.clone());
        }
    }
    flush_list(&mut run, &mut grouped);
    grouped
}

fn flush_list(run: &mut Vec<Node>, grouped: &mut Vec<Node>) {
    if run.is_empty() {
        return;
    }
    let location = run[0].location().cloned();
    grouped.push(
        Node::new(NodeKind::ListWithTripleHyphen)
            .with_optional_location(location)
            .with_children(std::mem::take(run)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folio::ast::Location;
    use crate::folio::testing::{
        assert_child_kinds, assert_shared, hyphen_item, line_break, novella, paragraph,
        triple_hyphen_item, whitespace, word,
    };

    fn raw_paragraph(children: impl IntoIterator<Item = Node>) -> Node {
        Node::new(NodeKind::ParagraphRegular).with_children(children)
    }

    fn item_words(item: &Node) -> Vec<&str> {
        item.child_nodes().iter().filter_map(Node::text).collect()
    }

    #[test]
    fn test_flat_embedded_list() {
        let root = novella([raw_paragraph([
            word("Intro"),
            line_break(),
            hyphen_item("one"),
            line_break(),
            hyphen_item("two"),
        ])]);
        let path = rehierarchize_embedded_lists(&Treepath::new(root)).unwrap();
        let paragraph = path.tree_at_end().child_at(0);
        assert_child_kinds(
            paragraph,
            &[
                NodeKind::Word,
                NodeKind::LineBreak,
                NodeKind::EmbeddedListWithHyphen,
            ],
        );
        let list = paragraph.child_at(2);
        assert_child_kinds(
            list,
            &[NodeKind::EmbeddedListItem, NodeKind::EmbeddedListItem],
        );
        assert_eq!(item_words(list.child_at(1)), ["two"]);
    }

    #[test]
    fn test_indented_items_open_a_sublist() {
        let root = novella([raw_paragraph([
            hyphen_item("a"),
            line_break(),
            whitespace(2),
            hyphen_item("b"),
            line_break(),
            whitespace(2),
            hyphen_item("c"),
            line_break(),
            hyphen_item("d"),
        ])]);
        let path = rehierarchize_embedded_lists(&Treepath::new(root)).unwrap();
        let list = path.tree_at_end().child_at(0).child_at(0);
        assert_child_kinds(
            list,
            &[
                NodeKind::EmbeddedListItem,
                NodeKind::EmbeddedListWithHyphen,
                NodeKind::EmbeddedListItem,
            ],
        );
        let sublist = list.child_at(1);
        assert_eq!(sublist.child_count(), 2);
        assert_eq!(item_words(sublist.child_at(1)), ["c"]);
        assert_eq!(item_words(list.child_at(2)), ["d"]);
    }

    #[test]
    fn test_text_after_list_is_kept() {
        let root = novella([raw_paragraph([
            hyphen_item("a"),
            line_break(),
            word("after"),
        ])]);
        let path = rehierarchize_embedded_lists(&Treepath::new(root)).unwrap();
        assert_child_kinds(
            path.tree_at_end().child_at(0),
            &[
                NodeKind::EmbeddedListWithHyphen,
                NodeKind::LineBreak,
                NodeKind::Word,
            ],
        );
    }

    #[test]
    fn test_triple_hyphen_runs_become_lists() {
        let first = triple_hyphen_item("first").with_location(Location::new(3, 1));
        let root = novella([
            paragraph("Before"),
            first,
            triple_hyphen_item("second"),
            paragraph("Between"),
            triple_hyphen_item("third"),
        ]);
        let path = rehierarchize_lists(&Treepath::new(root)).unwrap();
        let tree = path.tree_at_end();
        assert_child_kinds(
            tree,
            &[
                NodeKind::ParagraphRegular,
                NodeKind::ListWithTripleHyphen,
                NodeKind::ParagraphRegular,
                NodeKind::ListWithTripleHyphen,
            ],
        );
        let list = tree.child_at(1);
        assert_eq!(list.location(), Some(&Location::new(3, 1)));
        assert_child_kinds(
            list,
            &[NodeKind::ParagraphAsListItem, NodeKind::ParagraphAsListItem],
        );
    }

    #[test]
    fn test_untouched_documents_are_shared() {
        let root = novella([paragraph("Nothing to see")]);
        let path = rehierarchize_lists(&Treepath::new(root.clone())).unwrap();
        assert_shared(path.tree_at_end(), &root);
    }
}
