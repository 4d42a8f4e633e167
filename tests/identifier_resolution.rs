//! Identifier resolution over whole documents and books

use folio::folio::ast::{Location, Node, NodeKind};
use folio::folio::designator::{CanonicalRenderer, FragmentIdentifier, Problem, Resolution};
use folio::folio::formats::read_notation;
use folio::folio::pipeline::Pipeline;
use folio::folio::testing::{absolute, level, novella, titled_level};
use folio::folio::tree::{Tree, Treepath};

fn id(text: &str) -> FragmentIdentifier {
    FragmentIdentifier::parse(text).unwrap()
}

fn resolve(root: &Node) -> Resolution {
    Resolution::resolve(&Treepath::new(root.clone()), &CanonicalRenderer).unwrap()
}

#[test]
fn test_duplicate_absolute_identifiers_keep_the_first() {
    let root = novella([
        level([absolute("Foo")]).with_location(Location::new(1, 1)),
        level([absolute("Foo")]).with_location(Location::new(5, 1)),
    ]);
    let resolution = resolve(&root);

    assert_eq!(resolution.pure().len(), 1);
    let foo = resolution.pure()[&id("Foo")].apply(&root).unwrap();
    assert_eq!(foo.indices_in_parent(), vec![0]);
    assert_eq!(
        resolution.problems(),
        [Problem::at("Already defined: 'Foo'", Location::new(5, 1))]
    );
}

#[test]
fn test_duplicate_implicit_identifiers_vanish_silently() {
    let root = novella([
        titled_level("Same", []),
        titled_level("Other", [titled_level("Same", [])]),
    ]);
    let resolution = resolve(&root);

    assert!(!resolution.has_problem());
    assert!(!resolution.derived().contains_key(&id("Same")));
    assert!(resolution.derived().contains_key(&id("Other")));
}

#[test]
fn test_identifiers_nest_below_unidentified_nodes() {
    let root = novella([level([level([level([absolute("Deep")])])])]);
    let resolution = resolve(&root);
    let deep = resolution.pure()[&id("Deep")].apply(&root).unwrap();
    assert_eq!(deep.indices_in_parent(), vec![0, 0, 0]);
}

#[test]
fn test_two_sections_declaring_the_same_identifier() {
    let raw = read_notation(
        r#"
        (NOVELLA
          (LEVEL_INTRODUCER @1:1
            (LEVEL_INTRODUCER_INDENT "==")
            (LEVEL_TITLE (WORD "First"))
            (ABSOLUTE_IDENTIFIER "Foo"))
          (LINE_BREAK "\n")
          (PARAGRAPH_REGULAR @2:1 (WORD "One"))
          (LINE_BREAK "\n")
          (LEVEL_INTRODUCER @3:1
            (LEVEL_INTRODUCER_INDENT "==")
            (LEVEL_TITLE (WORD "Second"))
            (ABSOLUTE_IDENTIFIER "Foo"))
          (LINE_BREAK "\n")
          (PARAGRAPH_REGULAR @4:1 (WORD "Two")))
        "#,
    )
    .unwrap();
    let compiled = Pipeline::new().compile(raw).unwrap();

    assert_eq!(compiled.pure.len(), 1);
    let first = &compiled.pure[&id("Foo")];
    assert_eq!(first.indices_in_parent(), vec![0]);
    assert_eq!(first.tree_at_end().location(), Some(&Location::new(1, 1)));
    assert!(compiled.derived.is_empty());
    assert_eq!(
        compiled.problems,
        vec![Problem::at("Already defined: 'Foo'", Location::new(3, 1))]
    );

    // The second section loses its token and gets no marker.
    let second = compiled.tree.child_at(1);
    assert!(second.find_child(NodeKind::AbsoluteIdentifier).is_none());
    assert!(second.find_child(NodeKind::ExplicitIdentifier).is_none());
}

#[test]
fn test_book_drops_colliding_implicit_markers() {
    let book = Pipeline::new()
        .compile_book([
            novella([titled_level("Intro", []), titled_level("Alpha", [])]),
            novella([titled_level("Intro", []), titled_level("Beta", [])]),
        ])
        .unwrap();

    assert!(book.problems.is_empty());
    for document in book.tree.child_nodes() {
        assert!(document
            .child_at(0)
            .find_child(NodeKind::ImplicitIdentifier)
            .is_none());
        assert!(document
            .child_at(1)
            .find_child(NodeKind::ImplicitIdentifier)
            .is_some());
    }
    assert!(book.index.get(&id("Intro")).is_none());
    assert_eq!(book.index.get(&id("Beta")).unwrap().indices_in_parent(), vec![1, 1]);
}

#[test]
fn test_book_flags_colliding_explicit_markers() {
    let documents = [
        novella([titled_level("One", [absolute("Foo")])]),
        novella([titled_level("Two", [absolute("Foo")])]),
    ];
    let pipeline = Pipeline::new();
    let separate: usize = documents
        .iter()
        .map(|document| pipeline.compile(document.clone()).unwrap().tree.node_count())
        .sum();
    let book = pipeline.compile_book(documents).unwrap();

    assert_eq!(book.tree.node_count(), separate + 1);
    for document in book.tree.child_nodes() {
        let marker = document.child_at(0).child_at(0);
        assert_eq!(marker.kind(), NodeKind::CollidingExplicitIdentifier);
    }
    assert!(book.index.get(&id("Foo")).is_none());
    assert_eq!(book.collisions.explicit().len(), 1);
}

#[test]
fn test_accented_titles_keep_distinct_implicit_identifiers() {
    let root = novella([titled_level("Ağaç", []), titled_level("Aac", [])]);
    let resolution = resolve(&root);

    assert!(!resolution.has_problem());
    let agac = resolution.derived()[&id("Agac")].apply(&root).unwrap();
    assert_eq!(agac.indices_in_parent(), vec![0]);
    let aac = resolution.derived()[&id("Aac")].apply(&root).unwrap();
    assert_eq!(aac.indices_in_parent(), vec![1]);
}
