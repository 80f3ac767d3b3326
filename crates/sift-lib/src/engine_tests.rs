//! End-to-end selection over a reference document.

use std::sync::Arc;

use crate::{
    Adapter, CacheStats, Document, Element, Engine, Error, NodeId, ParseErrorKind, PrintTracer,
    RuntimeError, Verbosity, default_engine,
};

/// ```text
/// html
///   body#main
///     div#R
///       p#P1.x
///       p#P2 data-k=v
///     ul
///       li.item
///       li.item.done
///       li
/// ```
struct Page {
    doc: Document,
    body: NodeId,
    r: NodeId,
    p1: NodeId,
    p2: NodeId,
    ul: NodeId,
    items: [NodeId; 3],
}

fn page() -> Page {
    let mut doc = Document::new(Element::new("html"));
    let body = doc.append(doc.root(), Element::new("body").id("main"));
    let r = doc.append(body, Element::new("div").id("R"));
    let p1 = doc.append(r, Element::new("p").id("P1").class("x"));
    let p2 = doc.append(r, Element::new("p").id("P2").attr("data-k", "v"));
    let ul = doc.append(body, Element::new("ul"));
    let items = [
        doc.append(ul, Element::new("li").class("item")),
        doc.append(ul, Element::new("li").class("item").class("done")),
        doc.append(ul, Element::new("li")),
    ];
    Page {
        doc,
        body,
        r,
        p1,
        p2,
        ul,
        items,
    }
}

#[test]
fn compiled_query_is_cached() {
    let engine = Engine::new();
    let page = page();
    let adapter = page.doc.adapter();

    let first = engine.select_all(page.doc.root(), "li.item", &adapter).unwrap();
    let second = engine.select_all(page.doc.root(), "li.item", &adapter).unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.cache_stats(), CacheStats { hits: 1, misses: 1 });

    let a = engine.compile("li.item").unwrap();
    let b = engine.compile("li.item").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(engine.cache_stats(), CacheStats { hits: 3, misses: 1 });
}

#[test]
fn cache_key_is_literal_text() {
    let engine = Engine::new();
    engine.compile("li").unwrap();
    engine.compile("li ").unwrap();
    assert_eq!(engine.cache().len(), 2);
    assert_eq!(engine.cache_stats(), CacheStats { hits: 0, misses: 2 });
}

#[test]
fn universal_and_attribute_scoped_to_root() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();

    assert_eq!(engine.select_all(page.r, "*", &adapter).unwrap(), [page.p1, page.p2]);
    assert_eq!(engine.select_all(page.r, ".x", &adapter).unwrap(), [page.p1]);
    assert_eq!(engine.select_all(page.r, "[data-k]", &adapter).unwrap(), [page.p2]);
}

#[test]
fn root_anchors_but_is_not_a_child_of_itself() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();

    assert_eq!(engine.select_all(page.r, "#R #P2", &adapter).unwrap(), [page.p2]);
    assert_eq!(engine.select_all(page.r, "#R > #P2", &adapter).unwrap(), [page.p2]);
    assert!(engine.select_all(page.body, "#main > #P2", &adapter).unwrap().is_empty());
    assert_eq!(engine.select_all(page.body, "#main #P2", &adapter).unwrap(), [page.p2]);
}

#[test]
fn descendant_versus_child() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();

    assert_eq!(engine.select_all(root, "body p", &adapter).unwrap(), [page.p1, page.p2]);
    assert!(engine.select_all(root, "body > p", &adapter).unwrap().is_empty());
    assert_eq!(engine.select_all(root, "body > ul", &adapter).unwrap(), [page.ul]);
}

#[test]
fn branches_are_deduplicated_in_discovery_order() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();
    let [a, b, c] = page.items;

    assert_eq!(engine.select_all(root, ".done, li", &adapter).unwrap(), [b, a, c]);
    assert_eq!(engine.select_all(root, "li, .item", &adapter).unwrap(), [a, b, c]);
    assert_eq!(engine.select_all(root, "li, li, li", &adapter).unwrap(), [a, b, c]);
}

#[test]
fn repeated_classes_collapse() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();

    assert_eq!(
        engine.select_all(root, ".item.item", &adapter).unwrap(),
        engine.select_all(root, ".item", &adapter).unwrap()
    );
    insta::assert_snapshot!(engine.compile(".item.done.item").unwrap().dump(), @r#"
    00  reset
    01  filter classes "item" "done"
    02  yield
    "#);
}

#[test]
fn results_are_deterministic() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();

    let first = engine.select_all(root, "ul > li, #R *", &adapter).unwrap();
    for _ in 0..3 {
        assert_eq!(engine.select_all(root, "ul > li, #R *", &adapter).unwrap(), first);
    }
    let [a, b, c] = page.items;
    assert_eq!(first, [a, b, c, page.p1, page.p2]);
}

#[test]
fn sibling_combinators() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();
    let [a, b, c] = page.items;

    assert_eq!(engine.select_all(root, "li + li", &adapter).unwrap(), [b, c]);
    assert_eq!(engine.select_all(root, ".done ~ li", &adapter).unwrap(), [c]);
    assert_eq!(engine.select_all(root, "#P1 + p", &adapter).unwrap(), [page.p2]);
    assert_eq!(engine.select_all(root, "div ~ ul > li", &adapter).unwrap(), [a, b, c]);
}

#[test]
fn deep_descendant_chain() {
    let mut doc = Document::new(Element::new("div"));
    let mut chain = vec![doc.root()];
    for _ in 1..80 {
        let parent = *chain.last().unwrap();
        chain.push(doc.append(parent, Element::new("div")));
    }

    let found = Engine::new()
        .select_all(doc.root(), "div div div div div", &doc.adapter())
        .unwrap();
    assert_eq!(found, chain[4..].to_vec());
}

#[test]
fn non_ascii_and_escaped_names() {
    let mut doc = Document::new(Element::new("body"));
    let cafe = doc.append(
        doc.root(),
        Element::new("p").class("café").attr("title", "naïve"),
    );
    let numbered = doc.append(doc.root(), Element::new("p").id("123"));
    let adapter = doc.adapter();
    let engine = Engine::new();
    let root = doc.root();

    assert_eq!(engine.select_all(root, ".café", &adapter).unwrap(), [cafe]);
    assert_eq!(engine.select_all(root, r".caf\e9", &adapter).unwrap(), [cafe]);
    assert_eq!(engine.select_all(root, "p[title=naïve]", &adapter).unwrap(), [cafe]);
    assert_eq!(engine.select_all(root, r"#\31 23", &adapter).unwrap(), [numbered]);
}

#[test]
fn select_returns_first_match() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();

    assert_eq!(engine.select(root, "li", &adapter).unwrap(), Some(page.items[0]));
    assert_eq!(engine.select(root, "table", &adapter).unwrap(), None);
    assert!(engine.select_all(root, "table", &adapter).unwrap().is_empty());
}

#[test]
fn iteration_is_lazy() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();

    let mut matches = engine.select_iter(page.doc.root(), "li", &adapter).unwrap();
    assert_eq!(matches.next(), Some(page.items[0]));
    assert_eq!(matches.next(), Some(page.items[1]));

    let taken: Vec<_> = engine
        .select_iter(page.doc.root(), "*", &adapter)
        .unwrap()
        .take(2)
        .collect();
    assert_eq!(taken, [page.body, page.r]);
}

#[test]
fn malformed_selectors_fail_before_matching() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let root = page.doc.root();

    let err = engine.select_all(root, "li >", &adapter).unwrap_err();
    assert!(matches!(err, Error::Parse(ref e) if e.kind == ParseErrorKind::TrailingCombinator));

    let err = engine.select(root, "[a!=b]", &adapter).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ref e) if e.kind == ParseErrorKind::UnknownAttributeOperator
    ));

    let err = engine.select(root, r#"[title="open"#, &adapter).unwrap_err();
    assert!(matches!(err, Error::Lex(_)));

    assert!(engine.cache().is_empty());
}

#[test]
fn empty_selector_is_an_error() {
    let page = page();
    let adapter = page.doc.adapter();

    for source in ["", "   "] {
        let err = Engine::new()
            .select_all(page.doc.root(), source, &adapter)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ref e) if e.kind == ParseErrorKind::EmptySelectorList
        ));
    }
}

#[test]
fn incomplete_adapter_is_an_internal_error() {
    let page = page();
    let adapter = Adapter::<NodeId>::builder().build();

    let err = Engine::new()
        .select(page.doc.root(), "li", &adapter)
        .unwrap_err();
    assert!(matches!(err, Error::Internal(RuntimeError::MissingCombinatorHandler(_))));
    assert_eq!(err.span(), None);
}

#[test]
fn errors_render_against_source() {
    let source = "ul >> li";
    let err = Engine::new().compile(source).unwrap_err();
    assert_eq!(err.span().map(|s| s.range()), Some(2..6));

    let rendered = err.render(source);
    assert!(rendered.contains("two combinators in a row"), "{rendered}");
    assert!(rendered.contains(source), "{rendered}");
}

#[test]
fn exec_fuel_limits_parsing() {
    let engine = Engine::builder().exec_fuel(Some(4)).build();
    assert!(engine.compile("li").is_ok());

    let err = engine.compile("ul li a b").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ref e) if e.kind == ParseErrorKind::ExecFuelExhausted
    ));
}

#[test]
fn tracing_through_the_engine() {
    let page = page();
    let adapter = page.doc.adapter();
    let engine = Engine::new();
    let query = engine.compile("#R > p").unwrap();
    let mut tracer = PrintTracer::new(&query, Verbosity::Default);

    let found: Vec<_> = engine
        .select_iter_with(page.doc.root(), "#R > p", &adapter, &mut tracer)
        .unwrap()
        .collect();
    assert_eq!(found, [page.p1, page.p2]);

    insta::assert_snapshot!(tracer.lines().join("\n"), @r#"
    00  reset
    01  filter id "R"
    02  combinator children
    03  filter tag-name "p"
    04  yield
        + NodeId(3)
        + NodeId(4)
    "#);
}

#[test]
fn free_functions_use_the_default_engine() {
    let page = page();
    let adapter = page.doc.adapter();
    let root = page.doc.root();
    let source = "ul > li.done:default-engine-probe";

    assert!(crate::select(root, source, &adapter).is_err());
    assert!(default_engine().cache().get(source).is_none());

    let source = "ul   >   li.done";
    assert_eq!(crate::select(root, source, &adapter).unwrap(), Some(page.items[1]));
    assert_eq!(crate::select_all(root, source, &adapter).unwrap(), [page.items[1]]);
    assert_eq!(
        crate::select_iter(root, source, &adapter).unwrap().count(),
        1
    );
    assert!(default_engine().cache().get(source).is_some());
}
