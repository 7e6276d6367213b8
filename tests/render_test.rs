//! End-to-end rendering tests over realistic transcript trees.

use chatdown::render::{assemble, render_node, to_markdown, RenderOptions};
use chatdown::{DocumentNode, Error, ExportProfile, NodeKind, Section, Transcript};

fn text(s: &str) -> DocumentNode {
    DocumentNode::text(s)
}

fn el(kind: impl Into<NodeKind>, children: Vec<DocumentNode>) -> DocumentNode {
    DocumentNode::element(kind).with_children(children)
}

fn conversation() -> Vec<Section> {
    vec![
        Section::new("system prompt", DocumentNode::paragraph("You are helpful.")),
        Section::new(
            "user message",
            el("div", vec![text("\n  "), DocumentNode::paragraph("Say hello"), text("\n")]),
        ),
        Section::new(
            "assistant response",
            el(
                "div",
                vec![el(
                    "p",
                    vec![el("strong", vec![text("Hello")]), text(", world.")],
                )],
            ),
        ),
    ]
}

#[test]
fn test_end_to_end_console_export() {
    let markdown = assemble(&conversation(), &RenderOptions::default()).unwrap();

    assert_eq!(
        markdown,
        "-- system prompt\nYou are helpful.\n\n\
         -- user message\nSay hello\n\n\
         -- assistant response\n**Hello**, world."
    );
    assert!(!markdown.starts_with('\n'));
    assert!(!markdown.ends_with('\n'));
    assert!(!markdown.contains("\n\n\n"));
}

#[test]
fn test_sections_keep_order() {
    let markdown = assemble(&conversation(), &RenderOptions::default()).unwrap();
    let system = markdown.find("system prompt").unwrap();
    let user = markdown.find("user message").unwrap();
    let assistant = markdown.find("assistant response").unwrap();
    assert!(system < user && user < assistant);
}

#[test]
fn test_nested_emphasis() {
    let node = el("strong", vec![el("em", vec![text("y")])]);
    assert_eq!(render_node(&node, &RenderOptions::default()).unwrap(), "***y***");
}

#[test]
fn test_sibling_ordered_lists_restart() {
    let list = |items: &[&str]| {
        el(
            "ol",
            items.iter().map(|t| el("li", vec![text(t)])).collect(),
        )
    };
    let sections = vec![Section::new(
        "assistant",
        el("div", vec![list(&["one", "two"]), DocumentNode::paragraph("then"), list(&["three"])]),
    )];
    let markdown = assemble(&sections, &RenderOptions::default()).unwrap();
    assert_eq!(
        markdown,
        "-- assistant\n1. one\n2. two\n\nthen\n\n1. three"
    );
}

#[test]
fn test_code_fence_language() {
    let block = |class: Option<&str>| {
        let mut code = el("code", vec![text("print('hi')")]);
        if let Some(class) = class {
            code = code.with_attr("class", class);
        }
        el("pre", vec![code])
    };

    let options = RenderOptions::default();
    assert_eq!(
        render_node(&block(Some("language-python")), &options).unwrap(),
        "```python\nprint('hi')\n```\n\n"
    );
    assert_eq!(
        render_node(&block(None), &options).unwrap(),
        "```\nprint('hi')\n```\n\n"
    );
}

#[test]
fn test_headerless_table_degrades() {
    let table = el(
        "table",
        vec![el("tr", vec![el("td", vec![text("a")]), el("td", vec![text("b")])])],
    );
    let sections = vec![Section::new("assistant", table)];
    let markdown = assemble(&sections, &RenderOptions::default()).unwrap();
    assert_eq!(markdown, "-- assistant\n| a | b |");
}

#[test]
fn test_mixed_content_response() {
    let root = el(
        "div",
        vec![
            DocumentNode::heading(2, "Plan"),
            el(
                "ul",
                vec![
                    el("li", vec![text("Read "), el("code", vec![text("main.rs")])]),
                    el(
                        "li",
                        vec![
                            text("Check "),
                            el("a", vec![text("docs")]).with_attr("href", "https://docs.rs"),
                        ],
                    ),
                ],
            ),
            el("blockquote", vec![DocumentNode::paragraph("Note")]),
            el(
                "image-container",
                vec![el("img", vec![]).with_attr("alt", "Uploaded diagram.png")],
            ),
        ],
    );
    let markdown = assemble(&[Section::new("assistant", root)], &RenderOptions::default()).unwrap();
    assert_eq!(
        markdown,
        "-- assistant\n## Plan\n\n\
         * Read `main.rs`\n* Check [docs](https://docs.rs)\n\n\
         > Note\n\n\
         [Uploaded diagram.png]"
    );
}

#[test]
fn test_empty_transcript() {
    assert_eq!(assemble(&[], &RenderOptions::default()).unwrap(), "");
    let only_empty = vec![Section::empty("user"), Section::empty("assistant")];
    assert_eq!(assemble(&only_empty, &RenderOptions::default()).unwrap(), "");
}

#[test]
fn test_text_node_with_children_rejected() {
    let bad = text("parent").with_child(text("child"));
    let sections = vec![Section::new("user", el("p", vec![bad]))];
    match assemble(&sections, &RenderOptions::default()) {
        Err(Error::StructuralViolation(msg)) => {
            assert!(msg.contains("section 1"));
            assert!(msg.contains("/0"));
        }
        other => panic!("expected structural violation, got {:?}", other),
    }
}

#[test]
fn test_runaway_depth_rejected() {
    let mut node = text("leaf");
    for _ in 0..20 {
        node = el("div", vec![node]);
    }
    let options = RenderOptions::default().with_max_depth(10);
    assert!(matches!(
        render_node(&node, &options),
        Err(Error::StructuralViolation(_))
    ));
}

#[test]
fn test_profiles_layout() {
    let transcript = Transcript::from_sections(vec![
        Section::new("You", DocumentNode::paragraph("Hi")),
        Section::new("", DocumentNode::paragraph("Still me")),
    ]);

    let claude = to_markdown(&transcript, &RenderOptions::from_profile(ExportProfile::Claude)).unwrap();
    assert_eq!(claude, "**You**: Hi\n\n**You**: Still me");

    let slack = to_markdown(&transcript, &RenderOptions::from_profile(ExportProfile::Slack)).unwrap();
    assert_eq!(slack, "**You**:\n> Hi\n\n**You**:\n> Still me");

    let gpt = to_markdown(&transcript, &RenderOptions::from_profile(ExportProfile::ChatGpt)).unwrap();
    assert!(gpt.starts_with("# Chat Export\n\n---\n\n### You (Message 1)\n\nHi"));
    assert!(gpt.ends_with("### You (Message 2)\n\nStill me\n\n---"));
}

#[test]
fn test_nested_list_indentation() {
    let root = el(
        "ol",
        vec![
            el(
                "li",
                vec![
                    DocumentNode::paragraph("Install"),
                    el("ul", vec![el("li", vec![text("cargo")]), el("li", vec![text("rustup")])]),
                ],
            ),
            el("li", vec![text("Build")]),
        ],
    );
    let markdown = render_node(&root, &RenderOptions::default()).unwrap();
    assert_eq!(markdown, "1. Install\n\n   * cargo\n   * rustup\n2. Build\n\n");
}

#[test]
fn test_parallel_renders_agree() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DocumentNode>();
    assert_send_sync::<Transcript>();
    assert_send_sync::<RenderOptions>();

    let transcript = Transcript::from_sections(conversation());
    let expected = to_markdown(&transcript, &RenderOptions::default()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| to_markdown(&transcript, &RenderOptions::default()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
