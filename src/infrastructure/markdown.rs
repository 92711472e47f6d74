//! Markdown prose → `TreeNode` tree
//!
//! The tree is rooted at a `body` element and uses HTML tag names, so the
//! structural handlers see the same shape a rendered page would have.

use std::sync::LazyLock;

use pulldown_cmark::{BlockQuoteKind, Event, Options, Parser, Tag};
use regex::Regex;
use tracing::trace;

use crate::domain::{Element, TreeNode};

/// One-element raw HTML block: `<tag attrs>inner</tag>`.
static HTML_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^<([A-Za-z][A-Za-z0-9]*)([^>]*)>(.*)</([A-Za-z][A-Za-z0-9]*)\s*>$").unwrap()
});

static HTML_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)(id|class)\s*=\s*"([^"]*)""#).unwrap());

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_GFM
}

/// Heading id derived from its text: spaces become underscores.
pub fn heading_id(title: &str) -> String {
    title.trim().split_whitespace().collect::<Vec<_>>().join("_")
}

/// Parse markdown prose into a tree rooted at `body`.
pub fn parse_prose(markdown: &str) -> TreeNode {
    let mut builder = ProseBuilder::new();
    for event in Parser::new_ext(markdown, options()) {
        builder.push(event);
    }
    builder.finish()
}

/// Open element (or raw HTML block) awaiting its end event.
struct Frame {
    element: Element,
    raw_html: Option<String>,
}

struct ProseBuilder {
    root: Element,
    stack: Vec<Frame>,
}

impl ProseBuilder {
    fn new() -> Self {
        Self {
            root: Element {
                tag: "body".into(),
                ..Element::default()
            },
            stack: Vec::new(),
        }
    }

    fn children(&mut self) -> &mut Vec<TreeNode> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.element.children,
            None => &mut self.root.children,
        }
    }

    fn append(&mut self, node: TreeNode) {
        self.children().push(node);
    }

    /// Adjacent text events are merged into one text node.
    fn append_text(&mut self, value: &str) {
        let children = self.children();
        if let Some(TreeNode::Text(last)) = children.last_mut() {
            last.push_str(value);
        } else {
            children.push(TreeNode::text(value));
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let name = match tag {
            Tag::HtmlBlock => {
                self.stack.push(Frame {
                    element: Element::default(),
                    raw_html: Some(String::new()),
                });
                return;
            }
            Tag::Heading {
                level, id, classes, ..
            } => {
                self.stack.push(Frame {
                    element: Element {
                        tag: format!("h{}", level as u8),
                        id: id.map(|s| s.to_string()),
                        classes: classes.iter().map(|c| c.to_string()).collect(),
                        children: Vec::new(),
                    },
                    raw_html: None,
                });
                return;
            }
            Tag::BlockQuote(kind) => {
                let mut element = Element {
                    tag: "blockquote".into(),
                    ..Element::default()
                };
                if let Some(kind) = kind {
                    element.classes.push(alert_class(kind).into());
                }
                self.stack.push(Frame {
                    element,
                    raw_html: None,
                });
                return;
            }
            Tag::Paragraph => "p",
            Tag::CodeBlock(_) => "pre",
            Tag::List(Some(_)) => "ol",
            Tag::List(None) => "ul",
            Tag::Item => "li",
            Tag::DefinitionList => "dl",
            Tag::DefinitionListTitle => "dt",
            Tag::DefinitionListDefinition => "dd",
            Tag::Table(_) => "table",
            Tag::TableHead => "thead",
            Tag::TableRow => "tr",
            Tag::TableCell => "td",
            Tag::Emphasis => "em",
            Tag::Strong => "strong",
            Tag::Strikethrough => "del",
            Tag::Link { .. } => "a",
            Tag::Image { .. } => "img",
            _ => "div",
        };
        self.stack.push(Frame {
            element: Element {
                tag: name.into(),
                ..Element::default()
            },
            raw_html: None,
        });
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            trace!("unbalanced end event ignored");
            return;
        };
        if let Some(html) = frame.raw_html {
            let node = Self::raw_html_node(&html);
            self.append(node);
            return;
        }

        let mut node = TreeNode::Element(frame.element);
        if node.is_heading() && node.id().is_none() {
            let id = heading_id(&node.text_content());
            node = node.with_id(id);
        }
        self.append(node);
    }

    /// A one-element HTML block `<tag id=".." class="..">text</tag>` becomes
    /// an element; anything else is kept verbatim as text.
    fn raw_html_node(html: &str) -> TreeNode {
        let html = html.trim();
        let Some(caps) = HTML_BLOCK.captures(html) else {
            return TreeNode::text(html);
        };
        let (open, attrs, inner, close) = (&caps[1], &caps[2], caps[3].trim(), &caps[4]);
        if !open.eq_ignore_ascii_case(close) || inner.contains('<') {
            return TreeNode::text(html);
        }

        let mut node = TreeNode::element(open.to_ascii_lowercase());
        for attr in HTML_ATTR.captures_iter(attrs) {
            match &attr[1] {
                "id" => node = node.with_id(&attr[2]),
                _ => {
                    for class in attr[2].split_whitespace() {
                        node = node.with_class(class);
                    }
                }
            }
        }
        if !inner.is_empty() {
            node = node.with_children([TreeNode::text(inner)]);
        }
        node
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Html(html) => match self.stack.last_mut() {
                Some(Frame {
                    raw_html: Some(buffer),
                    ..
                }) => buffer.push_str(&html),
                _ => self.append_text(&html),
            },
            Event::Text(value) | Event::InlineHtml(value) => self.append_text(&value),
            Event::InlineMath(value) | Event::DisplayMath(value) => self.append_text(&value),
            Event::Code(value) => {
                self.append(TreeNode::element("code").with_children([TreeNode::text(value.as_ref())]))
            }
            Event::FootnoteReference(label) => {
                self.append(TreeNode::element("sup").with_children([TreeNode::text(label.as_ref())]))
            }
            Event::SoftBreak => self.append_text("\n"),
            Event::HardBreak => self.append(TreeNode::element("br")),
            Event::Rule => self.append(TreeNode::element("hr")),
            Event::TaskListMarker(_) => {}
        }
    }

    fn finish(mut self) -> TreeNode {
        // close anything the parser left open
        while !self.stack.is_empty() {
            self.close();
        }
        TreeNode::Element(self.root)
    }
}

fn alert_class(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}
