//! markdown-rs adapter: lowers an mdast into the content tree.
//!
//! The lowering mirrors the shape hast tooling produces: block containers
//! get `"\n"` text nodes before, between and after their block children.
//! Passes that match on child positions (admonitions) depend on that layout.

use crate::error::{SourceLocation, TransformError};
use crate::tree::{Element, Node, heading_tag};
use markdown::mdast;
use markdown::message::{Message, Place};

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs (tables, strikethrough).
    pub gfm: bool,
    /// Enable YAML frontmatter parsing (frontmatter is dropped).
    pub frontmatter: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            frontmatter: true,
        }
    }
}

impl ParseOptions {
    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            ..Default::default()
        };
        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }
        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

/// Parses markdown and lowers it into a content tree rooted at a `root` element.
pub fn parse_markdown(input: &str, options: &ParseOptions) -> Result<Node, TransformError> {
    let mdast = markdown::to_mdast(input, &options.to_markdown()).map_err(|err| {
        TransformError::MarkdownAdapter {
            message: err.to_string(),
            location: message_location(&err),
        }
    })?;
    Ok(from_mdast(&mdast))
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

/// Lowers an mdast node into the content tree.
///
/// A `Root` becomes a `root` element; other nodes lower to their hast
/// counterparts. Constructs without a counterpart are dropped with a log line.
pub fn from_mdast(node: &mdast::Node) -> Node {
    match node {
        mdast::Node::Root(root) => block_container("root", &root.children),
        other => lower(other).unwrap_or_else(|| Node::text("")),
    }
}

fn lower(node: &mdast::Node) -> Option<Node> {
    let lowered = match node {
        mdast::Node::Text(text) => Node::text(&text.value),
        mdast::Node::Paragraph(p) => inline_container("p", &p.children),
        mdast::Node::Heading(h) => inline_container(&heading_tag(h.depth), &h.children),
        mdast::Node::Emphasis(e) => inline_container("em", &e.children),
        mdast::Node::Strong(s) => inline_container("strong", &s.children),
        mdast::Node::Delete(d) => inline_container("del", &d.children),
        mdast::Node::Blockquote(q) => block_container("blockquote", &q.children),
        mdast::Node::InlineCode(code) => Element::new("code")
            .with_child(Node::text(&code.value))
            .into(),
        mdast::Node::Code(code) => {
            Node::code_block(&code.value, code.lang.as_deref(), code.meta.as_deref())
        }
        mdast::Node::Link(link) => {
            let mut a = Element::new("a").with_property("href", link.url.as_str());
            if let Some(title) = &link.title {
                a.set_property("title", title.as_str());
            }
            a.with_children(link.children.iter().filter_map(lower)).into()
        }
        mdast::Node::Image(image) => {
            let mut img = Element::new("img")
                .with_property("src", image.url.as_str())
                .with_property("alt", image.alt.as_str());
            if let Some(title) = &image.title {
                img.set_property("title", title.as_str());
            }
            img.into()
        }
        mdast::Node::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            let mut node = block_container(tag, &list.children);
            if let (Some(el), Some(start)) = (node.as_element_mut(), list.start)
                && list.ordered
                && start != 1
            {
                el.set_property("start", start.to_string());
            }
            node
        }
        mdast::Node::ListItem(item) => {
            if item.spread {
                block_container("li", &item.children)
            } else {
                // Tight items unwrap their paragraphs.
                let mut li = Element::new("li");
                for child in &item.children {
                    match child {
                        mdast::Node::Paragraph(p) => {
                            li.children.extend(p.children.iter().filter_map(lower))
                        }
                        other => li.children.extend(lower(other)),
                    }
                }
                li.into()
            }
        }
        mdast::Node::Table(table) => lower_table(table),
        mdast::Node::ThematicBreak(_) => Node::element("hr"),
        mdast::Node::Break(_) => Node::element("br"),
        mdast::Node::Html(html) => Node::raw(&html.value),
        mdast::Node::Yaml(_) | mdast::Node::Toml(_) | mdast::Node::Definition(_) => return None,
        other => {
            log::debug!("dropping mdast node without a tree counterpart: {:?}", other);
            return None;
        }
    };
    Some(lowered)
}

fn inline_container(tag: &str, children: &[mdast::Node]) -> Node {
    Element::new(tag)
        .with_children(children.iter().filter_map(lower))
        .into()
}

fn block_container(tag: &str, children: &[mdast::Node]) -> Node {
    let mut element = Element::new(tag);
    let lowered: Vec<Node> = children.iter().filter_map(lower).collect();
    element.children.push(Node::text("\n"));
    for child in lowered {
        element.children.push(child);
        element.children.push(Node::text("\n"));
    }
    element.into()
}

fn lower_table(table: &mdast::Table) -> Node {
    let mut rows = table.children.iter().filter_map(|row| match row {
        mdast::Node::TableRow(row) => Some(row),
        _ => None,
    });
    let mut element = Element::new("table");
    element.children.push(Node::text("\n"));
    if let Some(head) = rows.next() {
        let thead = Element::new("thead")
            .with_child(Node::text("\n"))
            .with_child(lower_row(head, "th"))
            .with_child(Node::text("\n"));
        element.children.push(thead.into());
        element.children.push(Node::text("\n"));
    }
    let body: Vec<Node> = rows.map(|row| lower_row(row, "td")).collect();
    if !body.is_empty() {
        let mut tbody = Element::new("tbody").with_child(Node::text("\n"));
        for row in body {
            tbody.children.push(row);
            tbody.children.push(Node::text("\n"));
        }
        element.children.push(tbody.into());
        element.children.push(Node::text("\n"));
    }
    element.into()
}

fn lower_row(row: &mdast::TableRow, cell_tag: &str) -> Node {
    let mut tr = Element::new("tr").with_child(Node::text("\n"));
    for cell in &row.children {
        if let mdast::Node::TableCell(cell) = cell {
            tr.children.push(inline_container(cell_tag, &cell.children));
            tr.children.push(Node::text("\n"));
        }
    }
    tr.into()
}
