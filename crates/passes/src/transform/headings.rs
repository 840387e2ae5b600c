//! Heading level clamping and self-link anchors.
//!
//! Each `h1`..`h6` is renamed into the configured level range, then its
//! children are moved into `<a href="#<id>" id="<id>">`, which becomes the
//! heading's only child. With `autolink` off the id goes on the heading
//! instead. The id is taken from the heading text before the children move:
//! a trailing `{#custom-id}` is used verbatim (and stripped from the text),
//! otherwise the text is slugged.
//!
//! With `unique_ids` on, repeated text yields `intro`, `intro-1`, ... Ids
//! fixed by the document (custom ids and anchors from an earlier run) are
//! reserved before any slug is generated, so a generated slug never takes
//! an id a later heading asks for.

use crate::config::HeadingOptions;
use xhast_core::tree::heading_tag;
use xhast_core::{
    Element, HeadingEntry, Node, SlugFn, Slugger, Transform, TransformContext, TransformError,
    extract_custom_id, slug, visit,
};

/// Clamps heading levels and injects anchors.
pub struct HeadingNormalizer {
    options: HeadingOptions,
    slug_fn: SlugFn,
}

impl HeadingNormalizer {
    /// Creates the pass with the default slug function.
    pub fn new(options: HeadingOptions) -> Result<Self, TransformError> {
        Self::with_slug_fn(options, slug)
    }

    /// Creates the pass with a caller-supplied slug function.
    pub fn with_slug_fn(options: HeadingOptions, slug_fn: SlugFn) -> Result<Self, TransformError> {
        options.validate()?;
        Ok(Self { options, slug_fn })
    }

    fn clamp(&self, level: u8) -> u8 {
        level.clamp(self.options.min_level, self.options.max_level)
    }

    /// Id this pass already gave the heading on an earlier run.
    fn existing_id(&self, heading: &Element) -> Option<String> {
        if self.options.autolink {
            existing_anchor(heading)
        } else {
            heading.property("id").map(str::to_string)
        }
    }

    fn reserve_fixed_ids(&self, tree: &mut Node, slugger: &mut Slugger) -> Result<(), TransformError> {
        visit(tree, is_heading, |node| {
            let Some(heading) = node.as_element() else {
                return Ok(());
            };
            if let Some(id) = self.existing_id(heading) {
                slugger.reserve(&id);
                return Ok(());
            }
            let rendered = heading.text_content();
            if let (_, Some(id)) = extract_custom_id(&rendered) {
                slugger.reserve(id);
            }
            Ok(())
        })
    }

    fn normalize(&self, heading: &mut Element, slugger: &mut Slugger) -> Option<HeadingEntry> {
        let level = heading.heading_level()?;
        let depth = self.clamp(level);
        if depth != level {
            log::debug!("clamping h{} to h{}", level, depth);
            heading.tag_name = heading_tag(depth);
        }

        if let Some(id) = self.existing_id(heading) {
            let text = heading.text_content();
            return Some(HeadingEntry {
                depth,
                slug: id,
                text: text.trim().to_string(),
            });
        }

        let rendered = heading.text_content();
        let (text, custom_id) = extract_custom_id(&rendered);
        let id = match custom_id {
            Some(id) => {
                strip_custom_id(&mut heading.children);
                id.to_string()
            }
            None if self.options.unique_ids => slugger.next_slug(text),
            None => (self.slug_fn)(text),
        };
        let entry = HeadingEntry {
            depth,
            slug: id.clone(),
            text: text.trim().to_string(),
        };

        if self.options.autolink {
            let children = std::mem::take(&mut heading.children);
            let anchor = Element::new("a")
                .with_property("href", format!("#{}", id))
                .with_property("id", id)
                .with_children(children);
            heading.children.push(anchor.into());
        } else {
            heading.set_property("id", id);
        }
        Some(entry)
    }
}

impl Transform for HeadingNormalizer {
    fn name(&self) -> &str {
        "headings"
    }

    fn transform(&self, tree: &mut Node, ctx: &mut TransformContext) -> Result<(), TransformError> {
        let mut slugger = Slugger::with_slug_fn(self.slug_fn);
        self.reserve_fixed_ids(tree, &mut slugger)?;
        visit(tree, is_heading, |node| {
            if let Some(heading) = node.as_element_mut()
                && let Some(entry) = self.normalize(heading, &mut slugger)
            {
                ctx.headings.push(entry);
            }
            Ok(())
        })
    }
}

fn is_heading(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| el.heading_level().is_some())
}

/// Id of an anchor this pass already injected, if the heading has one.
fn existing_anchor(heading: &Element) -> Option<String> {
    let [Node::Element(anchor)] = heading.children.as_slice() else {
        return None;
    };
    if anchor.tag_name != "a" {
        return None;
    }
    let id = anchor.property("id")?;
    let href = anchor.property("href")?;
    (href.strip_prefix('#') == Some(id)).then(|| id.to_string())
}

/// Removes a trailing `{#id}` from the last text node under `children`.
fn strip_custom_id(children: &mut [Node]) -> bool {
    for child in children.iter_mut().rev() {
        match child {
            Node::Text(text) => {
                if text.value.trim().is_empty() {
                    continue;
                }
                let (stripped, id) = extract_custom_id(&text.value);
                if id.is_none() {
                    return false;
                }
                text.value = stripped.to_string();
                return true;
            }
            Node::Element(el) => {
                if !el.text_content().trim().is_empty() {
                    return strip_custom_id(&mut el.children);
                }
            }
            _ => return false,
        }
    }
    false
}
