//! Rewrites relative image sources into the asset tree.
//!
//! `./a/b/photo.jpg` becomes `<asset root>/a/b/photo.webp`: a leading `.`
//! segment is dropped, directories are kept verbatim and the extension is
//! replaced by `webp` unless it already is `png` or `svg`. Absolute URLs,
//! root-relative paths, `data:` URIs and paths already under the asset root
//! are left alone.

use crate::config::ImageOptions;
use xhast_core::{Node, Transform, TransformContext, TransformError, visit};

/// Extensions kept as-is.
const PRESERVED_EXTENSIONS: &[&str] = &["png", "svg"];
/// Extension every other image is converted to.
const DEFAULT_EXTENSION: &str = "webp";

/// Moves image sources under the asset root.
pub struct ImagePathRewriter {
    options: ImageOptions,
}

impl ImagePathRewriter {
    /// Creates the pass.
    pub fn new(options: ImageOptions) -> Self {
        Self { options }
    }

    fn asset_root(&self) -> &str {
        self.options.asset_root.trim_end_matches('/')
    }

    /// Rewritten source for `src`, or `None` when it must stay untouched.
    pub fn rewrite(&self, src: &str) -> Option<String> {
        if src.is_empty() || is_absolute(src) || src.starts_with(&format!("{}/", self.asset_root())) {
            return None;
        }

        let mut segments: Vec<&str> = src.split('/').collect();
        if segments.first() == Some(&".") {
            segments.remove(0);
        }
        let file = segments.pop()?;
        let file = normalize_extension(file);

        let mut path = String::from(self.asset_root());
        for segment in segments {
            path.push('/');
            path.push_str(segment);
        }
        path.push('/');
        path.push_str(&file);
        Some(path)
    }
}

fn is_absolute(src: &str) -> bool {
    src.starts_with('/') || src.starts_with("data:") || src.contains("://")
}

fn normalize_extension(file: &str) -> String {
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            if PRESERVED_EXTENSIONS.contains(&ext) {
                file.to_string()
            } else {
                format!("{}.{}", stem, DEFAULT_EXTENSION)
            }
        }
        _ => format!("{}.{}", file, DEFAULT_EXTENSION),
    }
}

impl Transform for ImagePathRewriter {
    fn name(&self) -> &str {
        "images"
    }

    fn transform(&self, tree: &mut Node, _ctx: &mut TransformContext) -> Result<(), TransformError> {
        visit(
            tree,
            |node| node.is_element("img"),
            |node| {
                let Some(img) = node.as_element_mut() else {
                    return Ok(());
                };
                let Some(rewritten) = img.property("src").and_then(|src| self.rewrite(src)) else {
                    return Ok(());
                };
                img.set_property("src", rewritten);
                if self.options.lazy_loading {
                    img.set_property("loading", "lazy");
                }
                Ok(())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xhast_core::Element;

    fn rewriter(root: &str) -> ImagePathRewriter {
        ImagePathRewriter::new(ImageOptions {
            asset_root: root.to_string(),
            lazy_loading: false,
        })
    }

    #[test]
    fn svg_and_png_keep_their_extension() {
        let r = rewriter("/assets");
        assert_eq!(r.rewrite("./a/b/icon.svg").as_deref(), Some("/assets/a/b/icon.svg"));
        assert_eq!(r.rewrite("shot.png").as_deref(), Some("/assets/shot.png"));
    }

    #[test]
    fn other_extensions_become_webp() {
        let r = rewriter("/assets/");
        assert_eq!(r.rewrite("./a/photo.jpg").as_deref(), Some("/assets/a/photo.webp"));
        assert_eq!(r.rewrite("./a/b.c/photo.JPEG").as_deref(), Some("/assets/a/b.c/photo.webp"));
        assert_eq!(r.rewrite("./README").as_deref(), Some("/assets/README.webp"));
        assert_eq!(r.rewrite("../up/x.gif").as_deref(), Some("/assets/../up/x.webp"));
    }

    #[test]
    fn absolute_sources_are_untouched() {
        let r = rewriter("/assets");
        for src in [
            "https://cdn.example.com/x.jpg",
            "/static/x.jpg",
            "data:image/png;base64,AAAA",
            "/assets/a/photo.webp",
            "",
        ] {
            assert_eq!(r.rewrite(src), None, "src {:?}", src);
        }
    }

    #[test]
    fn pass_rewrites_and_marks_lazy() {
        let mut tree: Node = Element::new("root")
            .with_child(
                Element::new("img")
                    .with_property("src", "./a/photo.jpg")
                    .with_property("alt", "A")
                    .into(),
            )
            .with_child(Element::new("img").with_property("alt", "no src").into())
            .into();
        let pass = ImagePathRewriter::new(ImageOptions {
            asset_root: "assets".to_string(),
            lazy_loading: true,
        });
        pass.transform(&mut tree, &mut TransformContext::new()).unwrap();

        let img = tree.children()[0].as_element().unwrap();
        assert_eq!(img.property("src"), Some("assets/a/photo.webp"));
        assert_eq!(img.property("loading"), Some("lazy"));
        let bare = tree.children()[1].as_element().unwrap();
        assert_eq!(bare.property("loading"), None);

        let once = tree.clone();
        pass.transform(&mut tree, &mut TransformContext::new()).unwrap();
        assert_eq!(tree, once);
    }
}
