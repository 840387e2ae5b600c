//! Heading identifier generation.
//!
//! [`slug`] is the pure text-to-id function. [`Slugger`] layers per-document
//! deduplication on top so that two headings with the same text receive
//! `intro` and `intro-1` instead of a duplicate id.

use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Pure slug function used by the heading pass.
pub type SlugFn = fn(&str) -> String;

/// Combining marks (Mn/Mc/Me) in the scripts headings commonly use.
///
/// Dropping these would corrupt Devanagari, Thai, Arabic or Hebrew words.
const COMBINING_MARKS: &[RangeInclusive<u32>] = &[
    0x0300..=0x036F,
    0x0591..=0x05C7,
    0x0610..=0x061A,
    0x064B..=0x065F,
    0x0670..=0x0670,
    0x0900..=0x0903,
    0x093A..=0x094F,
    0x0951..=0x0957,
    0x0962..=0x0963,
    0x0980..=0x0983,
    0x09BC..=0x09CD,
    0x0A01..=0x0A4D,
    0x0A81..=0x0ACD,
    0x0B01..=0x0BCD,
    0x0E31..=0x0E3A,
    0x0E47..=0x0E4E,
    0x1AB0..=0x1AFF,
    0x1DC0..=0x1DFF,
    0x302A..=0x302F,
    0x3099..=0x309A,
    0xFE20..=0xFE2F,
];

fn is_combining_mark(ch: char) -> bool {
    let cp = ch as u32;
    COMBINING_MARKS.iter().any(|range| range.contains(&cp))
}

/// github-slugger compatible slug of `text`, without deduplication.
///
/// Lowercases, keeps alphanumerics (any script), `-` and `_`, turns each
/// space into `-` and drops everything else. Hyphens are neither collapsed
/// nor trimmed. Text with nothing left falls back to `heading`.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch.to_ascii_lowercase());
        } else if ch == ' ' {
            out.push('-');
        } else if !ch.is_ascii() && (ch.is_alphanumeric() || is_combining_mark(ch)) {
            out.extend(ch.to_lowercase());
        }
    }
    if out.is_empty() {
        out.push_str("heading");
    }
    out
}

/// Splits a trailing `{#custom-id}` off heading text.
///
/// The id may only contain ASCII alphanumerics, `-` and `_`. Returns the
/// text without the suffix and the id, or the untouched text and `None`.
pub fn extract_custom_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    let Some(body) = trimmed.strip_suffix('}') else {
        return (text, None);
    };
    let Some(open) = body.rfind("{#") else {
        return (text, None);
    };
    let id = &body[open + 2..];
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        (body[..open].trim_end(), Some(id))
    } else {
        (text, None)
    }
}

/// Per-document slug allocator.
pub struct Slugger {
    slug_fn: SlugFn,
    counts: HashMap<String, usize>,
}

impl Default for Slugger {
    fn default() -> Self {
        Self::new()
    }
}

impl Slugger {
    /// Creates a slugger backed by [`slug`].
    pub fn new() -> Self {
        Self::with_slug_fn(slug)
    }

    /// Creates a slugger backed by a caller-supplied slug function.
    pub fn with_slug_fn(slug_fn: SlugFn) -> Self {
        Self {
            slug_fn,
            counts: HashMap::new(),
        }
    }

    /// Returns a document-unique slug for `text`.
    pub fn next_slug(&mut self, text: &str) -> String {
        let base = (self.slug_fn)(text);
        let mut candidate = base.clone();
        loop {
            let seen = self.counts.entry(base.clone()).or_insert(0);
            if *seen > 0 {
                candidate = format!("{}-{}", base, *seen);
            }
            *seen += 1;
            // A suffixed candidate may already be taken by a reserved id.
            if candidate == base || !self.counts.contains_key(&candidate) {
                break;
            }
        }
        self.counts.entry(candidate.clone()).or_insert(1);
        candidate
    }

    /// Reserves `id` so generated slugs never collide with it.
    pub fn reserve(&mut self, id: &str) {
        *self.counts.entry(id.to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_slugger_parity() {
        let cases = [
            ("Hello World", "hello-world"),
            ("import.meta.glob", "importmetaglob"),
            ("<Image />", "image-"),
            ("  a---b  ", "--a---b--"),
            ("TypeScript & JSX", "typescript--jsx"),
            ("Using __dirname", "using-__dirname"),
            ("Why Astro?", "why-astro"),
            ("多言語 ガイド", "多言語-ガイド"),
            ("Héllo Wörld", "héllo-wörld"),
            ("🚀 Getting Started", "-getting-started"),
            ("Hello\tWorld", "helloworld"),
            ("स्लॉट्स", "स्लॉट्स"),
            ("!!!", "heading"),
        ];
        for (input, expected) in cases {
            assert_eq!(slug(input), expected, "slug of {:?}", input);
        }
    }

    #[test]
    fn deduplicates_repeated_text() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Title"), "title");
        assert_eq!(slugger.next_slug("Title"), "title-1");
        assert_eq!(slugger.next_slug("Title"), "title-2");
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut slugger = Slugger::new();
        slugger.reserve("intro");
        assert_eq!(slugger.next_slug("Intro"), "intro-1");

        let mut slugger = Slugger::new();
        slugger.reserve("setup-1");
        assert_eq!(slugger.next_slug("Setup"), "setup");
        assert_eq!(slugger.next_slug("Setup"), "setup-2");
    }

    #[test]
    fn custom_slug_fn() {
        fn upper(text: &str) -> String {
            text.to_uppercase()
        }
        let mut slugger = Slugger::with_slug_fn(upper);
        assert_eq!(slugger.next_slug("a"), "A");
        assert_eq!(slugger.next_slug("a"), "A-1");
    }

    #[test]
    fn custom_ids() {
        assert_eq!(
            extract_custom_id("My Heading {#my-heading}  "),
            ("My Heading", Some("my-heading"))
        );
        assert_eq!(extract_custom_id("Plain"), ("Plain", None));
        assert_eq!(extract_custom_id("Bad {#a b}"), ("Bad {#a b}", None));
        assert_eq!(extract_custom_id("Empty {#}"), ("Empty {#}", None));
    }
}
