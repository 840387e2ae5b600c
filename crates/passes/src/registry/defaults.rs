//! Default lookup tables used when the configuration leaves them empty.

use std::collections::BTreeMap;

/// Human-readable names for common code block languages.
pub fn default_language_names() -> BTreeMap<String, String> {
    [
        ("bash", "Bash"),
        ("c", "C"),
        ("cpp", "C++"),
        ("css", "CSS"),
        ("go", "Go"),
        ("html", "HTML"),
        ("java", "Java"),
        ("js", "JavaScript"),
        ("javascript", "JavaScript"),
        ("json", "JSON"),
        ("jsx", "JSX"),
        ("md", "Markdown"),
        ("markdown", "Markdown"),
        ("py", "Python"),
        ("python", "Python"),
        ("rs", "Rust"),
        ("rust", "Rust"),
        ("sh", "Shell"),
        ("shell", "Shell"),
        ("sql", "SQL"),
        ("toml", "TOML"),
        ("ts", "TypeScript"),
        ("tsx", "TSX"),
        ("typescript", "TypeScript"),
        ("yaml", "YAML"),
        ("yml", "YAML"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_string(), name.to_string()))
    .collect()
}

/// Recognized admonition markers (`[!NOTE]` etc.) and their caption icons.
pub fn default_admonition_kinds() -> BTreeMap<String, String> {
    [
        ("NOTE", "💬"),
        ("TIP", "💡"),
        ("IMPORTANT", "☝️"),
        ("WARNING", "⚠️"),
        ("CAUTION", "🚨"),
    ]
    .into_iter()
    .map(|(kind, icon)| (kind.to_string(), icon.to_string()))
    .collect()
}
