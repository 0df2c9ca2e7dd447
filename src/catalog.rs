//! The catalog of languages offered on the dashboard
//!
//! Languages are grouped into fixed categories; a language may appear in
//! several. Each language is reachable by a slug, which is also the key of
//! its stored document.

/// Category name and the display names of its languages
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Frontend", &["JavaScript", "TypeScript", "HTML", "CSS"]),
    (
        "Backend Web",
        &[
            "Python", "JavaScript", "TypeScript", "Java", "C#", "Go", "PHP", "Ruby", "Rust",
            "Kotlin", "Scala", "Elixir", "Clojure", "Crystal", "Nim",
        ],
    ),
    ("Mobile", &["Swift", "Kotlin", "Dart", "Objective-C"]),
    ("Data / ML / Science", &["Python", "R", "Julia", "MATLAB", "SQL"]),
    ("Systems / Low-Level", &["C", "C++", "Rust", "Zig", "Assembly", "Ada"]),
    (
        "Scripting / Automation",
        &["Bash", "Shell", "PowerShell", "Perl", "Python", "Lua"],
    ),
    (
        "Functional & Logic",
        &["Haskell", "Elixir", "Erlang", "F#", "OCaml", "Scheme", "Clojure", "Prolog"],
    ),
    ("Blockchain / Smart Contracts", &["Solidity"]),
    (
        "Legacy / Enterprise",
        &[
            "COBOL", "Fortran", "ABAP", "Visual Basic .NET", "Delphi", "Groovy", "Apex",
            "Objective-C", "Smalltalk",
        ],
    ),
    ("Hardware / HDL", &["VHDL", "Verilog"]),
    ("Game / Engines", &["GDScript", "Lua"]),
];

/// Names whose slug is not what `slugify` would produce
const SLUG_OVERRIDES: &[(&str, &str)] = &[
    ("C++", "cpp"),
    ("C#", "csharp"),
    ("F#", "fsharp"),
    ("Visual Basic .NET", "vbnet"),
    ("Objective-C", "objective-c"),
];

/// A language as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LanguageRef {
    pub name: &'static str,
    pub slug: String,
}

/// One dashboard category
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Category {
    pub name: &'static str,
    pub languages: Vec<LanguageRef>,
}

/// The fixed language catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    /// All categories in display order, each with its languages and slugs
    pub fn categories(&self) -> Vec<Category> {
        CATEGORIES
            .iter()
            .map(|(name, languages)| Category {
                name: *name,
                languages: languages
                    .iter()
                    .map(|language| LanguageRef {
                        name: *language,
                        slug: language_slug(language),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Every distinct language, in first-appearance order
    pub fn languages(&self) -> Vec<LanguageRef> {
        let mut seen: Vec<LanguageRef> = Vec::new();
        for (_, languages) in CATEGORIES {
            for language in *languages {
                if !seen.iter().any(|l| l.name == *language) {
                    seen.push(LanguageRef {
                        name: *language,
                        slug: language_slug(language),
                    });
                }
            }
        }
        seen
    }

    /// Display name of the language with this slug
    pub fn find(&self, slug: &str) -> Option<&'static str> {
        CATEGORIES
            .iter()
            .flat_map(|(_, languages)| languages.iter())
            .find(|language| language_slug(language) == slug)
            .copied()
    }

    /// Names of the categories listing `name`
    pub fn categories_of(&self, name: &str) -> Vec<&'static str> {
        CATEGORIES
            .iter()
            .filter(|(_, languages)| languages.iter().any(|language| *language == name))
            .map(|(category, _)| *category)
            .collect()
    }
}

/// The slug a language is addressed and stored by
pub fn language_slug(name: &str) -> String {
    SLUG_OVERRIDES
        .iter()
        .find(|(language, _)| *language == name)
        .map(|(_, slug)| slug.to_string())
        .unwrap_or_else(|| slugify(name))
}

/// URL-safe form of `text`.
///
/// Keeps ASCII alphanumerics, `_` and `-`, lower-cased; runs of whitespace
/// and hyphens collapse into one `-`; leading and trailing `-`/`_` are trimmed.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator {
                slug.push('-');
            }
            in_separator = true;
        } else {
            slug.push(c);
            in_separator = false;
        }
    }
    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
