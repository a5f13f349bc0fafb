//! Tokenizer for the bracketed markup embedded in FME workspace files.
//!
//! Every `<NAME ...>`, `</NAME>` and `<NAME .../>` tag in the text is read once
//! into a flat token list. Declarations of a given kind are then produced lazily
//! from that list. Body-carrying kinds (transformers and feature types) pick up
//! their child declarations from the range between the opening tag and its
//! matching closing tag, counting nested same-kind blocks so that children of
//! an inner block are never attributed to the outer one.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

/// Attribute mapping of a single tag, in source order.
pub type Attributes = IndexMap<String, String>;

/// Declaration kinds recognised in a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Workspace,
    Dataset,
    Transformer,
    FeatureType,
    Link,
    GlobalParameter,
}

impl DeclarationKind {
    pub const ALL: [DeclarationKind; 6] = [
        DeclarationKind::Workspace,
        DeclarationKind::Dataset,
        DeclarationKind::Transformer,
        DeclarationKind::FeatureType,
        DeclarationKind::Link,
        DeclarationKind::GlobalParameter,
    ];

    pub fn tag_name(self) -> &'static str {
        match self {
            DeclarationKind::Workspace => "WORKSPACE",
            DeclarationKind::Dataset => "DATASET",
            DeclarationKind::Transformer => "TRANSFORMER",
            DeclarationKind::FeatureType => "FEATURE_TYPE",
            DeclarationKind::Link => "FEAT_LINK",
            DeclarationKind::GlobalParameter => "GLOBAL_PARAMETER",
        }
    }

    /// Tags collected from the body of a declaration of this kind.
    pub fn child_tags(self) -> &'static [&'static str] {
        match self {
            DeclarationKind::Transformer => &["XFORM_PARM", "OUTPUT_PORT"],
            DeclarationKind::FeatureType => &["FEAT_ATTRIBUTE"],
            _ => &[],
        }
    }

    pub fn has_body(self) -> bool {
        !self.child_tags().is_empty()
    }
}

/// One occurrence of a declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub attributes: Attributes,
    pub children: Vec<ChildDeclaration>,
}

impl Declaration {
    /// Attribute value, treating an empty value as missing.
    pub fn attr(&self, name: &str) -> Option<&str> {
        non_empty(&self.attributes, name)
    }

    /// Attribute value exactly as declared, including empty values.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children_named<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a ChildDeclaration> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }
}

/// Nested declaration found inside a transformer or feature type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDeclaration {
    pub tag: String,
    pub attributes: Attributes,
}

impl ChildDeclaration {
    pub fn attr(&self, name: &str) -> Option<&str> {
        non_empty(&self.attributes, name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

fn non_empty<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagForm {
    Open,
    Close,
    SelfClosing,
}

#[derive(Debug, Clone, Copy)]
struct Tag<'a> {
    name: &'a str,
    attributes: &'a str,
    form: TagForm,
}

/// Token list for one document.
pub struct TagScanner<'a> {
    tags: Vec<Tag<'a>>,
}

impl<'a> TagScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        let tags: Vec<Tag<'a>> = tag_pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let name = caps.get(2)?.as_str();
                let raw = caps.get(3).map_or("", |m| m.as_str());
                let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
                let trimmed = raw.trim_end();
                let (attributes, form) = if closing {
                    (raw, TagForm::Close)
                } else if let Some(stripped) = trimmed.strip_suffix('/') {
                    (stripped, TagForm::SelfClosing)
                } else {
                    (raw, TagForm::Open)
                };
                Some(Tag {
                    name,
                    attributes,
                    form,
                })
            })
            .collect();
        tracing::debug!(tags = tags.len(), "tokenized workflow markup");
        TagScanner { tags }
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Lazily yield every occurrence of `kind`, in document order.
    pub fn declarations(&self, kind: DeclarationKind) -> impl Iterator<Item = Declaration> + '_ {
        self.tags
            .iter()
            .enumerate()
            .filter(move |(_, tag)| tag.name == kind.tag_name() && tag.form != TagForm::Close)
            .map(move |(index, tag)| Declaration {
                kind,
                attributes: parse_attributes(tag.attributes),
                children: if kind.has_body() && tag.form == TagForm::Open {
                    self.scoped_children(kind, index)
                } else {
                    Vec::new()
                },
            })
    }

    /// Collect direct children of the block opened at `open_index`.
    ///
    /// Returns nothing when the block is never closed.
    fn scoped_children(&self, kind: DeclarationKind, open_index: usize) -> Vec<ChildDeclaration> {
        let name = kind.tag_name();
        let child_tags = kind.child_tags();
        let mut depth = 1usize;
        let mut children = Vec::new();

        for tag in &self.tags[open_index + 1..] {
            if tag.name == name {
                match tag.form {
                    TagForm::Open => depth += 1,
                    TagForm::Close => {
                        depth -= 1;
                        if depth == 0 {
                            return children;
                        }
                    }
                    TagForm::SelfClosing => {}
                }
                continue;
            }
            if depth == 1 && tag.form != TagForm::Close && child_tags.contains(&tag.name) {
                children.push(ChildDeclaration {
                    tag: tag.name.to_string(),
                    attributes: parse_attributes(tag.attributes),
                });
            }
        }

        tracing::debug!(tag = name, "declaration body is never closed");
        Vec::new()
    }
}

/// Parse `KEY="value"` pairs. The first occurrence of a key wins.
pub fn parse_attributes(text: &str) -> Attributes {
    let mut attributes = Attributes::new();
    for caps in attribute_pattern().captures_iter(text) {
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        attributes
            .entry(key.as_str().to_string())
            .or_insert_with(|| decode_entities(value.as_str()));
    }
    attributes
}

/// Decode the XML entities FME writes inside attribute values.
pub fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#10;", "\n")
        .replace("&#13;", "\r")
        .replace("&#9;", "\t")
        .replace("&amp;", "&")
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<(/?)([A-Za-z_][A-Za-z0-9_]*)((?:[^>"]|"[^"]*")*)>"#)
            .expect("tag pattern is valid")
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)\s*=\s*"([^"]*)""#)
            .expect("attribute pattern is valid")
    })
}
