//! Frontmatter extraction, parsing, and defaulting.
//!
//! A documentation file may carry a YAML header between two `---` lines:
//!
//! ```text
//! ---
//! title: Getting started
//! menu_title: Start
//! capability: manage_options
//! ---
//! # Body
//! ```
//!
//! Three keys are recognised (`title`, `menu_title`, `capability`); every
//! other key is kept in [`FrontMatter::extra`].

use std::ops::Range;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Capability required to view a page whose front matter names none.
pub const DEFAULT_CAPABILITY: &str = "edit_posts";

/// Suffix stripped from a filename to derive the default title.
pub const DOC_EXTENSION: &str = ".md";

const TITLE_KEY: &str = "title";
const MENU_TITLE_KEY: &str = "menu_title";
const CAPABILITY_KEY: &str = "capability";

static SEARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)---\n(.+)\n---\n").expect("valid frontmatter regex"));

static ANCHORED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(.+?)\n---\n").expect("valid frontmatter regex"));

/// How the `---` delimited block is located in a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterMode {
    /// Search the whole file for the first `---\n … \n---\n` block.
    ///
    /// The interior is greedy, so a `---` line further down the body
    /// extends the block up to the last such line.
    #[default]
    Search,

    /// Only accept a block that opens on the first line, ending at the
    /// nearest closing `---` line.
    Anchored,
}

impl DelimiterMode {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Search => &SEARCH_RE,
            Self::Anchored => &ANCHORED_RE,
        }
    }
}

/// A located frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatterBlock<'a> {
    /// YAML text between the delimiter lines.
    pub yaml: &'a str,
    /// Byte span of the whole block, delimiters included.
    pub span: Range<usize>,
}

/// Sanitised frontmatter of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    /// Page title.
    pub title: String,
    /// Title used in the menu.
    pub menu_title: String,
    /// Capability required to see the page.
    pub capability: String,
    /// Every unrecognised key, untouched.
    pub extra: Mapping,
}

impl FrontMatter {
    /// Frontmatter of a file without any header.
    pub fn defaults_for(file: &str) -> Self {
        sanitize(Mapping::new(), file)
    }

    /// Look up an unrecognised key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Locate the frontmatter block in `raw`.
///
/// Returns `None` when no well-formed block exists.
pub fn extract(raw: &str, mode: DelimiterMode) -> Option<FrontMatterBlock<'_>> {
    let captures = mode.regex().captures(raw)?;
    let whole = captures.get(0)?;
    let inner = captures.get(1)?;
    Some(FrontMatterBlock {
        yaml: inner.as_str(),
        span: whole.range(),
    })
}

/// Remove a located block from `raw`, leaving the Markdown body.
pub fn strip(raw: &str, block: &FrontMatterBlock<'_>) -> String {
    let mut body = String::with_capacity(raw.len() - block.span.len());
    body.push_str(&raw[..block.span.start]);
    body.push_str(&raw[block.span.end..]);
    body
}

/// Parse YAML frontmatter into a mapping.
///
/// Malformed YAML is reported and treated as an empty header; so is a
/// document that is not a mapping.
pub fn parse(yaml: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => mapping,
        Ok(Value::Null) => Mapping::new(),
        Ok(other) => {
            warn!("Ignoring frontmatter that is not a mapping: {other:?}");
            Mapping::new()
        }
        Err(e) => {
            warn!("Unable to parse the YAML frontmatter: {e}");
            Mapping::new()
        }
    }
}

/// Split raw file content into parsed frontmatter and Markdown body.
pub fn split(raw: &str, mode: DelimiterMode) -> (Mapping, String) {
    match extract(raw, mode) {
        Some(block) => (parse(block.yaml), strip(raw, &block)),
        None => (Mapping::new(), raw.to_string()),
    }
}

/// Apply the defaulting rules to a parsed mapping.
///
/// - `title` falls back to the filename without its `.md` suffix
/// - `menu_title` falls back to `title`
/// - `capability` falls back to [`DEFAULT_CAPABILITY`]
pub fn sanitize(mut mapping: Mapping, file: &str) -> FrontMatter {
    let title = take_string(&mut mapping, TITLE_KEY, file).unwrap_or_else(|| default_title(file));
    let menu_title = take_string(&mut mapping, MENU_TITLE_KEY, file).unwrap_or_else(|| title.clone());
    let capability = take_string(&mut mapping, CAPABILITY_KEY, file)
        .unwrap_or_else(|| DEFAULT_CAPABILITY.to_string());

    FrontMatter {
        title,
        menu_title,
        capability,
        extra: mapping,
    }
}

/// Title derived from a filename.
pub fn default_title(file: &str) -> String {
    match file.strip_suffix(DOC_EXTENSION) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file.to_string(),
    }
}

fn take_string(mapping: &mut Mapping, key: &str, file: &str) -> Option<String> {
    let value = mapping.remove(key)?;
    let text = scalar_to_string(&value);
    if text.is_none() && !value.is_null() {
        warn!("{file}: frontmatter key '{key}' is not a scalar; using the default");
    }
    text
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}
