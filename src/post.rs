//! Defines the [`Post`] record and the [`Store`], the immutable ordered
//! sequence of posts the rest of the crate computes views over. The store is
//! parsed from a YAML document and validated up front; after that point every
//! downstream consumer trusts its invariants (unique slug ids, parseable
//! dates) and nothing ever mutates it.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// The grouping key substituted for records without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A single blog entry's metadata record (not its body content; detail pages
/// are authored separately).
#[derive(Clone, Debug, Deserialize)]
pub struct Post {
    /// Unique slug naming the post and its detail page (`posts/{id}.html`).
    pub id: String,

    pub title: String,

    /// Publication date. The listing shows posts newest first; posts sharing
    /// a date keep their order in the source document.
    pub date: NaiveDate,

    /// Coarse grouping key, e.g. `tech`. Records without one group under
    /// [`UNCATEGORIZED`].
    #[serde(default)]
    pub category: Option<String>,

    /// Display name for `category`.
    #[serde(default)]
    pub category_label: Option<String>,

    pub excerpt: String,

    /// Free-form labels; may be empty, and the same tag may appear under
    /// different casings across posts. A missing sequence is tolerated and
    /// read as empty.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub read_time: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

impl Post {
    /// The relative location of the post's detail page. Nothing here
    /// generates or validates that page; only the id has to line up.
    pub fn href(&self) -> String {
        format!("posts/{}.html", self.id)
    }

    /// Long-form display date, e.g. `November 8, 2025`.
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Grouping key, falling back to [`UNCATEGORIZED`].
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Display label for the category, falling back to the raw key and then
    /// to [`UNCATEGORIZED`].
    pub fn category_display(&self) -> &str {
        self.category_label
            .as_deref()
            .or(self.category.as_deref())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// The case-insensitive grouping key for a tag. Two taggings of `LLM` and
/// `llm` share one key; surrounding whitespace never participates.
pub fn tag_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// The immutable, ordered sequence of posts shipped with the build.
pub struct Store {
    posts: Vec<Post>,
}

impl Store {
    /// Parses a store from a YAML document. Dates are validated by the
    /// deserializer; id invariants are checked by [`Store::new`].
    pub fn from_yaml(input: &str) -> Result<Store> {
        Store::new(serde_yaml::from_str(input)?)
    }

    /// Validates the invariants downstream code silently trusts: every id
    /// present, slug-clean, and unique across the store.
    pub fn new(posts: Vec<Post>) -> Result<Store> {
        let mut seen: HashSet<&str> = HashSet::new();
        for post in &posts {
            if post.id.is_empty() {
                return Err(Error::MissingId {
                    title: post.title.clone(),
                });
            }
            if post.id != slug::slugify(&post.id) {
                return Err(Error::MalformedId {
                    id: post.id.clone(),
                });
            }
            if !seen.insert(&post.id) {
                return Err(Error::DuplicateId {
                    id: post.id.clone(),
                });
            }
        }
        Ok(Store { posts })
    }

    /// The post data compiled into the binary.
    pub fn builtin() -> Result<Store> {
        Store::from_yaml(include_str!("../posts.yaml"))
    }

    /// The full ordered sequence, in source-document order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// The result of loading a [`Store`].
type Result<T> = std::result::Result<T, Error>;

/// A data-integrity fault in the post store, caught at load time rather than
/// masked at render time.
#[derive(Debug)]
pub enum Error {
    /// A record with an empty or missing id; the title locates the record.
    MissingId { title: String },

    /// An id that is not a clean slug and so cannot name a detail page.
    MalformedId { id: String },

    /// Two records sharing an id.
    DuplicateId { id: String },

    /// The YAML document failed to parse; this covers unparseable dates and
    /// scalar `tags` fields, which the deserializer rejects.
    Yaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingId { title } => {
                write!(f, "Post titled '{}' has no id", title)
            }
            Error::MalformedId { id } => {
                write!(f, "Post id '{}' is not a clean slug", id)
            }
            Error::DuplicateId { id } => {
                write!(f, "Duplicate post id '{}'", id)
            }
            Error::Yaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Yaml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts [`serde_yaml::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator when parsing the store document.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}
