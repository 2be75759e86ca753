//! Typed view-models handed to the fragment templates. Data construction
//! (filtering, aggregation) stays fully decoupled from rendering; this
//! module is the bridge: it flattens domain records into plain structs,
//! escapes text for markup, and converts the result into template
//! [`Value`]s.

use crate::aggregate::{CategoryCount, TagCount};
use crate::filter::{CategoryFilter, Selection};
use crate::post::{tag_key, Post};
use gtmpl_derive::Gtmpl;
use gtmpl_value::Value;
use pulldown_cmark::escape::{escape_href, escape_html};
use std::collections::HashMap;

/// Escapes text for insertion into markup, including double-quoted
/// attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a String cannot fail.
    let _ = escape_html(&mut out, s);
    out
}

/// Escapes a URL for an `href` attribute.
pub fn escape_url(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape_href(&mut out, s);
    out
}

/// One interactive tag affordance inside a post card. `attr` carries the raw
/// tag string (escaped) for the click handler to read back; `label` is the
/// display text.
#[derive(Clone, Debug, Gtmpl)]
pub struct PostTagView {
    pub attr: String,
    pub label: String,
}

/// One category affordance in the filter bar or sidebar.
#[derive(Clone, Debug, Gtmpl)]
pub struct CategoryView {
    pub key: String,
    pub label: String,
    pub count: u64,
    pub active: bool,
}

/// One tag-cloud affordance.
#[derive(Clone, Debug, Gtmpl)]
pub struct TagView {
    pub attr: String,
    pub label: String,
    pub count: u64,
    pub active: bool,
}

/// One rendered post card.
#[derive(Clone, Debug)]
pub struct PostView {
    pub href: String,
    pub title: String,
    pub date: String,
    pub category_label: String,
    pub excerpt: String,
    pub read_time: String,
    pub has_read_time: bool,
    pub author: String,
    pub has_author: bool,
    pub featured: bool,
    pub tags: Vec<PostTagView>,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> PostView {
        PostView {
            href: escape_url(&post.href()),
            title: escape(&post.title),
            date: escape(&post.display_date()),
            category_label: escape(post.category_display()),
            excerpt: escape(&post.excerpt),
            read_time: escape(post.read_time.as_deref().unwrap_or_default()),
            has_read_time: post.read_time.is_some(),
            author: escape(post.author.as_deref().unwrap_or_default()),
            has_author: post.author.is_some(),
            featured: post.featured,
            tags: post
                .tags
                .iter()
                .filter(|tag| !tag.trim().is_empty())
                .map(|tag| PostTagView {
                    attr: escape(tag),
                    label: escape(tag.trim()),
                })
                .collect(),
        }
    }
}

impl From<PostView> for Value {
    /// Converts a [`PostView`] into a [`Value`] for templating. Flat
    /// sub-views convert via their derived impls; this one is by hand
    /// because of the nested tag list.
    fn from(view: PostView) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("href".to_owned(), view.href.into());
        m.insert("title".to_owned(), view.title.into());
        m.insert("date".to_owned(), view.date.into());
        m.insert("category_label".to_owned(), view.category_label.into());
        m.insert("excerpt".to_owned(), view.excerpt.into());
        m.insert("read_time".to_owned(), view.read_time.into());
        m.insert("has_read_time".to_owned(), view.has_read_time.into());
        m.insert("author".to_owned(), view.author.into());
        m.insert("has_author".to_owned(), view.has_author.into());
        m.insert("featured".to_owned(), view.featured.into());
        m.insert(
            "tags".to_owned(),
            Value::Array(view.tags.into_iter().map(Value::from).collect()),
        );
        Value::Object(m)
    }
}

/// The post-list template context: the visible posts, newest first, plus the
/// explicit empty flag driving the empty-state fragment.
pub fn post_list_value(posts: &[&Post]) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("empty".to_owned(), posts.is_empty().into());
    m.insert(
        "posts".to_owned(),
        Value::Array(
            posts
                .iter()
                .map(|post| Value::from(PostView::from(*post)))
                .collect(),
        ),
    );
    Value::Object(m)
}

/// The filter-bar template context: the "All Posts" affordance (with the
/// total post count) followed by one affordance per category.
pub fn filter_bar_value(counts: &[CategoryCount], total: usize, selection: &Selection) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert(
        "all_active".to_owned(),
        (selection.category == CategoryFilter::All).into(),
    );
    m.insert("total".to_owned(), (total as u64).into());
    m.insert(
        "categories".to_owned(),
        Value::Array(
            counts
                .iter()
                .map(|count| Value::from(category_view(count, Some(selection))))
                .collect(),
        ),
    );
    Value::Object(m)
}

/// The sidebar template context: the same category data as the filter bar,
/// without an "All" entry and without active styling.
pub fn sidebar_value(counts: &[CategoryCount]) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert(
        "categories".to_owned(),
        Value::Array(
            counts
                .iter()
                .map(|count| Value::from(category_view(count, None)))
                .collect(),
        ),
    );
    Value::Object(m)
}

/// The tag-cloud template context: one affordance per distinct tag, marked
/// active when it matches the current tag selection case-insensitively.
pub fn tag_cloud_value(counts: &[TagCount], selection: &Selection) -> Value {
    let wanted = selection.tag.as_deref().map(tag_key);
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert(
        "tags".to_owned(),
        Value::Array(
            counts
                .iter()
                .map(|count| {
                    Value::from(TagView {
                        attr: escape(&count.display),
                        label: escape(&count.display),
                        count: count.count as u64,
                        active: wanted.as_deref() == Some(count.key.as_str()),
                    })
                })
                .collect(),
        ),
    );
    Value::Object(m)
}

fn category_view(count: &CategoryCount, selection: Option<&Selection>) -> CategoryView {
    CategoryView {
        key: escape(&count.key),
        label: escape(&count.label),
        count: count.count as u64,
        active: match selection {
            None => false,
            Some(selection) => {
                selection.category == CategoryFilter::Category(count.key.clone())
            }
        },
    }
}
