//! The renderer: turns filter and aggregation output into markup fragments
//! via the embedded Go-style templates and writes each fragment into its
//! [`Document`] region. Whether a region actually exists is the document's
//! business; a missing container silently skips that render step.

use crate::aggregate::{category_counts, tag_counts};
use crate::document::{Document, Region};
use crate::filter::{visible_posts, Selection};
use crate::post::Store;
use crate::view;
use gtmpl::Template;
use gtmpl_value::Value;
use std::fmt;

/// Renders the listing's fragments. The templates are parsed once at
/// construction; every render call afterwards is pure string generation.
pub struct Renderer {
    posts_template: Template,
    filter_template: Template,
    sidebar_template: Template,
    tags_template: Template,
}

impl Renderer {
    /// Parses the embedded fragment templates.
    pub fn new() -> Result<Renderer> {
        Ok(Renderer {
            posts_template: parse_template(include_str!("../templates/posts.html"))?,
            filter_template: parse_template(include_str!("../templates/filter.html"))?,
            sidebar_template: parse_template(include_str!("../templates/sidebar.html"))?,
            tags_template: parse_template(include_str!("../templates/tags.html"))?,
        })
    }

    /// Renders the post list for the current selection into
    /// [`Region::PostList`]: one card per visible post, or the explicit
    /// empty-state fragment when nothing matches.
    pub fn render_posts(
        &self,
        store: &Store,
        selection: &Selection,
        doc: &mut impl Document,
    ) -> Result<()> {
        let posts = visible_posts(store, selection);
        let html = execute(&self.posts_template, view::post_list_value(&posts))?;
        doc.set_html(Region::PostList, html);
        Ok(())
    }

    /// Renders the category filter control into [`Region::CategoryFilter`]:
    /// "All Posts" first, then one affordance per category with its count,
    /// the current selection marked active.
    pub fn render_category_filter(
        &self,
        store: &Store,
        selection: &Selection,
        doc: &mut impl Document,
    ) -> Result<()> {
        let counts = category_counts(store);
        let html = execute(
            &self.filter_template,
            view::filter_bar_value(&counts, store.len(), selection),
        )?;
        doc.set_html(Region::CategoryFilter, html);
        Ok(())
    }

    /// Renders the sidebar category list into
    /// [`Region::SidebarCategories`]: same data as the filter bar, different
    /// layout, no "All" entry.
    pub fn render_sidebar(&self, store: &Store, doc: &mut impl Document) -> Result<()> {
        let counts = category_counts(store);
        let html = execute(&self.sidebar_template, view::sidebar_value(&counts))?;
        doc.set_html(Region::SidebarCategories, html);
        Ok(())
    }

    /// Renders the tag cloud into [`Region::TagCloud`], the current tag
    /// selection highlighted case-insensitively.
    pub fn render_tag_cloud(
        &self,
        store: &Store,
        selection: &Selection,
        doc: &mut impl Document,
    ) -> Result<()> {
        let counts = tag_counts(store);
        let html = execute(&self.tags_template, view::tag_cloud_value(&counts, selection))?;
        doc.set_html(Region::TagCloud, html);
        Ok(())
    }

    /// Renders every region for the given selection.
    pub fn render_all(
        &self,
        store: &Store,
        selection: &Selection,
        doc: &mut impl Document,
    ) -> Result<()> {
        self.render_posts(store, selection, doc)?;
        self.render_category_filter(store, selection, doc)?;
        self.render_sidebar(store, doc)?;
        self.render_tag_cloud(store, selection, doc)
    }
}

/// Parses a single template source string.
pub fn parse_template(source: &str) -> Result<Template> {
    let mut template = Template::default();
    template.parse(source).map_err(Error::Parse)?;
    Ok(template)
}

/// Executes a template against a context value and returns the markup.
pub fn execute(template: &Template, value: Value) -> Result<String> {
    let context = gtmpl::Context::from(value).map_err(Error::Render)?;
    let mut out: Vec<u8> = Vec::new();
    template.execute(&mut out, &context).map_err(Error::Render)?;
    String::from_utf8(out).map_err(Error::Utf8)
}

/// The result of a fallible templating operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a templating operation.
#[derive(Debug)]
pub enum Error {
    /// An error parsing a template source.
    Parse(String),

    /// An error executing a template against a context.
    Render(String),

    /// Template output that was not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "Parsing template: {}", err),
            Error::Render(err) => write!(f, "Rendering template: {}", err),
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Utf8(err) => Some(err),
            _ => None,
        }
    }
}
