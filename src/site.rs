//! Stitches together the high-level steps of producing the static outputs:
//! render every listing region at the initial selection, inject the
//! fragments into the page shell, and write `blog.html` and `feed.atom`
//! into the output directory. The detail pages under `posts/` and the
//! stylesheets are authored separately and are not touched here.

use crate::config::Config;
use crate::controller::Controller;
use crate::document::{MemoryDocument, Region};
use crate::feed::{self, Error as FeedError};
use crate::post::Store;
use crate::render::{self, Error as RenderError, Renderer};
use chrono::{Datelike, Utc};
use gtmpl_value::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Builds the static listing page and feed for `store` into
/// `output_directory`.
pub fn build_site(config: &Config, store: &Store, output_directory: &Path) -> Result<()> {
    let renderer = Renderer::new()?;
    let controller = Controller::new(store, &renderer);
    let mut doc = MemoryDocument::full();
    controller.init(&mut doc)?;

    std::fs::create_dir_all(output_directory)?;
    std::fs::write(
        output_directory.join("blog.html"),
        render_page(config, &doc)?,
    )?;
    feed::write_feed(
        config,
        store,
        File::create(output_directory.join("feed.atom"))?,
    )?;
    Ok(())
}

/// Injects the rendered region fragments into the page shell template.
fn render_page(config: &Config, doc: &MemoryDocument) -> Result<String> {
    let fragment = |region: Region| -> Value {
        doc.html(region).unwrap_or_default().to_owned().into()
    };
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("title".to_owned(), config.title.clone().into());
    m.insert(
        "author".to_owned(),
        config
            .author
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| config.title.clone())
            .into(),
    );
    m.insert("year".to_owned(), (Utc::now().year() as i64).into());
    m.insert("post_list".to_owned(), fragment(Region::PostList));
    m.insert("category_filter".to_owned(), fragment(Region::CategoryFilter));
    m.insert(
        "sidebar_categories".to_owned(),
        fragment(Region::SidebarCategories),
    );
    m.insert("tag_cloud".to_owned(), fragment(Region::TagCloud));

    let template = render::parse_template(include_str!("../templates/page.html"))?;
    Ok(render::execute(&template, Value::Object(m))?)
}

/// The result of a fallible site-building operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error while building the static outputs.
#[derive(Debug)]
pub enum Error {
    /// Returned for templating errors.
    Render(RenderError),

    /// Returned for errors writing the feed.
    Feed(FeedError),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Render(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Render(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<RenderError> for Error {
    /// Converts [`RenderError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: RenderError) -> Error {
        Error::Render(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
