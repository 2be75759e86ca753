//! Support for creating an Atom feed from the post store. The feed carries
//! the same listing the page renders at the initial selection: every post,
//! newest first, with the excerpt as the entry summary and the category and
//! tags as Atom categories.

use crate::config::{Author, Config};
use crate::filter::{visible_posts, Selection};
use crate::post::{Post, Store};
use atom_syndication::{Category, Entry, Error as AtomError, Feed, Link, Person};
use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use std::io::Write;

/// Creates the feed for `store` and writes it to a [`std::io::Write`].
pub fn write_feed<W: Write>(config: &Config, store: &Store, w: W) -> Result<()> {
    feed(config, store)?.write_to(w)?;
    Ok(())
}

fn feed(config: &Config, store: &Store) -> Result<Feed> {
    let posts = visible_posts(store, &Selection::default());
    Ok(Feed {
        title: config.title.clone().into(),
        id: config.site_root.to_string(),
        updated: match posts.first() {
            Some(post) => entry_date(post),
            None => Utc::now().fixed_offset(),
        },
        authors: author_to_people(config.author.as_ref()),
        entries: entries(config, &posts)?,
        links: vec![link(config.site_root.as_str())],
        ..Feed::default()
    })
}

fn entries(config: &Config, posts: &[&Post]) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = Vec::with_capacity(posts.len());
    for post in posts {
        let url = config.site_root.join(&post.href())?;
        let date = entry_date(post);
        entries.push(Entry {
            id: url.to_string(),
            title: post.title.clone().into(),
            updated: date,
            authors: author_to_people(config.author.as_ref()),
            links: vec![link(url.as_str())],
            summary: Some(post.excerpt.clone().into()),
            categories: entry_categories(post),
            published: Some(date),
            ..Entry::default()
        });
    }
    Ok(entries)
}

/// Post dates carry no time of day; entries are stamped midnight UTC.
fn entry_date(post: &Post) -> DateTime<FixedOffset> {
    post.date.and_time(NaiveTime::MIN).and_utc().fixed_offset()
}

fn entry_categories(post: &Post) -> Vec<Category> {
    post.category
        .iter()
        .chain(post.tags.iter())
        .map(|term| Category {
            term: term.clone(),
            ..Category::default()
        })
        .collect()
}

fn link(href: &str) -> Link {
    Link {
        href: href.to_owned(),
        rel: "alternate".to_owned(),
        ..Link::default()
    }
}

fn author_to_people(author: Option<&Author>) -> Vec<Person> {
    match author {
        Some(author) => vec![Person {
            name: author.name.clone(),
            email: author.email.clone(),
            ..Person::default()
        }],
        None => Vec::new(),
    }
}

/// The result of a fallible feed operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an Atom-related error.
    Atom(AtomError),

    /// Returned when a post URL cannot be joined onto the site root.
    Url(url::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Atom(err) => err.fmt(f),
            Error::Url(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Atom(err) => Some(err),
            Error::Url(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts [`url::ParseError`]s into [`Error`]. This allows us to use
    /// the `?` operator in fallible feed operations.
    fn from(err: url::ParseError) -> Error {
        Error::Url(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::Store;

    fn config() -> Config {
        serde_yaml::from_str(
            "title: Test Blog\nsite_root: \"https://example.org/\"\nauthor:\n  name: Tester\n",
        )
        .unwrap()
    }

    fn store() -> Store {
        Store::from_yaml(
            "
- id: newer
  title: Newer
  date: \"2025-02-01\"
  category: life
  excerpt: the newer one
  tags: [Growth]
- id: older
  title: Older
  date: \"2025-01-01\"
  category: tech
  excerpt: the older one
  tags: [AI, Azure]
",
        )
        .unwrap()
    }

    #[test]
    fn test_feed_entries_newest_first() -> Result<()> {
        let feed = feed(&config(), &store())?;
        assert_eq!(feed.title.value, "Test Blog");
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].id, "https://example.org/posts/newer.html");
        assert_eq!(feed.entries[1].id, "https://example.org/posts/older.html");
        Ok(())
    }

    #[test]
    fn test_entry_carries_summary_and_categories() -> Result<()> {
        let feed = feed(&config(), &store())?;
        let older = &feed.entries[1];
        assert_eq!(
            older.summary.as_ref().map(|s| s.value.as_str()),
            Some("the older one")
        );
        let terms: Vec<&str> = older.categories.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["tech", "AI", "Azure"]);
        Ok(())
    }

    #[test]
    fn test_feed_writes_valid_xml() -> Result<()> {
        let mut out: Vec<u8> = Vec::new();
        write_feed(&config(), &store(), &mut out)?;
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.contains("<feed"));
        assert!(xml.contains("https://example.org/posts/newer.html"));
        Ok(())
    }
}
