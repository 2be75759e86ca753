//! The filter engine: pure computation of the visible subset of posts for a
//! category/tag selection. Nothing here touches rendering or the document;
//! the same functions back the interactive controller and the static page
//! build.

use crate::post::{tag_key, Post, Store};

/// The category half of a [`Selection`]. [`CategoryFilter::All`] is the
/// sentinel the listing starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    /// Whether `post` passes this filter. Concrete categories compare
    /// exactly, case-sensitively, against the post's grouping key, so the
    /// `uncategorized` fallback group is selectable like any other.
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(c) => post.category_key() == c,
        }
    }
}

/// The current category/tag filter applied to the listing view. One value
/// lives for the duration of a page view, owned by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub category: CategoryFilter,

    /// Tag filter, compared case-insensitively. Holds the casing of the tag
    /// that was clicked; `None` means no tag filter.
    pub tag: Option<String>,
}

impl Default for Selection {
    /// The initial selection: all categories, no tag.
    fn default() -> Selection {
        Selection {
            category: CategoryFilter::All,
            tag: None,
        }
    }
}

impl Selection {
    /// Whether `tag` matches the current tag filter under the
    /// case-insensitive key.
    pub fn tag_matches(&self, tag: &str) -> bool {
        match &self.tag {
            None => false,
            Some(current) => tag_key(current) == tag_key(tag),
        }
    }
}

/// Computes the visible subset of posts for `selection`: posts passing both
/// the category filter (exact) and the tag filter (case-insensitive), sorted
/// by date descending. The sort is stable, so posts sharing a date keep
/// their store order. The store's backing sequence is never touched; the
/// result is a fresh view.
///
/// A selection matching nothing yields an empty vector, never an error; the
/// renderer owns the explicit empty state.
pub fn visible_posts<'a>(store: &'a Store, selection: &Selection) -> Vec<&'a Post> {
    let wanted_tag = selection.tag.as_deref().map(tag_key);
    let mut posts: Vec<&Post> = store
        .posts()
        .iter()
        .filter(|post| selection.category.matches(post))
        .filter(|post| match &wanted_tag {
            None => true,
            Some(key) => post.tags.iter().any(|tag| tag_key(tag) == *key),
        })
        .collect();
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::Store;

    fn store() -> Store {
        // The two-post scenario store: post1 is older and tech, post2 is
        // newer and life; "AI" and "ai" are the same tag in different
        // casings.
        Store::from_yaml(
            "
- id: post1
  title: One
  date: \"2025-01-01\"
  category: tech
  excerpt: first
  tags: [AI]
- id: post2
  title: Two
  date: \"2025-02-01\"
  category: life
  excerpt: second
  tags: [ai, Growth]
",
        )
        .unwrap()
    }

    fn ids(posts: &[&crate::post::Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    fn selection(category: CategoryFilter, tag: Option<&str>) -> Selection {
        Selection {
            category,
            tag: tag.map(str::to_owned),
        }
    }

    #[test]
    fn test_no_filters_returns_all_newest_first() {
        let store = store();
        let posts = visible_posts(&store, &Selection::default());
        assert_eq!(ids(&posts), vec!["post2", "post1"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let store = store();
        let posts = visible_posts(
            &store,
            &selection(CategoryFilter::Category("tech".to_owned()), None),
        );
        assert_eq!(ids(&posts), vec!["post1"]);

        // Case-sensitive: "Tech" is not "tech".
        let posts = visible_posts(
            &store,
            &selection(CategoryFilter::Category("Tech".to_owned()), None),
        );
        assert!(posts.is_empty());
    }

    #[test]
    fn test_tag_filter_is_case_insensitive() {
        let store = store();
        let posts = visible_posts(&store, &selection(CategoryFilter::All, Some("AI")));
        assert_eq!(ids(&posts), vec!["post2", "post1"]);
    }

    #[test]
    fn test_both_filters_compose() {
        let store = store();
        let posts = visible_posts(
            &store,
            &selection(CategoryFilter::Category("life".to_owned()), Some("growth")),
        );
        assert_eq!(ids(&posts), vec!["post2"]);

        // Passing one filter but not the other is not enough.
        let posts = visible_posts(
            &store,
            &selection(CategoryFilter::Category("tech".to_owned()), Some("Growth")),
        );
        assert!(posts.is_empty());
    }

    #[test]
    fn test_uncategorized_group_is_selectable() {
        // Records without a category group under the fallback key, and the
        // affordance the aggregator generates for that group must select
        // exactly those records.
        let store = Store::from_yaml(
            "
- id: stray
  title: Stray
  date: \"2025-01-05\"
  excerpt: no category here
- id: filed
  title: Filed
  date: \"2025-01-01\"
  category: tech
  excerpt: categorized
",
        )
        .unwrap();
        let posts = visible_posts(
            &store,
            &selection(
                CategoryFilter::Category(crate::post::UNCATEGORIZED.to_owned()),
                None,
            ),
        );
        assert_eq!(ids(&posts), vec!["stray"]);

        // The fallback key never swallows categorized posts.
        let posts = visible_posts(
            &store,
            &selection(CategoryFilter::Category("tech".to_owned()), None),
        );
        assert_eq!(ids(&posts), vec!["filed"]);
    }

    #[test]
    fn test_unknown_category_yields_empty_not_error() {
        let store = store();
        let posts = visible_posts(
            &store,
            &selection(CategoryFilter::Category("nonexistent".to_owned()), None),
        );
        assert!(posts.is_empty());
    }

    #[test]
    fn test_equal_dates_keep_store_order() {
        let store = Store::from_yaml(
            "
- id: first
  title: First
  date: \"2025-03-01\"
  excerpt: a
- id: second
  title: Second
  date: \"2025-03-01\"
  excerpt: b
- id: third
  title: Third
  date: \"2025-03-01\"
  excerpt: c
",
        )
        .unwrap();
        let posts = visible_posts(&store, &Selection::default());
        assert_eq!(ids(&posts), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_every_matching_post_appears_exactly_once() {
        let store = store();
        let posts = visible_posts(&store, &selection(CategoryFilter::All, Some("ai")));
        assert_eq!(posts.len(), 2);
        let mut seen = posts.iter().map(|p| &p.id).collect::<Vec<_>>();
        seen.dedup();
        assert_eq!(seen.len(), posts.len());
    }

    #[test]
    fn test_tag_matches_ignores_case() {
        let sel = selection(CategoryFilter::All, Some("Azure"));
        assert!(sel.tag_matches("azure"));
        assert!(sel.tag_matches("AZURE"));
        assert!(!sel.tag_matches("networking"));
        assert!(!Selection::default().tag_matches("azure"));
    }
}
