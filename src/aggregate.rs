//! Derived summaries over the store: per-category counts for the filter bar
//! and sidebar, and the frequency-ordered tag cloud.
//!
//! Both aggregations group with a linear scan over a vector instead of a map
//! so that ties naturally keep first-encountered order; the store is a small,
//! fixed list and the scan is per page-load, not per keystroke.

use crate::post::{tag_key, Store};

/// One category group: the grouping key, the display label taken from the
/// first-seen post in the group, and the number of posts in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub key: String,
    pub label: String,
    pub count: usize,
}

/// One tag-cloud entry: the first-seen casing for display, the
/// case-insensitive grouping key, and the number of taggings carrying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagCount {
    pub display: String,
    pub key: String,
    pub count: usize,
}

/// Groups all posts by category. Uncategorized records fall under the
/// `uncategorized` key. Sorted by count descending; ties keep the order the
/// groups first appeared in the store.
pub fn category_counts(store: &Store) -> Vec<CategoryCount> {
    let mut groups: Vec<CategoryCount> = Vec::new();
    for post in store.posts() {
        let key = post.category_key();
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.count += 1,
            None => groups.push(CategoryCount {
                key: key.to_owned(),
                label: post.category_display().to_owned(),
                count: 1,
            }),
        }
    }
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}

/// Counts every tagging across the store. Tags are trimmed, empties are
/// skipped, and casings merge under the case-insensitive key with the
/// first-seen casing kept for display. Sorted by count descending; ties keep
/// first-seen order.
pub fn tag_counts(store: &Store) -> Vec<TagCount> {
    let mut groups: Vec<TagCount> = Vec::new();
    for post in store.posts() {
        for tag in &post.tags {
            let display = tag.trim();
            if display.is_empty() {
                continue;
            }
            let key = tag_key(tag);
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.count += 1,
                None => groups.push(TagCount {
                    display: display.to_owned(),
                    key,
                    count: 1,
                }),
            }
        }
    }
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
