//! The selection controller: the one owner of the mutable category/tag
//! selection. Click events arrive as delegated (region, attribute) pairs,
//! get translated into domain [`Action`]s, applied to the selection, and
//! answered with a re-render scoped to the regions the transition affects.
//! Every cycle completes synchronously; the next event simply supersedes the
//! previous rendered output.

use crate::document::{Document, Region};
use crate::filter::{CategoryFilter, Selection};
use crate::post::Store;
use crate::render::{Renderer, Result};

/// A domain action derived from a click on one of the listing's interactive
/// regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// A filter-bar click. The tag filter is left alone.
    SetCategory(CategoryFilter),

    /// A sidebar category click. Unlike [`Action::SetCategory`] this also
    /// clears the tag filter; the asymmetry is part of the observed page
    /// contract.
    SelectSidebarCategory(String),

    /// A tag click, from the cloud or from a tag affordance inside a post
    /// card. Clicking the currently selected tag (under the
    /// case-insensitive key) toggles the filter off.
    ToggleTag(String),
}

/// Translates a delegated click into an [`Action`]. Each logical region has
/// one handler; on dispatch it reads the originating element's data
/// attribute and hands the name/value pair here. Clicks on anything that
/// isn't an interactive affordance come back as `None`.
pub fn delegate(region: Region, attribute: &str, value: &str) -> Option<Action> {
    match (region, attribute) {
        (Region::CategoryFilter, "data-category") => {
            Some(Action::SetCategory(match value {
                "all" => CategoryFilter::All,
                category => CategoryFilter::Category(category.to_owned()),
            }))
        }
        (Region::SidebarCategories, "data-category") => {
            Some(Action::SelectSidebarCategory(value.to_owned()))
        }
        (Region::TagCloud, "data-tag") | (Region::PostList, "data-tag") => {
            Some(Action::ToggleTag(value.to_owned()))
        }
        _ => None,
    }
}

/// Owns the selection for the lifetime of one page view. Constructed once at
/// page load with the `{all, no tag}` selection and discarded on navigation.
pub struct Controller<'a> {
    store: &'a Store,
    renderer: &'a Renderer,
    selection: Selection,
}

impl<'a> Controller<'a> {
    pub fn new(store: &'a Store, renderer: &'a Renderer) -> Controller<'a> {
        Controller {
            store,
            renderer,
            selection: Selection::default(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The initial render of every region.
    pub fn init(&self, doc: &mut impl Document) -> Result<()> {
        self.renderer.render_all(self.store, &self.selection, doc)
    }

    /// Applies one action and re-renders exactly the regions the transition
    /// affects: the post list always, the filter bar for category changes,
    /// the tag cloud whenever the tag filter may have changed.
    pub fn apply(&mut self, action: Action, doc: &mut impl Document) -> Result<()> {
        match action {
            Action::SetCategory(category) => {
                self.selection.category = category;
                self.renderer.render_posts(self.store, &self.selection, doc)?;
                self.renderer
                    .render_category_filter(self.store, &self.selection, doc)
            }
            Action::SelectSidebarCategory(category) => {
                self.selection.category = CategoryFilter::Category(category);
                self.selection.tag = None;
                self.renderer.render_posts(self.store, &self.selection, doc)?;
                self.renderer
                    .render_category_filter(self.store, &self.selection, doc)?;
                self.renderer
                    .render_tag_cloud(self.store, &self.selection, doc)
            }
            Action::ToggleTag(tag) => {
                self.selection.tag = if self.selection.tag_matches(&tag) {
                    None
                } else {
                    Some(tag)
                };
                self.renderer.render_posts(self.store, &self.selection, doc)?;
                self.renderer
                    .render_tag_cloud(self.store, &self.selection, doc)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::post::Store;

    fn store() -> Store {
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

    fn fixture() -> (Store, Renderer) {
        (store(), Renderer::new().unwrap())
    }

    #[test]
    fn test_initial_selection_is_all_and_untagged() {
        let (store, renderer) = fixture();
        let controller = Controller::new(&store, &renderer);
        assert_eq!(controller.selection().category, CategoryFilter::All);
        assert_eq!(controller.selection().tag, None);
    }

    #[test]
    fn test_tag_toggle_round_trips() -> Result<()> {
        let (store, renderer) = fixture();
        let mut controller = Controller::new(&store, &renderer);
        let mut doc = MemoryDocument::full();
        controller.init(&mut doc)?;

        controller.apply(Action::ToggleTag("Growth".to_owned()), &mut doc)?;
        assert_eq!(controller.selection().tag.as_deref(), Some("Growth"));

        // Same tag in another casing still toggles off.
        controller.apply(Action::ToggleTag("growth".to_owned()), &mut doc)?;
        assert_eq!(controller.selection().tag, None);
        Ok(())
    }

    #[test]
    fn test_new_tag_replaces_old_selection() -> Result<()> {
        let (store, renderer) = fixture();
        let mut controller = Controller::new(&store, &renderer);
        let mut doc = MemoryDocument::full();

        controller.apply(Action::ToggleTag("AI".to_owned()), &mut doc)?;
        controller.apply(Action::ToggleTag("Growth".to_owned()), &mut doc)?;
        assert_eq!(controller.selection().tag.as_deref(), Some("Growth"));
        Ok(())
    }

    #[test]
    fn test_category_click_preserves_tag() -> Result<()> {
        let (store, renderer) = fixture();
        let mut controller = Controller::new(&store, &renderer);
        let mut doc = MemoryDocument::full();

        controller.apply(Action::ToggleTag("AI".to_owned()), &mut doc)?;
        controller.apply(
            Action::SetCategory(CategoryFilter::Category("tech".to_owned())),
            &mut doc,
        )?;
        assert_eq!(controller.selection().tag.as_deref(), Some("AI"));
        assert_eq!(
            controller.selection().category,
            CategoryFilter::Category("tech".to_owned())
        );
        Ok(())
    }

    #[test]
    fn test_sidebar_click_clears_tag() -> Result<()> {
        let (store, renderer) = fixture();
        let mut controller = Controller::new(&store, &renderer);
        let mut doc = MemoryDocument::full();

        controller.apply(Action::ToggleTag("AI".to_owned()), &mut doc)?;
        controller.apply(
            Action::SelectSidebarCategory("life".to_owned()),
            &mut doc,
        )?;
        assert_eq!(controller.selection().tag, None);
        assert_eq!(
            controller.selection().category,
            CategoryFilter::Category("life".to_owned())
        );
        Ok(())
    }

    #[test]
    fn test_category_click_rerenders_posts_and_filter_only() -> Result<()> {
        let (store, renderer) = fixture();
        let mut controller = Controller::new(&store, &renderer);
        let mut doc = MemoryDocument::full();
        controller.init(&mut doc)?;

        // Plant a sentinel where the controller must not re-render.
        doc.set_html(Region::TagCloud, "sentinel".to_owned());
        doc.set_html(Region::SidebarCategories, "sentinel".to_owned());

        controller.apply(
            Action::SetCategory(CategoryFilter::Category("tech".to_owned())),
            &mut doc,
        )?;
        assert_eq!(doc.html(Region::TagCloud), Some("sentinel"));
        assert_eq!(doc.html(Region::SidebarCategories), Some("sentinel"));
        assert!(doc.html(Region::PostList).unwrap().contains("posts/post1.html"));
        assert!(!doc.html(Region::PostList).unwrap().contains("posts/post2.html"));
        Ok(())
    }

    #[test]
    fn test_tag_click_rerenders_tag_cloud_but_not_filter_bar() -> Result<()> {
        let (store, renderer) = fixture();
        let mut controller = Controller::new(&store, &renderer);
        let mut doc = MemoryDocument::full();
        controller.init(&mut doc)?;

        doc.set_html(Region::CategoryFilter, "sentinel".to_owned());
        controller.apply(Action::ToggleTag("Growth".to_owned()), &mut doc)?;
        assert_eq!(doc.html(Region::CategoryFilter), Some("sentinel"));
        assert!(doc
            .html(Region::TagCloud)
            .unwrap()
            .contains("tag active\" data-tag=\"Growth\""));
        Ok(())
    }

    #[test]
    fn test_delegate_maps_regions_to_actions() {
        assert_eq!(
            delegate(Region::CategoryFilter, "data-category", "all"),
            Some(Action::SetCategory(CategoryFilter::All))
        );
        assert_eq!(
            delegate(Region::CategoryFilter, "data-category", "tech"),
            Some(Action::SetCategory(CategoryFilter::Category(
                "tech".to_owned()
            )))
        );
        assert_eq!(
            delegate(Region::SidebarCategories, "data-category", "life"),
            Some(Action::SelectSidebarCategory("life".to_owned()))
        );
        assert_eq!(
            delegate(Region::PostList, "data-tag", "Azure"),
            Some(Action::ToggleTag("Azure".to_owned()))
        );
        assert_eq!(
            delegate(Region::TagCloud, "data-tag", "Azure"),
            Some(Action::ToggleTag("Azure".to_owned()))
        );
        // A click somewhere inert.
        assert_eq!(delegate(Region::PostList, "data-category", "tech"), None);
    }
}
