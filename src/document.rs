//! The document structure the renderer writes into: a fixed set of named
//! container regions accepting HTML fragments. The page markup itself (and
//! whether a given container exists on a given page) belongs to whoever
//! authored the page; writing to a region a document doesn't carry is a
//! no-op by contract, never an error.

use std::collections::HashMap;

/// The named container regions of the listing page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The post list itself.
    PostList,

    /// The horizontal category filter bar above the list.
    CategoryFilter,

    /// The sidebar category list.
    SidebarCategories,

    /// The sidebar tag cloud.
    TagCloud,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::PostList,
        Region::CategoryFilter,
        Region::SidebarCategories,
        Region::TagCloud,
    ];

    /// The container's element id in the page markup.
    pub fn id(self) -> &'static str {
        match self {
            Region::PostList => "post-list",
            Region::CategoryFilter => "category-filter",
            Region::SidebarCategories => "sidebar-categories",
            Region::TagCloud => "tag-cloud",
        }
    }
}

/// A render target. Implementations decide which regions are present;
/// [`Document::set_html`] on an absent region must be a silent no-op so a
/// page that omits, say, the sidebar still renders its other regions.
pub trait Document {
    fn set_html(&mut self, region: Region, html: String);
}

/// An in-memory document holding a subset of the page regions. Backs the
/// static page assembly and the tests.
#[derive(Default)]
pub struct MemoryDocument {
    containers: HashMap<Region, String>,
}

impl MemoryDocument {
    /// A document carrying every region.
    pub fn full() -> MemoryDocument {
        MemoryDocument::with_regions(&Region::ALL)
    }

    /// A document carrying only `regions`; the rest are treated as absent.
    pub fn with_regions(regions: &[Region]) -> MemoryDocument {
        MemoryDocument {
            containers: regions.iter().map(|r| (*r, String::new())).collect(),
        }
    }

    /// The current contents of a region, or `None` if the document doesn't
    /// carry it.
    pub fn html(&self, region: Region) -> Option<&str> {
        self.containers.get(&region).map(String::as_str)
    }
}

impl Document for MemoryDocument {
    fn set_html(&mut self, region: Region, html: String) {
        if let Some(container) = self.containers.get_mut(&region) {
            *container = html;
        }
    }
}
