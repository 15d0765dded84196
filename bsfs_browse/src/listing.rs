use crate::BrowseError;
use crate::EntityHandle;
use crate::Handle;
use crate::Result;
use bsfs_api::Api;
use bsfs_iterutil::paginate;
use std::convert::TryFrom;
use tracing::debug;

/// Largest page the backend serves in one request.
pub const MAX_PAGE_LIMIT: u64 = 1024;

/// Half-open window `[start, end)` into a listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Page
{
    pub start: u64,
    pub end:   u64,
}

impl Page
{
    pub fn new(start: u64, end: u64) -> Self
    {
        Self{start, end}
    }

    pub fn offset(self) -> u64
    {
        self.start
    }

    /// Number of children in the window; zero if `end <= start`.
    pub fn limit(self) -> u64
    {
        self.end.saturating_sub(self.start)
    }
}

/// List the children of a handle, optionally windowed.
///
/// Children of a category are fetched from the backend,
/// in as many requests as the window needs.
/// Without a window the whole collection is walked.
/// Children of a branching entity are its categories
/// and cost no request at all.
/// Leaf entities have no children and fail with
/// [`BrowseError::NotListable`].
///
/// The same window over an unchanged collection
/// always yields the same children.
pub fn list(api: &(impl Api + ?Sized), handle: &Handle, page: Option<Page>)
    -> Result<Vec<Handle>>
{
    if let Some(page) = page {
        if page.limit() == 0 && !handle.is_leaf_entity() {
            return Ok(Vec::new());
        }
    }

    match handle {

        Handle::Entity(entity) if entity.is_leaf() =>
            Err(BrowseError::NotListable(entity.id().to_string())),

        Handle::Entity(entity) => {
            let (skip, take) = match page {
                Some(page) => (to_usize(page.offset()), to_usize(page.limit())),
                None       => (0, usize::MAX),
            };
            let categories = entity.categories().into_iter()
                .skip(skip)
                .take(take)
                .map(Handle::Category)
                .collect();
            Ok(categories)
        },

        Handle::Category(category) => {
            let kind = category.kind();
            let parent = category.parent();
            let (offset, bound) = match page {
                Some(page) => (page.offset(), Some(page.limit())),
                None       => (0, None),
            };

            let mut requests = 0;
            let children =
                paginate(offset, bound, MAX_PAGE_LIMIT, |offset, limit| {
                    requests += 1;
                    api.list_children(parent, kind, offset, limit)
                })
                .map(|payload| -> Result<Handle> {
                    let entity = EntityHandle::new(kind.entity(), payload?);
                    Ok(Handle::Entity(entity))
                })
                .collect::<Result<Vec<_>>>()?;

            debug!(parent = parent.id, category = %kind, ?page,
                   children = children.len(), requests, "listed");
            Ok(children)
        },

    }
}

fn to_usize(n: u64) -> usize
{
    usize::try_from(n).unwrap_or(usize::MAX)
}
