use crate::Payload;
use crate::Result;
use bsfs_schema::CategoryKind;
use bsfs_schema::EntityKind;

/// Identifier under which the root entity is addressed.
pub const CURRENT_USER: &str = "current";

/// Reference to an already fetched entity,
/// used to address its children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntityRef<'a>
{
    pub kind: EntityKind,
    pub id:   &'a str,
}

/// Logical operations the browsing engine needs from the backend.
///
/// Every method is a single blocking round-trip.
/// Implementations do their own retrying, if any.
/// Listing order must be stable between calls,
/// otherwise windows of the same collection may overlap or skip.
pub trait Api
{
    /// Fetch the implicit root entity, the authenticated user.
    fn get_root_entity(&self) -> Result<Payload>;

    /// Fetch an entity of the category’s entity kind by identifier,
    /// without going through its parent.
    ///
    /// Only defined for categories with [`Fetch::Direct`];
    /// others fail with [`ApiError::Unsupported`].
    ///
    /// [`Fetch::Direct`]: bsfs_schema::Fetch::Direct
    /// [`ApiError::Unsupported`]: crate::ApiError::Unsupported
    fn get_entity_by_id(&self, category: CategoryKind, id: &str)
        -> Result<Payload>;

    /// Fetch at most `limit` children of `parent` in `category`,
    /// starting at index `offset`.
    fn list_children(&self, parent: EntityRef, category: CategoryKind,
                     offset: u64, limit: u64) -> Result<Vec<Payload>>;
}

impl<'a, A> Api for &'a A
    where A: Api + ?Sized
{
    fn get_root_entity(&self) -> Result<Payload>
    {
        (**self).get_root_entity()
    }

    fn get_entity_by_id(&self, category: CategoryKind, id: &str)
        -> Result<Payload>
    {
        (**self).get_entity_by_id(category, id)
    }

    fn list_children(&self, parent: EntityRef, category: CategoryKind,
                     offset: u64, limit: u64) -> Result<Vec<Payload>>
    {
        (**self).list_children(parent, category, offset, limit)
    }
}
