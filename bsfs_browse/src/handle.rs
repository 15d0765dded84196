use crate::BrowseError;
use crate::MAX_PAGE_LIMIT;
use crate::Result;
use bsfs_api::Api;
use bsfs_api::EntityRef;
use bsfs_api::Payload;
use bsfs_iterutil::paginate;
use bsfs_schema::CategoryKind;
use bsfs_schema::EntityKind;
use bsfs_schema::Fetch;
use bsfs_schema::entity_children;
use serde_json::Value;

/// Resolved position in the namespace.
///
/// Handles are only created by resolution and listing,
/// never change afterwards,
/// and are meant to be dropped when the operation that
/// produced them is over.
#[derive(Clone, Debug, PartialEq)]
pub enum Handle
{
    Category(CategoryHandle),
    Entity(EntityHandle),
}

/// A category below some entity.
///
/// This holds no backend data of its own;
/// it is fully described by its kind and its parent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryHandle
{
    kind:        CategoryKind,
    parent_kind: EntityKind,
    parent_id:   String,
}

/// A backend object of a known entity kind.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityHandle
{
    kind:    EntityKind,
    payload: Payload,
}

impl Handle
{
    /// Identifier of the handle, which is also its path segment.
    /// For categories this is the category name.
    pub fn id(&self) -> &str
    {
        match self {
            Self::Category(c) => c.name(),
            Self::Entity(e)   => e.id(),
        }
    }

    /// Human-readable name.
    /// Falls back to the identifier if the backend has none.
    pub fn display_name(&self) -> &str
    {
        match self {
            Self::Category(c) => c.name(),
            Self::Entity(e)   => e.display_name(),
        }
    }

    pub fn is_category(&self) -> bool
    {
        matches!(self, Self::Category(_))
    }

    pub fn is_leaf_entity(&self) -> bool
    {
        matches!(self, Self::Entity(e) if e.is_leaf())
    }

    /// Response body the entity was read from.
    /// Categories have none.
    pub fn raw_payload(&self) -> Option<&Value>
    {
        match self {
            Self::Category(_) => None,
            Self::Entity(e)   => Some(&e.payload().raw),
        }
    }

    /// Step to the child named by the segment.
    ///
    /// From an entity this is a lookup in its category map
    /// and costs nothing.
    /// From a category this fetches the entity with that identifier.
    pub fn child(&self, api: &(impl Api + ?Sized), segment: &str)
        -> Result<Handle>
    {
        match self {
            Self::Entity(entity) => {
                let category = entity.category(segment).ok_or_else(|| {
                    let path = format!("{}/{}", entity.id(), segment);
                    BrowseError::InvalidPath(path)
                })?;
                Ok(Self::Category(category))
            },
            Self::Category(category) =>
                category.get(api, segment).map(Self::Entity),
        }
    }
}

impl CategoryHandle
{
    pub fn kind(&self) -> CategoryKind
    {
        self.kind
    }

    pub fn name(&self) -> &'static str
    {
        self.kind.name()
    }

    /// The entity this category belongs to.
    pub fn parent(&self) -> EntityRef
    {
        EntityRef{kind: self.parent_kind, id: &self.parent_id}
    }

    /// Fetch the entity with the given identifier in this category.
    ///
    /// Direct categories cost one call.
    /// Others are searched page by page through the parent’s listing.
    pub fn get(&self, api: &(impl Api + ?Sized), id: &str)
        -> Result<EntityHandle>
    {
        let entity = self.kind.entity();
        if !entity.validate(id) {
            let id = id.to_string();
            return Err(BrowseError::InvalidIdentifier{kind: entity, id});
        }

        let payload = match self.kind.fetch() {
            Fetch::Direct    => api.get_entity_by_id(self.kind, id)?,
            Fetch::Traversal => self.find(api, id)?,
        };

        Ok(EntityHandle::new(entity, payload))
    }

    fn find(&self, api: &(impl Api + ?Sized), id: &str) -> Result<Payload>
    {
        let parent = self.parent();
        let children = paginate(0, None, MAX_PAGE_LIMIT, |offset, limit| {
            api.list_children(parent, self.kind, offset, limit)
        });

        for payload in children {
            let payload = payload?;
            if payload.id == id {
                return Ok(payload);
            }
        }

        let path = format!("{}/{}/{}", parent.id, self.name(), id);
        Err(BrowseError::ResourceNotFound(path))
    }
}

impl EntityHandle
{
    /// Wrap a payload as an entity of the given kind.
    pub fn new(kind: EntityKind, payload: Payload) -> Self
    {
        Self{kind, payload}
    }

    pub fn kind(&self) -> EntityKind
    {
        self.kind
    }

    pub fn id(&self) -> &str
    {
        &self.payload.id
    }

    pub fn display_name(&self) -> &str
    {
        self.payload.name.as_deref().unwrap_or(&self.payload.id)
    }

    pub fn payload(&self) -> &Payload
    {
        &self.payload
    }

    pub fn is_leaf(&self) -> bool
    {
        self.kind.is_leaf()
    }

    /// The category of this entity with the given name.
    pub fn category(&self, name: &str) -> Option<CategoryHandle>
    {
        self.kind.category(name).map(|kind| self.category_handle(kind))
    }

    /// All categories of this entity, in schema order.
    pub fn categories(&self) -> Vec<CategoryHandle>
    {
        entity_children(self.kind).iter()
            .map(|&kind| self.category_handle(kind))
            .collect()
    }

    fn category_handle(&self, kind: CategoryKind) -> CategoryHandle
    {
        CategoryHandle{
            kind,
            parent_kind: self.kind,
            parent_id:   self.payload.id.clone(),
        }
    }
}
