use crate::EntityHandle;
use crate::Handle;
use crate::ParsedPath;
use crate::Result;
use crate::plan;
use bsfs_api::Api;
use bsfs_api::EntityRef;
use bsfs_api::Payload;
use bsfs_schema::CategoryKind;
use bsfs_schema::EntityKind;
use std::cell::Cell;
use tracing::debug;
use tracing::trace;

/// Resolve a normalized path to a handle.
///
/// The path is first planned against the schema,
/// which rejects malformed paths without any backend call.
/// Resolution then starts with exactly one fetch:
/// the deepest directly fetchable entity on the path,
/// or the root entity if there is none.
/// The rest of the path is walked one segment at a time.
///
/// A path ending on a category yields [`Handle::Category`],
/// one ending on an identifier yields [`Handle::Entity`].
/// The root path itself never resolves.
pub fn resolve(api: &(impl Api + ?Sized), path: &ParsedPath) -> Result<Handle>
{
    let api = Counted{api, calls: Cell::new(0)};
    let handle = resolve_planned(&api, path);
    debug!(%path, calls = api.calls.get(), ok = handle.is_ok(), "resolved");
    handle
}

fn resolve_planned(api: &(impl Api + ?Sized), path: &ParsedPath)
    -> Result<Handle>
{
    let plan = plan(path.segments())?;
    debug!(%path, direct_fetch = ?plan.direct_fetch,
           remaining = plan.remaining.len(), target = ?plan.target,
           "planned resolution");

    let start = match &plan.direct_fetch {
        Some((category, id)) => {
            let payload = api.get_entity_by_id(*category, id)?;
            EntityHandle::new(category.entity(), payload)
        },
        None => {
            let payload = api.get_root_entity()?;
            EntityHandle::new(EntityKind::ROOT, payload)
        },
    };

    let mut handle = Handle::Entity(start);
    for segment in &plan.remaining {
        trace!(from = handle.id(), %segment, "descending");
        handle = handle.child(api, segment)?;
    }

    Ok(handle)
}

/// Facade wrapper that counts the calls made through it.
struct Counted<'a, A: ?Sized>
{
    api:   &'a A,
    calls: Cell<u32>,
}

impl<'a, A> Api for Counted<'a, A>
    where A: Api + ?Sized
{
    fn get_root_entity(&self) -> bsfs_api::Result<Payload>
    {
        self.calls.set(self.calls.get() + 1);
        self.api.get_root_entity()
    }

    fn get_entity_by_id(&self, category: CategoryKind, id: &str)
        -> bsfs_api::Result<Payload>
    {
        self.calls.set(self.calls.get() + 1);
        self.api.get_entity_by_id(category, id)
    }

    fn list_children(&self, parent: EntityRef, category: CategoryKind,
                     offset: u64, limit: u64) -> bsfs_api::Result<Vec<Payload>>
    {
        self.calls.set(self.calls.get() + 1);
        self.api.list_children(parent, category, offset, limit)
    }
}
