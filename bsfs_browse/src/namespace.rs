use crate::BrowseError;
use crate::Handle;
use crate::Info;
use crate::Page;
use crate::ParsedPath;
use crate::Result;
use crate::list;
use crate::resolve;
use bsfs_api::Api;

/// The namespace as seen from a browse root.
///
/// Every path given to the methods of this type
/// is taken relative to the root,
/// and may not climb above it with `..`.
/// Each method is a single logical operation;
/// the handles it produces are dropped when it returns.
pub struct Namespace<A>
{
    api: A,
    root: ParsedPath,
}

impl<A> Namespace<A>
    where A: Api
{
    pub fn new(api: A, root: &str) -> Result<Self>
    {
        let root = parse(root)?;
        Ok(Self{api, root})
    }

    pub fn api(&self) -> &A
    {
        &self.api
    }

    pub fn root(&self) -> &ParsedPath
    {
        &self.root
    }

    pub fn resolve(&self, path: &str) -> Result<Handle>
    {
        let path = self.root.join(&parse(path)?);
        resolve(&self.api, &path)
    }

    pub fn list(&self, path: &str, page: Option<Page>) -> Result<Vec<Handle>>
    {
        let handle = self.resolve(path)?;
        list(&self.api, &handle, page)
    }

    pub fn getinfo(&self, path: &str) -> Result<Info>
    {
        let handle = self.resolve(path)?;
        Ok(Info::from_handle(&handle))
    }

    /// Identifiers of all children, sorted.
    pub fn listdir(&self, path: &str) -> Result<Vec<String>>
    {
        let mut ids: Vec<_> =
            self.list(path, None)?.iter()
            .map(|handle| handle.id().to_string())
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Info of the children in a window, in listing order.
    pub fn scandir(&self, path: &str, page: Option<Page>) -> Result<Vec<Info>>
    {
        let children = self.list(path, page)?;
        Ok(children.iter().map(Info::from_handle).collect())
    }
}

fn parse(path: &str) -> Result<ParsedPath>
{
    path.parse()
        .map_err(|_| BrowseError::InvalidPath(path.to_string()))
}
