use crate::Handle;
use serde::Serialize;

/// Description of a resolved handle,
/// grouped in the namespaces file browsers ask for.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Info
{
    pub basic: Basic,

    /// Only for entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,

    /// Only for branching entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Basic
{
    /// Path segment naming the handle.
    pub name: String,

    /// Human-readable name.
    pub alias: String,

    pub is_dir: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Details
{
    pub resource_type: ResourceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType
{
    Directory,
    File,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Access
{
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl Info
{
    pub fn from_handle(handle: &Handle) -> Self
    {
        let is_dir = !handle.is_leaf_entity();
        let basic = Basic{
            name:   handle.id().to_string(),
            alias:  handle.display_name().to_string(),
            is_dir,
        };

        let entity = match handle {
            Handle::Category(_) => return Self{basic, details: None, access: None},
            Handle::Entity(entity) => entity,
        };
        let payload = entity.payload();

        let details = Details{
            resource_type: if is_dir { ResourceType::Directory }
                           else { ResourceType::File },
            created: payload.date_created.clone(),
            size: if is_dir { None } else { payload.size },
        };

        let access = if is_dir {
            Some(Access{
                owner: payload.owner.clone(),
                permissions: payload.permissions().map(String::from),
            })
        } else {
            None
        };

        Self{basic, details: Some(details), access}
    }
}
