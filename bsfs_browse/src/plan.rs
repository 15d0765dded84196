use crate::BrowseError;
use crate::Result;
use bsfs_schema::CategoryKind;
use bsfs_schema::EntityKind;

/// Position in the schema graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Node
{
    Entity(EntityKind),
    Category(CategoryKind),
}

/// How to resolve a path with as few backend calls as possible.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan
{
    /// Entity to fetch directly by identifier, if any.
    /// Without one, resolution starts from the root entity.
    pub direct_fetch: Option<(CategoryKind, String)>,

    /// Segments to walk one at a time after the starting entity.
    pub remaining: Vec<String>,

    /// Where the path ends up in the schema.
    pub target: Node,
}

/// Check a path against the schema and decide where to start resolving.
///
/// The walk follows the static graph only and makes no backend calls.
/// Every category segment is checked against the current entity’s
/// category map, and every entity segment against its identifier format,
/// so a malformed path fails here without any round-trip.
///
/// Of all the entities on the path that can be fetched directly,
/// the deepest one is chosen, since it leaves the fewest steps to walk.
pub fn plan(segments: &[String]) -> Result<Plan>
{
    if segments.is_empty() {
        return Err(BrowseError::InvalidPath("/".into()));
    }

    let mut node = Node::Entity(EntityKind::ROOT);
    let mut direct_fetch = None;
    let mut start = 0;

    for (i, segment) in segments.iter().enumerate() {
        node = match node {

            Node::Entity(entity) => {
                let category = entity.category(segment).ok_or_else(|| {
                    BrowseError::InvalidPath(display(&segments[..= i]))
                })?;
                Node::Category(category)
            },

            Node::Category(category) => {
                let entity = category.entity();
                if !entity.validate(segment) {
                    return Err(BrowseError::InvalidIdentifier{
                        kind: entity,
                        id: segment.clone(),
                    });
                }
                if category.is_direct() {
                    direct_fetch = Some((category, segment.clone()));
                    start = i + 1;
                }
                Node::Entity(entity)
            },

        };
    }

    Ok(
        Plan{
            direct_fetch,
            remaining: segments[start ..].to_vec(),
            target: node,
        }
    )
}

fn display(segments: &[String]) -> String
{
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn segments(path: &str) -> Vec<String>
    {
        path.split('/').map(String::from).collect()
    }

    const DATASET: &str = "ds.ac82a306af3847f2b53ecb695bc22400";

    #[test]
    fn test_plan_without_direct_fetch()
    {
        let plan = plan(&segments("projects")).unwrap();
        assert_eq!(plan.direct_fetch, None);
        assert_eq!(plan.remaining, ["projects"]);
        assert_eq!(plan.target, Node::Category(CategoryKind::Projects));
    }

    #[test]
    fn test_plan_latest_direct_fetch_wins()
    {
        let examples: &[(&str, (CategoryKind, &str), &[&str], Node)] = &[
            ("projects/1",
             (CategoryKind::Projects, "1"), &[],
             Node::Entity(EntityKind::Project)),
            ("projects/1/samples",
             (CategoryKind::Projects, "1"), &["samples"],
             Node::Category(CategoryKind::Samples)),
            ("projects/1/appresults/2/files/3",
             (CategoryKind::Files, "3"), &[],
             Node::Entity(EntityKind::File)),
            ("projects/1/appresults/2/files",
             (CategoryKind::AppResults, "2"), &["files"],
             Node::Category(CategoryKind::Files)),
            ("projects/1/appsessions/4/datasets",
             (CategoryKind::AppSessions, "4"), &["datasets"],
             Node::Category(CategoryKind::Datasets)),
        ];

        for &(path, (category, id), remaining, target) in examples {
            let plan = plan(&segments(path)).unwrap();
            assert_eq!(plan.direct_fetch, Some((category, id.to_string())),
                       "{}", path);
            assert_eq!(plan.remaining, remaining, "{}", path);
            assert_eq!(plan.target, target, "{}", path);
        }
    }

    #[test]
    fn test_plan_traversal_suffix()
    {
        let path = format!("projects/1/biosamples/2/datasets/{}/sequenced files/3",
                           DATASET);
        let plan = plan(&segments(&path)).unwrap();
        assert_eq!(plan.direct_fetch,
                   Some((CategoryKind::Datasets, DATASET.to_string())));
        assert_eq!(plan.remaining, ["sequenced files", "3"]);
        assert_eq!(plan.target, Node::Entity(EntityKind::SequencedFile));
    }

    #[test]
    fn test_plan_invalid_path()
    {
        let examples = &[
            "bogus",
            "Projects",
            "projects/123/bogus",
            "projects/123/files",
            "projects/123/samples/4/files/5/files",
            "projects/123/samples/4/datasets",
        ];

        for &path in examples {
            let result = plan(&segments(path));
            assert!(matches!(result, Err(BrowseError::InvalidPath(_))),
                    "{}: {:?}", path, result);
        }

        assert!(matches!(plan(&[]), Err(BrowseError::InvalidPath(_))));
    }

    #[test]
    fn test_plan_invalid_identifier()
    {
        let dataset_in_wrong_format =
            "projects/1/biosamples/2/datasets/12345".to_string();
        let examples: &[(&str, EntityKind)] = &[
            ("projects/abc", EntityKind::Project),
            ("projects/1/samples/x1/files", EntityKind::Sample),
            (dataset_in_wrong_format.as_str(), EntityKind::Dataset),
            ("projects/1/appresults/2/files/ds.00000000000000000000000000000000",
             EntityKind::File),
        ];

        for &(path, expected) in examples {
            match plan(&segments(path)) {
                Err(BrowseError::InvalidIdentifier{kind, ..}) =>
                    assert_eq!(kind, expected, "{}", path),
                other =>
                    panic!("{}: {:?}", path, other),
            }
        }
    }

    #[test]
    fn test_plan_checks_before_shortcut()
    {
        // The deep segments are valid, but an earlier one is not.
        // The plan must fail rather than skip to the files shortcut.
        let result = plan(&segments("projects/abc/appresults/2/files/3"));
        assert!(matches!(result, Err(BrowseError::InvalidIdentifier{..})));
    }
}
