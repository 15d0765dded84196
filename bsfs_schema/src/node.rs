use std::fmt;

/// Kind of a concrete backend object.
///
/// Entity kinds are addressed in paths by identifier,
/// whose syntax is checked by [`EntityKind::validate`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EntityKind
{
    /// The authenticated principal.
    /// This is the implicit root and never appears in a path.
    User,

    Project,
    AppResult,
    Sample,
    File,
    Biosample,
    AppSession,
    Dataset,
    SequencedFile,
}

/// Kind of a named grouping of entities.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CategoryKind
{
    Projects,
    AppResults,
    Samples,
    Files,
    Biosamples,
    AppSessions,
    Datasets,
    SequencedFiles,
}

/// How an entity below a category is retrieved by identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fetch
{
    /// The backend has a one-shot lookup by identifier
    /// that does not need the parent entity.
    Direct,

    /// The entity can only be found among the parent’s children.
    Traversal,
}

/// Row of the category table.
#[derive(Debug)]
pub struct CategoryDescriptor
{
    pub kind:   CategoryKind,
    pub name:   &'static str,
    pub entity: EntityKind,
    pub fetch:  Fetch,
}

// Indexed by `CategoryKind as usize`.
static CATEGORIES: [CategoryDescriptor; 8] = [
    CategoryDescriptor{kind:   CategoryKind::Projects,
                       name:   "projects",
                       entity: EntityKind::Project,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::AppResults,
                       name:   "appresults",
                       entity: EntityKind::AppResult,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::Samples,
                       name:   "samples",
                       entity: EntityKind::Sample,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::Files,
                       name:   "files",
                       entity: EntityKind::File,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::Biosamples,
                       name:   "biosamples",
                       entity: EntityKind::Biosample,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::AppSessions,
                       name:   "appsessions",
                       entity: EntityKind::AppSession,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::Datasets,
                       name:   "datasets",
                       entity: EntityKind::Dataset,
                       fetch:  Fetch::Direct},
    CategoryDescriptor{kind:   CategoryKind::SequencedFiles,
                       name:   "sequenced files",
                       entity: EntityKind::SequencedFile,
                       fetch:  Fetch::Traversal},
];

/// Look up a category by its exact name.
///
/// Names are matched case-sensitively.
pub fn category_node(name: &str) -> Option<CategoryKind>
{
    CATEGORIES.iter()
        .find(|d| d.name == name)
        .map(|d| d.kind)
}

/// The categories reachable from an entity, in listing order.
pub fn entity_children(entity: EntityKind) -> &'static [CategoryKind]
{
    use CategoryKind::*;
    match entity {
        EntityKind::User          => &[Projects],
        EntityKind::Project       => &[AppResults, Samples,
                                       Biosamples, AppSessions],
        EntityKind::AppResult     => &[Files],
        EntityKind::Sample        => &[Files],
        EntityKind::Biosample     => &[Datasets],
        EntityKind::AppSession    => &[Datasets],
        EntityKind::Dataset       => &[SequencedFiles],
        EntityKind::File          => &[],
        EntityKind::SequencedFile => &[],
    }
}

/// The single category below the root entity.
pub fn root_category() -> CategoryKind
{
    CategoryKind::Projects
}

impl EntityKind
{
    /// The entity every resolution walk starts from.
    pub const ROOT: Self = Self::User;

    /// Find the category with the given name
    /// in this entity’s category map.
    pub fn category(self, name: &str) -> Option<CategoryKind>
    {
        entity_children(self).iter()
            .copied()
            .find(|c| c.name() == name)
    }

    /// Whether this entity has no categories below it.
    pub fn is_leaf(self) -> bool
    {
        entity_children(self).is_empty()
    }
}

impl CategoryKind
{
    pub fn descriptor(self) -> &'static CategoryDescriptor
    {
        &CATEGORIES[self as usize]
    }

    pub fn name(self) -> &'static str
    {
        self.descriptor().name
    }

    /// The kind of entity listed in this category.
    pub fn entity(self) -> EntityKind
    {
        self.descriptor().entity
    }

    pub fn fetch(self) -> Fetch
    {
        self.descriptor().fetch
    }

    pub fn is_direct(self) -> bool
    {
        self.fetch() == Fetch::Direct
    }
}

impl fmt::Display for CategoryKind
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        f.write_str(self.name())
    }
}
