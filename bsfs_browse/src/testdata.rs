//! In-memory backend for tests.
//!
//! The data is a small account with one project,
//! shaped like the real service’s responses
//! so that it exercises every level of the schema.

use crate::EntityHandle;
use crate::Handle;
use bsfs_api::Api;
use bsfs_api::ApiError;
use bsfs_api::EntityRef;
use bsfs_api::Payload;
use bsfs_api::Result;
use bsfs_schema::CategoryKind;
use bsfs_schema::EntityKind;
use serde_json::Value;
use serde_json::json;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::SeqCst;

pub const USER_ID: &str = "1463464";

pub const PROJECT_ID: &str = "86591915";
pub const FORBIDDEN_PROJECT_ID: &str = "86591916";

pub const BIOSAMPLE_IDS: [&str; 10] = [
    "104555093", "104555094", "104555095", "104555096", "104555097",
    "104555098", "104555099", "104555100", "104555101", "104555102",
];

pub const DATASET_ID: &str = "ds.ac82a306af3847f2b53ecb695bc22400";
pub const SEQUENCED_FILE_IDS: [&str; 2] = ["11710715826", "11710715827"];
pub const SEQUENCED_FILE_NAMES: [&str; 2] = [
    "NA12878_S1_L001_R1_001.fastq.gz",
    "NA12878_S1_L001_R2_001.fastq.gz",
];

pub const APPRESULT_ID: &str = "219254040";
pub const APPRESULT_FILE_IDS: [&str; 2] = ["17470305718", "17470305719"];

pub const SAMPLE_ID: &str = "308227936";
pub const SAMPLE_FILE_ID: &str = "17470305720";

pub const APPSESSION_ID: &str = "285124840";
pub const APPSESSION_DATASET_ID: &str = "ds.0c4b51a1b0d34a7c9e0a4a3c54d5e1f2";

const COLLECTION_PROJECT_ID: &str = "1";

/// Backend call, as recorded by [`FakeApi`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call
{
    Root,
    Direct(CategoryKind, String),
    List{
        parent_kind: EntityKind,
        parent_id:   String,
        category:    CategoryKind,
        offset:      u64,
        limit:       u64,
    },
}

type ChildrenKey = (EntityKind, String, CategoryKind);

pub struct FakeApi
{
    root:        Payload,
    entities:    HashMap<(CategoryKind, String), Payload>,
    children:    HashMap<ChildrenKey, Vec<Payload>>,
    forbidden:   HashSet<String>,
    unavailable: AtomicBool,
    calls:       Mutex<Vec<Call>>,
}

impl FakeApi
{
    /// The standard test account.
    pub fn new() -> Self
    {
        let mut api = Self::empty();

        let project = entity(json!({
            "Id": PROJECT_ID,
            "Name": "Emedgene",
            "DateCreated": "2020-04-03T09:15:21.0000000",
            "UserOwnedBy": {"Id": USER_ID},
            "Access": "owner read write",
        }));
        api.attach(EntityKind::User, USER_ID, CategoryKind::Projects, project);

        let forbidden = entity(json!({"Id": FORBIDDEN_PROJECT_ID}));
        api.entities.insert((CategoryKind::Projects, FORBIDDEN_PROJECT_ID.into()),
                            forbidden);
        api.forbidden.insert(FORBIDDEN_PROJECT_ID.into());

        for (i, &id) in BIOSAMPLE_IDS.iter().enumerate() {
            let biosample = entity(json!({
                "Id": id,
                "BioSampleName": format!("NA12878-{}", i + 1),
                "DateCreated": "2020-04-03T09:20:00.0000000Z",
            }));
            api.attach(EntityKind::Project, PROJECT_ID,
                       CategoryKind::Biosamples, biosample);
        }

        let dataset = entity(json!({
            "Id": DATASET_ID,
            "Name": "NA12878_L001",
            "DateCreated": "2020-04-03T10:01:13.0000000Z",
        }));
        api.attach(EntityKind::Biosample, BIOSAMPLE_IDS[0],
                   CategoryKind::Datasets, dataset);

        for (&id, &name) in SEQUENCED_FILE_IDS.iter()
                                .zip(SEQUENCED_FILE_NAMES.iter()) {
            let file = entity(json!({
                "Id": id,
                "Name": name,
                "Size": 2_161_346_578u64,
                "DateCreated": "2020-04-03T10:01:14.0000000Z",
                "HrefContent": format!("https://example.com/{}", id),
            }));
            api.attach(EntityKind::Dataset, DATASET_ID,
                       CategoryKind::SequencedFiles, file);
        }

        let appresult = entity(json!({"Id": APPRESULT_ID, "Name": "Alignment"}));
        api.attach(EntityKind::Project, PROJECT_ID,
                   CategoryKind::AppResults, appresult);
        for &id in &APPRESULT_FILE_IDS {
            let file = entity(json!({"Id": id, "Name": "out.bam", "Size": 10}));
            api.attach(EntityKind::AppResult, APPRESULT_ID,
                       CategoryKind::Files, file);
        }

        let sample = entity(json!({"Id": SAMPLE_ID, "Name": "NA12878"}));
        api.attach(EntityKind::Project, PROJECT_ID,
                   CategoryKind::Samples, sample);
        let file = entity(json!({"Id": SAMPLE_FILE_ID, "Name": "R1.fastq.gz",
                                 "Size": 20}));
        api.attach(EntityKind::Sample, SAMPLE_ID, CategoryKind::Files, file);

        let appsession = entity(json!({"Id": APPSESSION_ID, "Name": "FASTQ"}));
        api.attach(EntityKind::Project, PROJECT_ID,
                   CategoryKind::AppSessions, appsession);
        let dataset = entity(json!({"Id": APPSESSION_DATASET_ID}));
        api.attach(EntityKind::AppSession, APPSESSION_ID,
                   CategoryKind::Datasets, dataset);

        api
    }

    fn empty() -> Self
    {
        Self{
            root:        entity(json!({"Id": USER_ID, "Name": "Test User"})),
            entities:    HashMap::new(),
            children:    HashMap::new(),
            forbidden:   HashSet::new(),
            unavailable: AtomicBool::new(false),
            calls:       Mutex::new(Vec::new()),
        }
    }

    /// Add a child to a parent’s listing.
    /// Children of direct categories also become fetchable by identifier.
    pub fn attach(&mut self, parent_kind: EntityKind, parent_id: &str,
                  category: CategoryKind, payload: Payload)
    {
        if category.is_direct() {
            let key = (category, payload.id.clone());
            self.entities.insert(key, payload.clone());
        }
        let key = (parent_kind, parent_id.to_string(), category);
        self.children.entry(key).or_default().push(payload);
    }

    /// Make every call fail as if the server were down.
    pub fn set_unavailable(&self, unavailable: bool)
    {
        self.unavailable.store(unavailable, SeqCst);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call>
    {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()>
    {
        self.calls.lock().unwrap().push(call);
        if self.unavailable.load(SeqCst) {
            return Err(ApiError::Status{
                status: 503,
                message: "Service Unavailable".into(),
            });
        }
        Ok(())
    }
}

impl Api for FakeApi
{
    fn get_root_entity(&self) -> Result<Payload>
    {
        self.record(Call::Root)?;
        Ok(self.root.clone())
    }

    fn get_entity_by_id(&self, category: CategoryKind, id: &str)
        -> Result<Payload>
    {
        self.record(Call::Direct(category, id.to_string()))?;
        if !category.is_direct() {
            return Err(ApiError::Unsupported(category.to_string()));
        }
        if self.forbidden.contains(id) {
            return Err(ApiError::Forbidden(id.to_string()));
        }
        self.entities.get(&(category, id.to_string()))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    fn list_children(&self, parent: EntityRef, category: CategoryKind,
                     offset: u64, limit: u64) -> Result<Vec<Payload>>
    {
        self.record(Call::List{
            parent_kind: parent.kind,
            parent_id:   parent.id.to_string(),
            category,
            offset,
            limit,
        })?;

        let key = (parent.kind, parent.id.to_string(), category);
        let children = self.children.get(&key).map_or(&[][..], Vec::as_slice);
        let start = (offset as usize).min(children.len());
        let end = (offset + limit).min(children.len() as u64) as usize;
        Ok(children[start .. end.max(start)].to_vec())
    }
}

/// Parse a test payload.
pub fn entity(value: Value) -> Payload
{
    Payload::from_value(value).unwrap()
}

/// Identifier of the child at `index` in [`collection`].
pub fn collection_id(index: u64) -> String
{
    (100_000 + index).to_string()
}

/// A backend with `n` biosamples in a single project,
/// and the category handle that lists them.
/// Building the handle makes no calls.
pub fn collection(n: u64) -> (FakeApi, Handle)
{
    let mut api = FakeApi::empty();
    for i in 0 .. n {
        let biosample = entity(json!({"Id": collection_id(i)}));
        api.attach(EntityKind::Project, COLLECTION_PROJECT_ID,
                   CategoryKind::Biosamples, biosample);
    }

    let project = entity(json!({"Id": COLLECTION_PROJECT_ID}));
    let project = EntityHandle::new(EntityKind::Project, project);
    let biosamples = project.category("biosamples")
        .map(Handle::Category)
        .unwrap();

    (api, biosamples)
}
