use crate::Api;
use crate::ApiConfig;
use crate::ApiError;
use crate::CURRENT_USER;
use crate::EntityRef;
use crate::Payload;
use crate::Result;
use bsfs_schema::CategoryKind;
use bsfs_schema::EntityKind;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header;
use serde_json::Value;
use std::io::Write;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Header the BaseSpace API reads the access token from.
const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Version
{
    V1,
    V2,
}

/// Where a request goes, before it is turned into a URL.
#[derive(Debug, Eq, PartialEq)]
struct Endpoint
{
    version: Version,
    path:    String,
    query:   Vec<(&'static str, String)>,
}

impl Endpoint
{
    fn v1(path: String) -> Self
    {
        Self{version: Version::V1, path, query: Vec::new()}
    }

    fn v2(path: String) -> Self
    {
        Self{version: Version::V2, path, query: Vec::new()}
    }

    fn with(mut self, key: &'static str, value: impl ToString) -> Self
    {
        self.query.push((key, value.to_string()));
        self
    }

    /// Add offset, limit, and a stable sort order.
    /// The two API versions spell the parameters differently.
    fn window(self, offset: u64, limit: u64) -> Self
    {
        match self.version {
            Version::V1 => self.with("Offset", offset)
                               .with("Limit", limit)
                               .with("SortBy", "Id")
                               .with("SortDir", "Asc"),
            Version::V2 => self.with("offset", offset)
                               .with("limit", limit)
                               .with("sortBy", "Id")
                               .with("sortDir", "Asc"),
        }
    }
}

/// Endpoint that fetches one entity of the category by identifier.
fn entity_endpoint(category: CategoryKind, id: &str) -> Option<Endpoint>
{
    use CategoryKind::*;
    let endpoint = match category {
        Projects       => Endpoint::v1(format!("projects/{}", id)),
        AppResults     => Endpoint::v1(format!("appresults/{}", id)),
        Samples        => Endpoint::v1(format!("samples/{}", id)),
        Files          => Endpoint::v1(format!("files/{}", id)),
        Biosamples     => Endpoint::v2(format!("biosamples/{}", id)),
        AppSessions    => Endpoint::v2(format!("appsessions/{}", id)),
        Datasets       => Endpoint::v2(format!("datasets/{}", id)),
        SequencedFiles => return None,
    };
    Some(endpoint)
}

/// Endpoint that lists the children of an entity in a category.
fn children_endpoint(parent: EntityRef, category: CategoryKind)
    -> Option<Endpoint>
{
    use CategoryKind::*;
    let id = parent.id;
    let endpoint = match (parent.kind, category) {
        (EntityKind::User, Projects) =>
            Endpoint::v1(format!("users/{}/projects", CURRENT_USER)),
        (EntityKind::Project, AppResults) =>
            Endpoint::v1(format!("projects/{}/appresults", id)),
        (EntityKind::Project, Samples) =>
            Endpoint::v1(format!("projects/{}/samples", id)),
        (EntityKind::Project, Biosamples) =>
            Endpoint::v2("biosamples".into()).with("projectid", id),
        (EntityKind::Project, AppSessions) =>
            Endpoint::v2("appsessions".into()).with("projectid", id),
        (EntityKind::AppResult, Files) =>
            Endpoint::v1(format!("appresults/{}/files", id)),
        (EntityKind::Sample, Files) =>
            Endpoint::v1(format!("samples/{}/files", id)),
        (EntityKind::Biosample, Datasets) =>
            Endpoint::v2("datasets".into()).with("inputbiosamples", id),
        (EntityKind::AppSession, Datasets) =>
            Endpoint::v2("datasets".into()).with("appsessions", id),
        (EntityKind::Dataset, SequencedFiles) =>
            Endpoint::v2(format!("datasets/{}/sequencefiles", id)),
        _ => return None,
    };
    Some(endpoint)
}

/// [`Api`] implementation that talks to a BaseSpace server over HTTPS.
///
/// The underlying client pools connections and may be shared
/// between threads, so one `HttpApi` can serve concurrent resolutions.
pub struct HttpApi
{
    config: ApiConfig,
    client: Client,
}

impl HttpApi
{
    pub fn new(config: ApiConfig) -> Result<Self>
    {
        let mut token = header::HeaderValue::from_str(&config.access_token)?;
        token.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(ACCESS_TOKEN_HEADER, token);

        let client =
            Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self{config, client})
    }

    fn url(&self, endpoint: &Endpoint) -> Result<Url>
    {
        let base = match endpoint.version {
            Version::V1 => self.config.v1_base(),
            Version::V2 => self.config.v2_base(),
        };
        let mut url = Url::parse(&format!("{}/{}", base, endpoint.path))?;
        if !endpoint.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &endpoint.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn send(&self, url: Url) -> Result<Response>
    {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send()?;
        check_status(response, url.path())
    }

    fn get_json(&self, endpoint: &Endpoint) -> Result<Value>
    {
        let url = self.url(endpoint)?;
        let body: Value = self.send(url)?.json()?;
        Ok(body)
    }

    fn get_one(&self, endpoint: &Endpoint) -> Result<Payload>
    {
        let body = self.get_json(endpoint)?;
        unwrap_one(endpoint.version, body)
    }

    fn get_many(&self, endpoint: &Endpoint) -> Result<Vec<Payload>>
    {
        let body = self.get_json(endpoint)?;
        unwrap_many(endpoint.version, body)
    }

    /// Absolute URL of a file’s content.
    /// v1 bodies give it relative to the server root.
    fn content_url(&self, payload: &Payload) -> Result<Url>
    {
        let href = payload.content_url.as_deref().ok_or_else(|| {
            ApiError::Unsupported(format!("{} has no content", payload.id))
        })?;
        let server = self.config.server.as_str().trim_end_matches('/');
        let root = Url::parse(&format!("{}/", server))?;
        Ok(root.join(href)?)
    }

    /// Stream the content of a file into the writer.
    ///
    /// Returns the number of bytes written.
    /// Payloads without a content URL, such as projects, are rejected.
    pub fn download(&self, payload: &Payload, writer: &mut impl Write)
        -> Result<u64>
    {
        let url = self.content_url(payload)?;
        let mut response = self.send(url)?;
        Ok(response.copy_to(writer)?)
    }
}

/// Payload of a single-object body.
/// v1 wraps it in `Response`, v2 does not.
fn unwrap_one(version: Version, mut body: Value) -> Result<Payload>
{
    let raw = match version {
        Version::V1 => take_pointer(&mut body, "/Response"),
        Version::V2 => body,
    };
    Ok(Payload::from_value(raw)?)
}

/// Payloads of a list body.
/// v1 puts them in `Response.Items`, v2 in `Items`.
fn unwrap_many(version: Version, mut body: Value) -> Result<Vec<Payload>>
{
    let items = match version {
        Version::V1 => take_pointer(&mut body, "/Response/Items"),
        Version::V2 => take_pointer(&mut body, "/Items"),
    };

    // An absent list is an empty page.
    let items: Vec<Value> = match items {
        Value::Null => Vec::new(),
        other       => serde_json::from_value(other)?,
    };

    items.into_iter()
        .map(|item| Payload::from_value(item).map_err(ApiError::from))
        .collect()
}

fn take_pointer(body: &mut Value, pointer: &str) -> Value
{
    body.pointer_mut(pointer)
        .map(Value::take)
        .unwrap_or_default()
}

fn check_status(response: Response, what: &str) -> Result<Response>
{
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    Err(status_error(status, what, message))
}

/// Error for a non-success status.
///
/// A rejected token is a 401 and is reported as [`ApiError::Status`],
/// so that it is not mistaken for a missing object.
fn status_error(status: StatusCode, what: &str, message: String) -> ApiError
{
    match status {
        StatusCode::NOT_FOUND =>
            ApiError::NotFound(what.to_string()),
        StatusCode::FORBIDDEN =>
            ApiError::Forbidden(what.to_string()),
        status =>
            ApiError::Status{status: status.as_u16(), message},
    }
}

impl Api for HttpApi
{
    fn get_root_entity(&self) -> Result<Payload>
    {
        self.get_one(&Endpoint::v1(format!("users/{}", CURRENT_USER)))
    }

    fn get_entity_by_id(&self, category: CategoryKind, id: &str)
        -> Result<Payload>
    {
        let endpoint = entity_endpoint(category, id).ok_or_else(|| {
            ApiError::Unsupported(format!("direct fetch in {}", category))
        })?;
        self.get_one(&endpoint)
    }

    fn list_children(&self, parent: EntityRef, category: CategoryKind,
                     offset: u64, limit: u64) -> Result<Vec<Payload>>
    {
        let endpoint = children_endpoint(parent, category).ok_or_else(|| {
            let message = format!("{:?} has no {}", parent.kind, category);
            ApiError::Unsupported(message)
        })?;
        self.get_many(&endpoint.window(offset, limit))
    }
}
