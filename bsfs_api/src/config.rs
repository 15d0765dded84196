use std::borrow::Cow;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Server used when none is configured.
pub const DEFAULT_SERVER: &str = "https://api.basespace.illumina.com";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const V1_SUFFIX: &str = "v1pre3";
const V2_SUFFIX: &str = "v2";

/// Connection settings for [`HttpApi`][`crate::HttpApi`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiConfig
{
    /// Server root, without any API version suffix.
    pub server: Url,

    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: String,
    pub timeout_secs: u64,
}

impl ApiConfig
{
    /// Create a configuration for the given server.
    ///
    /// The server may be given with or without
    /// a trailing `/v1pre3` or `/v2`; it is stripped either way.
    pub fn new(server: &str, access_token: impl Into<String>)
        -> Result<Self, url::ParseError>
    {
        let mut server = server.trim_end_matches('/');
        for suffix in &[V1_SUFFIX, V2_SUFFIX] {
            if let Some(rest) = server.strip_suffix(suffix) {
                if rest.ends_with('/') {
                    server = rest.trim_end_matches('/');
                }
            }
        }

        Ok(
            Self{
                server:        Url::parse(server)?,
                client_id:     None,
                client_secret: None,
                access_token:  access_token.into(),
                timeout_secs:  DEFAULT_TIMEOUT_SECS,
            }
        )
    }

    /// Base URL of the v1pre3 API, without trailing slash.
    pub fn v1_base(&self) -> String
    {
        self.base(V1_SUFFIX)
    }

    /// Base URL of the v2 API, without trailing slash.
    pub fn v2_base(&self) -> String
    {
        self.base(V2_SUFFIX)
    }

    fn base(&self, suffix: &str) -> String
    {
        format!("{}/{}", self.server.as_str().trim_end_matches('/'), suffix)
    }
}

/// Parsed `basespace://` URL.
///
/// The syntax is
/// `basespace://CLIENT_ID:CLIENT_SECRET:ACCESS_TOKEN@SERVER!/ROOT`,
/// where the server is itself a URL and `!/ROOT` may be left out.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenerUrl
{
    pub config: ApiConfig,

    /// Path under which browsing starts, `"/"` by default.
    pub root: String,
}

/// Scheme of opener URLs.
pub const OPENER_SCHEME: &str = "basespace";

/// Returned when an opener URL could not be parsed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidOpenerUrl
{
    #[error("expected a basespace:// URL")]
    Scheme,

    #[error("missing CLIENT_ID:CLIENT_SECRET:ACCESS_TOKEN@ credentials")]
    Credentials,

    #[error("empty client id")]
    EmptyClientId,

    #[error("empty client secret")]
    EmptyClientSecret,

    #[error("empty access token")]
    EmptyAccessToken,

    #[error("credentials are not valid percent-encoded UTF-8")]
    Encoding,

    #[error("invalid server URL: {0}")]
    Server(#[from] url::ParseError),
}

impl FromStr for OpenerUrl
{
    type Err = InvalidOpenerUrl;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let rest =
            s.strip_prefix(OPENER_SCHEME)
            .and_then(|r| r.strip_prefix("://"))
            .ok_or(InvalidOpenerUrl::Scheme)?;

        let (userinfo, resource) =
            rest.split_once('@')
            .ok_or(InvalidOpenerUrl::Credentials)?;

        // The secret and token are separated like
        // the password of an ordinary URL is split in two.
        let (client_id, password) =
            userinfo.split_once(':')
            .ok_or(InvalidOpenerUrl::Credentials)?;
        let (client_secret, access_token) =
            password.split_once(':')
            .unwrap_or((password, ""));

        // Decoded only after splitting, so that `%3A` stays inside its part.
        let client_id = decode(client_id)?;
        let client_secret = decode(client_secret)?;
        let access_token = decode(access_token)?;

        if client_id.is_empty() {
            return Err(InvalidOpenerUrl::EmptyClientId);
        }
        if client_secret.is_empty() {
            return Err(InvalidOpenerUrl::EmptyClientSecret);
        }
        if access_token.is_empty() {
            return Err(InvalidOpenerUrl::EmptyAccessToken);
        }

        let (server, root) = match resource.split_once('!') {
            Some((server, ""))   => (server, "/"),
            Some((server, root)) => (server, root),
            None                 => (resource, "/"),
        };

        let mut config = ApiConfig::new(server, access_token.into_owned())?;
        config.client_id = Some(client_id.to_string());
        config.client_secret = Some(client_secret.to_string());

        Ok(Self{config, root: root.to_string()})
    }
}

fn decode(part: &str) -> Result<Cow<str>, InvalidOpenerUrl>
{
    urlencoding::decode(part)
        .map_err(|_| InvalidOpenerUrl::Encoding)
}
