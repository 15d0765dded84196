use serde::Deserialize;
use serde_json::Value;

/// Backend object, with the fields the browsing layer reads
/// pulled out of the response body under stable names.
///
/// The body itself is kept in [`Payload::raw`]
/// for callers that need anything else.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload
{
    pub id: String,
    pub name: Option<String>,

    /// Creation timestamp exactly as the backend formats it.
    pub date_created: Option<String>,

    /// Size in bytes; only files have one.
    pub size: Option<u64>,

    /// Identifier of the owning user.
    pub owner: Option<String>,

    /// Access description such as `"owner read write"`.
    pub access: Option<String>,

    pub upload_status: Option<String>,

    /// URL from which a file’s bytes can be downloaded.
    pub content_url: Option<String>,

    pub raw: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Id
{
    Text(String),
    Number(u64),
}

impl From<Id> for String
{
    fn from(id: Id) -> Self
    {
        match id {
            Id::Text(text)     => text,
            Id::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct Owner
{
    #[serde(rename = "Id")]
    id: Id,
}

// Field names as they appear across v1pre3 and v2 bodies.
#[derive(Deserialize)]
struct Fields
{
    #[serde(rename = "Id")]
    id: Id,

    #[serde(rename = "Name")]
    name: Option<String>,

    #[serde(rename = "BioSampleName")]
    biosample_name: Option<String>,

    #[serde(rename = "DateCreated")]
    date_created: Option<String>,

    #[serde(rename = "Size")]
    size: Option<u64>,

    #[serde(rename = "UserOwnedBy")]
    user_owned_by: Option<Owner>,

    #[serde(rename = "Access")]
    access: Option<String>,

    #[serde(rename = "UploadStatus")]
    upload_status: Option<String>,

    #[serde(rename = "HrefContent")]
    href_content: Option<String>,
}

impl Payload
{
    /// Read a payload from a response body.
    ///
    /// Fails only if the body has no usable `Id`;
    /// every other field is optional.
    pub fn from_value(raw: Value) -> serde_json::Result<Self>
    {
        let fields = Fields::deserialize(&raw)?;
        Ok(
            Self{
                id:            fields.id.into(),
                name:          fields.name.or(fields.biosample_name),
                date_created:  fields.date_created,
                size:          fields.size,
                owner:         fields.user_owned_by.map(|o| o.id.into()),
                access:        fields.access,
                upload_status: fields.upload_status,
                content_url:   fields.href_content,
                raw,
            }
        )
    }

    /// Whether the object has finished uploading.
    /// Objects without an upload status are always complete.
    pub fn is_upload_complete(&self) -> bool
    {
        match &self.upload_status {
            Some(status) => status.eq_ignore_ascii_case("complete"),
            None         => true,
        }
    }

    /// First word of the access description, such as `"owner"`.
    pub fn permissions(&self) -> Option<&str>
    {
        self.access.as_deref()?.split(' ').next()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_file()
    {
        let raw = json!({
            "Id": "11710715826",
            "Href": "https://api.basespace.illumina.com/v2/files/11710715826",
            "HrefContent":
                "https://api.basespace.illumina.com/v2/files/11710715826/content",
            "Name": "Myeloid-RNA-Brain-Rep1_S1_L001_R1_001.fastq.gz",
            "ContentType": "application/x-gzip",
            "Size": 48526491,
            "DateCreated": "2018-07-19T23:50:10.0000000Z",
            "IdAsLong": 11710715826u64,
        });

        let payload = Payload::from_value(raw.clone()).unwrap();

        assert_eq!(payload.id, "11710715826");
        assert_eq!(payload.name.as_deref(),
                   Some("Myeloid-RNA-Brain-Rep1_S1_L001_R1_001.fastq.gz"));
        assert_eq!(payload.size, Some(48526491));
        assert_eq!(payload.date_created.as_deref(),
                   Some("2018-07-19T23:50:10.0000000Z"));
        assert_eq!(payload.content_url.as_deref(),
                   Some("https://api.basespace.illumina.com/v2/files/11710715826/content"));
        assert_eq!(payload.owner, None);
        assert!(payload.is_upload_complete());
        assert_eq!(payload.raw, raw);
    }

    #[test]
    fn test_from_value_project()
    {
        let raw = json!({
            "Id": 86591915,
            "Name": "Emedgene",
            "UserOwnedBy": {"Id": "1463463", "Name": "Some One"},
            "DateCreated": "2018-07-19T23:41:01.0000000Z",
            "Access": "owner read write",
        });

        let payload = Payload::from_value(raw).unwrap();

        assert_eq!(payload.id, "86591915");
        assert_eq!(payload.owner.as_deref(), Some("1463463"));
        assert_eq!(payload.permissions(), Some("owner"));
        assert_eq!(payload.size, None);
    }

    #[test]
    fn test_from_value_biosample_name()
    {
        let raw = json!({"Id": "104555093", "BioSampleName": "Brain-Rep1"});
        let payload = Payload::from_value(raw).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Brain-Rep1"));
    }

    #[test]
    fn test_from_value_upload_status()
    {
        let pending = json!({"Id": "1", "UploadStatus": "pending"});
        let complete = json!({"Id": "2", "UploadStatus": "Complete"});
        assert!(!Payload::from_value(pending).unwrap().is_upload_complete());
        assert!(Payload::from_value(complete).unwrap().is_upload_complete());
    }

    #[test]
    fn test_from_value_missing_id()
    {
        assert!(Payload::from_value(json!({"Name": "x"})).is_err());
        assert!(Payload::from_value(json!({"Id": null})).is_err());
        assert!(Payload::from_value(json!([1, 2, 3])).is_err());
    }
}
