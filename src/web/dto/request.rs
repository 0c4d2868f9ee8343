//! Request DTOs for the HTTP API.

use serde::Deserialize;

use crate::file::ParentId;

/// Registration request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Parent reference as sent by clients: the number `0` or an id string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParentIdParam {
    Number(i64),
    Text(String),
}

impl From<ParentIdParam> for ParentId {
    fn from(param: ParentIdParam) -> Self {
        match param {
            ParentIdParam::Number(0) => ParentId::Root,
            ParentIdParam::Number(n) => ParentId::Node(n.to_string()),
            ParentIdParam::Text(s) => ParentId::parse(&s),
        }
    }
}

/// File or folder creation request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub parent_id: Option<ParentIdParam>,
    pub is_public: Option<bool>,
    /// Base64 encoded content.
    pub data: Option<String>,
}

/// Query parameters for listing files.
///
/// Values are kept as strings so malformed input falls back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    pub parent_id: Option<String>,
    pub page: Option<String>,
}

impl ListFilesQuery {
    /// Requested parent, root when absent.
    pub fn parent(&self) -> ParentId {
        self.parent_id
            .as_deref()
            .map(ParentId::parse)
            .unwrap_or_default()
    }

    /// Requested page. Missing, unparsable and negative values give 0.
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .map(|p| p.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0)
    }
}

/// Query parameters for file content.
#[derive(Debug, Default, Deserialize)]
pub struct FileDataQuery {
    /// Thumbnail width.
    pub size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_id_param() {
        let parse = |json: &str| -> ParentId {
            serde_json::from_str::<ParentIdParam>(json).unwrap().into()
        };

        assert_eq!(parse("0"), ParentId::Root);
        assert_eq!(parse("\"0\""), ParentId::Root);
        assert_eq!(parse("\"abc\""), ParentId::Node("abc".to_string()));
        assert_eq!(parse("5"), ParentId::Node("5".to_string()));
    }

    #[test]
    fn test_upload_request_field_names() {
        let req: UploadFileRequest = serde_json::from_str(
            r#"{"name":"a.txt","type":"file","parentId":0,"isPublic":true,"data":"SGVsbG8="}"#,
        )
        .unwrap();

        assert_eq!(req.name.as_deref(), Some("a.txt"));
        assert_eq!(req.node_type.as_deref(), Some("file"));
        assert_eq!(req.parent_id, Some(ParentIdParam::Number(0)));
        assert_eq!(req.is_public, Some(true));
        assert_eq!(req.data.as_deref(), Some("SGVsbG8="));
    }

    #[test]
    fn test_list_query_page() {
        let q = |page: Option<&str>| ListFilesQuery {
            parent_id: None,
            page: page.map(String::from),
        };

        assert_eq!(q(None).page(), 0);
        assert_eq!(q(Some("3")).page(), 3);
        assert_eq!(q(Some("-2")).page(), 0);
        assert_eq!(q(Some("abc")).page(), 0);
    }

    #[test]
    fn test_list_query_parent() {
        let q = |parent: Option<&str>| ListFilesQuery {
            parent_id: parent.map(String::from),
            page: None,
        };

        assert_eq!(q(None).parent(), ParentId::Root);
        assert_eq!(q(Some("0")).parent(), ParentId::Root);
        assert_eq!(q(Some("xyz")).parent(), ParentId::Node("xyz".to_string()));
    }
}
