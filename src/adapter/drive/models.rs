use serde::{Deserialize, Serialize};

use crate::domain::entities::remote_file::{NewRemoteFile, RemoteFile, RemoteFolder};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

// Request body for files.insert (folders and upload session metadata)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub mime_type: String,
    pub parents: Vec<ParentReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentReference {
    pub id: String,
}

impl FileMetadata {
    pub fn folder(title: &str, parent_id: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            mime_type: FOLDER_MIME_TYPE.to_string(),
            parents: vec![ParentReference {
                id: parent_id.to_string(),
            }],
        }
    }
}

impl From<&NewRemoteFile> for FileMetadata {
    fn from(file: &NewRemoteFile) -> Self {
        Self {
            title: file.title.clone(),
            description: Some(file.description.clone()),
            mime_type: file.mime_type.clone(),
            parents: vec![ParentReference {
                id: file.parent_id.clone(),
            }],
        }
    }
}

// File resource returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub alternate_link: Option<String>,
    #[serde(default)]
    pub parents: Vec<ParentReference>,
}

impl From<DriveFile> for RemoteFile {
    fn from(file: DriveFile) -> Self {
        RemoteFile {
            id: file.id,
            title: file.title,
            mime_type: file.mime_type,
            alternate_link: file.alternate_link,
            parent_ids: file.parents.into_iter().map(|p| p.id).collect(),
        }
    }
}

impl From<DriveFile> for RemoteFolder {
    fn from(file: DriveFile) -> Self {
        RemoteFolder::new(file.id, file.title)
    }
}

// Response of files.list
#[derive(Debug, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub items: Vec<DriveFile>,
}

// Error body: {"error": {"code": 404, "message": "..."}}
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}
