//! Resumable Upload Protocol
//!
//! Google Drive の再開可能アップロード（セッション開始 → チャンク送信）

use std::io::SeekFrom;
use std::path::Path;

use log::debug;
use reqwest::header::{CONTENT_RANGE, LOCATION, RANGE};
use reqwest::StatusCode;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::client::error_from_response;
use super::models::{DriveFile, FileMetadata};
use crate::domain::error::{Result, UploaderError};

// Chunk size must be a multiple of 256 KiB
pub const CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// `Content-Range` ヘッダーの値を作る
///
/// 空ファイルの場合は `bytes */0`
pub fn content_range(start: u64, len: u64, total: u64) -> String {
    if len == 0 {
        format!("bytes */{}", total)
    } else {
        format!("bytes {}-{}/{}", start, start + len - 1, total)
    }
}

/// `308 Resume Incomplete` の `Range` ヘッダーから次の送信位置を求める
///
/// ヘッダーが無い場合はまだ何も受信されていない
pub fn next_offset(range: Option<&str>) -> Result<u64> {
    let Some(range) = range else {
        return Ok(0);
    };

    range
        .trim()
        .strip_prefix("bytes=")
        .and_then(|r| r.split_once('-'))
        .and_then(|(_, end)| end.parse::<u64>().ok())
        .map(|end| end + 1)
        .ok_or_else(|| UploaderError::Upload(format!("Unexpected Range header: {}", range)))
}

async fn read_chunk(file: &mut File, max: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0u8; max];
    let mut filled = 0;
    while filled < max {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}

fn io_error(path: &Path, e: std::io::Error) -> UploaderError {
    UploaderError::Upload(format!("Failed to read {}: {}", path.display(), e))
}

/// 再開可能アップロードのセッション
pub struct ResumableUpload<'a> {
    http: &'a reqwest::Client,
    access_token: &'a str,
    session_uri: String,
    total: u64,
}

impl<'a> ResumableUpload<'a> {
    /// アップロードセッションを開始する
    pub async fn initiate(
        http: &'a reqwest::Client,
        access_token: &'a str,
        upload_url: &str,
        metadata: &FileMetadata,
        total: u64,
    ) -> Result<ResumableUpload<'a>> {
        let response = http
            .post(format!("{}/files", upload_url))
            .query(&[("uploadType", "resumable")])
            .bearer_auth(access_token)
            .header("X-Upload-Content-Type", metadata.mime_type.as_str())
            .header("X-Upload-Content-Length", total)
            .json(metadata)
            .send()
            .await
            .map_err(|e| UploaderError::Upload(format!("Failed to start upload session: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Failed to start upload session").await);
        }

        let session_uri = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                UploaderError::Upload("Upload session response has no Location header".to_string())
            })?;

        debug!("Started upload session for {} bytes", total);

        Ok(Self {
            http,
            access_token,
            session_uri,
            total,
        })
    }

    /// ファイルをチャンクに分けて送信し、完了したファイルを返す
    pub async fn send_file(&self, path: &Path) -> Result<DriveFile> {
        let mut file = File::open(path).await.map_err(|e| io_error(path, e))?;
        let mut offset: u64 = 0;

        loop {
            file.seek(SeekFrom::Start(offset))
                .await
                .map_err(|e| io_error(path, e))?;
            let chunk = read_chunk(&mut file, CHUNK_SIZE)
                .await
                .map_err(|e| io_error(path, e))?;
            let len = chunk.len() as u64;

            let response = self
                .http
                .put(&self.session_uri)
                .bearer_auth(self.access_token)
                .header(CONTENT_RANGE, content_range(offset, len, self.total))
                .body(chunk)
                .send()
                .await
                .map_err(|e| UploaderError::Upload(format!("Failed to send chunk: {}", e)))?;

            match response.status() {
                StatusCode::OK | StatusCode::CREATED => {
                    return response.json::<DriveFile>().await.map_err(|e| {
                        UploaderError::Upload(format!("Invalid upload response: {}", e))
                    });
                }
                StatusCode::PERMANENT_REDIRECT => {
                    let range = response
                        .headers()
                        .get(RANGE)
                        .and_then(|v| v.to_str().ok());
                    let next = next_offset(range)?;
                    if len == 0 || next <= offset || next > self.total {
                        return Err(UploaderError::Upload(format!(
                            "Upload stalled at byte {} of {}",
                            next, self.total
                        )));
                    }
                    debug!("Uploaded {} of {} bytes", next, self.total);
                    offset = next;
                }
                _ => return Err(error_from_response(response, "Upload rejected").await),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_chunk_size_is_multiple_of_256k() {
        assert_eq!(CHUNK_SIZE % (256 * 1024), 0);
    }

    #[test]
    fn test_content_range_first_chunk() {
        assert_eq!(
            content_range(0, 8388608, 20000000),
            "bytes 0-8388607/20000000"
        );
    }

    #[test]
    fn test_content_range_last_chunk() {
        assert_eq!(
            content_range(16777216, 3222784, 20000000),
            "bytes 16777216-19999999/20000000"
        );
    }

    #[test]
    fn test_content_range_empty_file() {
        assert_eq!(content_range(0, 0, 0), "bytes */0");
    }

    #[test]
    fn test_next_offset() {
        assert_eq!(next_offset(Some("bytes=0-8388607")).unwrap(), 8388608);
        assert_eq!(next_offset(None).unwrap(), 0);
    }

    #[test]
    fn test_next_offset_malformed() {
        assert!(matches!(
            next_offset(Some("bytes 0-12")),
            Err(UploaderError::Upload(_))
        ));
        assert!(next_offset(Some("bytes=0-")).is_err());
    }

    #[tokio::test]
    async fn test_read_chunk_stops_at_eof() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[7u8; 100]).unwrap();

        let mut file = File::open(temp.path()).await.unwrap();
        let first = read_chunk(&mut file, 64).await.unwrap();
        let second = read_chunk(&mut file, 64).await.unwrap();
        let third = read_chunk(&mut file, 64).await.unwrap();

        assert_eq!(first.len(), 64);
        assert_eq!(second.len(), 36);
        assert!(third.is_empty());
    }
}
