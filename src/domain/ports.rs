use crate::domain::model::{NewContent, RemoteFile, StoredFile};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Port over the remote contents store: the source-hosting API for
/// authenticated reads and writes, plus its unauthenticated raw-content CDN.
///
/// `Ok(None)` from the read methods means the file is confirmed absent.
/// Transport failures and non-404 rejections are `Err`, so callers can tell
/// "no data yet" from "the fetch broke" and decide which ones to mask.
#[async_trait]
pub trait ContentsStore: Send + Sync {
    /// Read a file through the authenticated contents API.
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>>;

    /// Create or overwrite a file. `new.sha` must carry the token of the
    /// version being replaced; the remote rejects stale or missing tokens
    /// on existing files.
    async fn put_file(&self, path: &str, new: &NewContent) -> Result<StoredFile>;

    /// Read a file through the raw CDN. Works only for public repositories;
    /// any non-success status maps to `Ok(None)`.
    async fn fetch_raw(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Public raw-content URL for a repository path.
    fn raw_content_url(&self, path: &str) -> String;
}
