//! File classification by extension.

use serde::Serialize;
use std::fmt;

const VIDEO: &[&str] = &["mp4", "webm", "mov", "avi", "mkv"];
const IMAGE: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];
const PDF: &[&str] = &["pdf"];
const AUDIO: &[&str] = &["mp3", "wav", "ogg"];
const DOCUMENT: &[&str] = &["doc", "docx", "ppt", "pptx", "xls", "xlsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Video,
    Image,
    Pdf,
    Audio,
    Document,
    Unknown,
}

impl FileKind {
    /// Every category with an extension table, in lookup order.
    pub const CATEGORIES: [FileKind; 5] = [
        FileKind::Video,
        FileKind::Image,
        FileKind::Pdf,
        FileKind::Audio,
        FileKind::Document,
    ];

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Video => VIDEO,
            FileKind::Image => IMAGE,
            FileKind::Pdf => PDF,
            FileKind::Audio => AUDIO,
            FileKind::Document => DOCUMENT,
            FileKind::Unknown => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Video => "video",
            FileKind::Image => "image",
            FileKind::Pdf => "pdf",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::Unknown => "unknown",
        }
    }

    /// Media-host processing pipeline for this kind. Everything that is not
    /// natively video or image goes through the raw pipeline.
    pub fn resource_type(self) -> &'static str {
        match self {
            FileKind::Video => "video",
            FileKind::Image => "image",
            _ => "raw",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file by the lowercased text after the last `.` in its name.
/// A name without a dot is looked up whole and lands on `Unknown`.
pub fn detect_file_kind(name: &str) -> FileKind {
    let extension = name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    FileKind::CATEGORIES
        .into_iter()
        .find(|kind| kind.extensions().contains(&extension.as_str()))
        .unwrap_or(FileKind::Unknown)
}

/// File-picker descriptor: an `accept` attribute filter plus multi-select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadInput {
    pub accept: Option<String>,
    pub multiple: bool,
}

/// Build a picker descriptor for a category name. The wildcard `"*"` and
/// unrecognized categories produce an unfiltered picker.
pub fn upload_input(accept_types: &str, multiple: bool) -> UploadInput {
    let accept = FileKind::CATEGORIES
        .into_iter()
        .find(|kind| kind.as_str() == accept_types)
        .map(|kind| {
            kind.extensions()
                .iter()
                .map(|extension| format!(".{extension}"))
                .collect::<Vec<_>>()
                .join(",")
        });

    UploadInput { accept, multiple }
}
