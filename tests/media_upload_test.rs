use httpmock::prelude::*;
use serde_json::json;
use skillnest_upload::{FileKind, MediaConfig, MediaFile, MediaUploader, UploadError};

fn uploader(server: &MockServer) -> MediaUploader {
    MediaUploader::new(MediaConfig {
        cloud_name: "skillnest".to_string(),
        upload_preset: "skillnest_uploads".to_string(),
        api_base: server.base_url(),
    })
}

#[tokio::test]
async fn videos_route_to_the_video_pipeline() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1_1/skillnest/video/upload")
            .body_contains("skillnest_uploads")
            .body_contains("lecture.mp4");
        then.status(200).json_body(json!({
            "secure_url": "https://media.example.test/video/upload/v1/lecture.mp4",
            "public_id": "lecture",
            "bytes": 1_048_576,
            "format": "mp4",
        }));
    });

    let upload = uploader(&server)
        .upload(MediaFile::new("lecture.mp4", vec![0u8; 16]))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(upload.kind, FileKind::Video);
    assert_eq!(
        upload.url,
        "https://media.example.test/video/upload/v1/lecture.mp4"
    );
    assert_eq!(upload.public_id, "lecture");
    assert_eq!(upload.original_filename, "lecture.mp4");
    assert_eq!(upload.size, 1_048_576);
    assert_eq!(upload.format.as_deref(), Some("mp4"));
}

#[tokio::test]
async fn unknown_kinds_route_to_the_raw_pipeline() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1_1/skillnest/raw/upload");
        then.status(200).json_body(json!({
            "secure_url": "https://media.example.test/raw/upload/v1/archive.zip",
            "public_id": "archive",
            "bytes": 2048,
        }));
    });

    let upload = uploader(&server)
        .upload(MediaFile::new("archive.zip", b"PK".to_vec()))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(upload.kind, FileKind::Unknown);
    assert_eq!(upload.format, None);
    // Only pdf/document URLs are rewritten.
    assert_eq!(
        upload.url,
        "https://media.example.test/raw/upload/v1/archive.zip"
    );
}

#[tokio::test]
async fn document_urls_are_rewritten_to_the_attachment_route() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1_1/skillnest/raw/upload");
        then.status(200).json_body(json!({
            "secure_url": "https://media.example.test/raw/upload/v1/syllabus.pdf",
            "public_id": "syllabus",
            "bytes": 4096,
            "format": "pdf",
        }));
    });

    let upload = uploader(&server)
        .upload(MediaFile::new("syllabus.pdf", vec![1, 2, 3]))
        .await
        .unwrap();

    assert_eq!(upload.kind, FileKind::Pdf);
    assert_eq!(
        upload.url,
        "https://media.example.test/image/upload/fl_attachment/v1/syllabus.pdf"
    );
}

#[tokio::test]
async fn document_urls_without_the_marker_are_left_alone() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1_1/skillnest/raw/upload");
        then.status(200).json_body(json!({
            "secure_url": "https://media.example.test/image/upload/v1/notes.docx",
            "public_id": "notes",
            "bytes": 512,
            "format": "docx",
        }));
    });

    let upload = uploader(&server)
        .upload(MediaFile::new("notes.docx", vec![9; 8]))
        .await
        .unwrap();

    assert_eq!(upload.kind, FileKind::Document);
    assert_eq!(
        upload.url,
        "https://media.example.test/image/upload/v1/notes.docx"
    );
}

#[tokio::test]
async fn failures_carry_the_status_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1_1/skillnest/image/upload");
        then.status(500).body("upload backend exploded");
    });

    let err = uploader(&server)
        .upload(MediaFile::new("photo.png", vec![0; 4]))
        .await
        .unwrap_err();

    match err {
        UploadError::UploadFailed(reason) => assert_eq!(reason, "Internal Server Error"),
        other => panic!("expected UploadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn media_files_load_from_disk_with_their_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.mp4");
    std::fs::write(&path, b"fake video bytes").unwrap();

    let file = MediaFile::from_path(&path).unwrap();
    assert_eq!(file.name, "clip.mp4");
    assert_eq!(file.bytes, b"fake video bytes".to_vec());

    let missing = MediaFile::from_path(dir.path().join("absent.mp4"));
    assert!(missing.is_err());
}
