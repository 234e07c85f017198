pub mod config;
pub mod core;
pub mod domain;
pub mod media;
pub mod utils;

pub use crate::config::{GatewayConfig, MediaConfig};
pub use crate::core::gateway::{handle_request, Gateway, COURSES_PATH};
pub use crate::core::github::GithubContents;
pub use crate::domain::model::{GatewayRequest, GatewayResponse, UploadRequest, CORS_HEADERS};
pub use crate::domain::ports::ContentsStore;
pub use crate::media::{detect_file_kind, upload_input, FileKind, MediaFile, MediaUploader};
pub use crate::utils::error::{Result, UploadError};
