// Media upload classifier: independent of the content gateway, shares only
// the error type and configuration conventions.

pub mod kind;
pub mod uploader;

pub use kind::{detect_file_kind, upload_input, FileKind, UploadInput};
pub use uploader::{MediaFile, MediaUpload, MediaUploader};
