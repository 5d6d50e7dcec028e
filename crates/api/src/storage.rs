//! Local-disk storage for uploaded project documents.
//!
//! Validated uploads land under the configured uploads root and are served
//! statically under `/uploads`; the database stores the public path.

use meemar_core::types::DbId;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Write validated upload bytes to the uploads root.
///
/// Returns the public path (`/uploads/<name>`) to persist on the project
/// row. The stored name is namespaced by project and slot with a random
/// suffix so a re-upload never clobbers an unrelated file.
pub async fn store_document(
    upload_dir: &str,
    project_id: DbId,
    slot_name: &str,
    original_filename: &str,
    bytes: &[u8],
) -> AppResult<String> {
    let ext = original_filename
        .rsplit('.')
        .next()
        .unwrap_or("bin")
        .to_ascii_lowercase();
    let stored = format!("project_{project_id}_{slot_name}_{}.{ext}", Uuid::new_v4());

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload directory: {e}")))?;

    let path = std::path::Path::new(upload_dir).join(&stored);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    Ok(format!("/uploads/{stored}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_and_returns_public_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload_dir = dir.path().to_str().expect("utf-8 path");

        let public = store_document(upload_dir, 7, "license", "permit.PDF", b"%PDF-1.7")
            .await
            .expect("store should succeed");

        assert!(public.starts_with("/uploads/project_7_license_"));
        assert!(public.ends_with(".pdf"), "extension is lowercased: {public}");

        let stored_name = public.strip_prefix("/uploads/").expect("prefix");
        let on_disk = dir.path().join(stored_name);
        let bytes = tokio::fs::read(&on_disk).await.expect("file exists");
        assert_eq!(bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn two_uploads_into_the_same_slot_get_distinct_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload_dir = dir.path().to_str().expect("utf-8 path");

        let a = store_document(upload_dir, 1, "2d", "plan.pdf", b"a")
            .await
            .expect("store");
        let b = store_document(upload_dir, 1, "2d", "plan.pdf", b"b")
            .await
            .expect("store");
        assert_ne!(a, b);
    }
}
