//! Project document slots and upload constraints.
//!
//! Each slot is one nullable column on the project row holding a stored
//! file reference. Uploads are validated against the slot's extension
//! allowlist and size cap before any byte is written.

use crate::error::CoreError;
use crate::workflow::RequiredActor;

const MB: usize = 1024 * 1024;

/// Extensions accepted by the office-side drawing slots.
const DRAWING_EXTENSIONS: &[&str] = &["pdf", "dwg", "zip", "jpg", "jpeg", "png"];

/// A named upload slot on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSlot {
    Agreement,
    License,
    FinalTwoD,
    ThreeD,
    Architectural,
    Structural,
    Electrical,
    Mechanical,
}

impl DocumentSlot {
    /// Slot name as it appears in the upload URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agreement => "agreement",
            Self::License => "license",
            Self::FinalTwoD => "2d",
            Self::ThreeD => "3d",
            Self::Architectural => "architectural",
            Self::Structural => "structural",
            Self::Electrical => "electrical",
            Self::Mechanical => "mechanical",
        }
    }

    /// Parse a slot name. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "agreement" => Some(Self::Agreement),
            "license" => Some(Self::License),
            "2d" => Some(Self::FinalTwoD),
            "3d" => Some(Self::ThreeD),
            "architectural" => Some(Self::Architectural),
            "structural" => Some(Self::Structural),
            "electrical" => Some(Self::Electrical),
            "mechanical" => Some(Self::Mechanical),
            _ => None,
        }
    }

    /// All valid slot names.
    pub const ALL: &'static [&'static str] = &[
        "agreement",
        "license",
        "2d",
        "3d",
        "architectural",
        "structural",
        "electrical",
        "mechanical",
    ];

    /// The `projects` column holding this slot's file reference.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Agreement => "agreement_file",
            Self::License => "license_file",
            Self::FinalTwoD => "document_2d",
            Self::ThreeD => "document_3d",
            Self::Architectural => "architectural_file",
            Self::Structural => "structural_file",
            Self::Electrical => "electrical_file",
            Self::Mechanical => "mechanical_file",
        }
    }

    /// Which actor may upload into this slot.
    pub fn required_actor(&self) -> RequiredActor {
        match self {
            Self::Agreement | Self::License => RequiredActor::Owner,
            _ => RequiredActor::DesignOffice,
        }
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_size_bytes(&self) -> usize {
        match self {
            Self::Agreement => 20 * MB,
            Self::License => 5 * MB,
            _ => 10 * MB,
        }
    }

    /// Accepted file extensions (lowercase, without the dot).
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Agreement => &["pdf"],
            Self::License => &["pdf", "jpg", "jpeg", "png"],
            _ => DRAWING_EXTENSIONS,
        }
    }
}

impl std::fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a slot name from an upload URL.
pub fn validate_slot(slot: &str) -> Result<DocumentSlot, CoreError> {
    DocumentSlot::from_str(slot).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown document slot '{slot}'. Must be one of: {}",
            DocumentSlot::ALL.join(", ")
        ))
    })
}

/// Supervision weekly report upload cap.
pub const REPORT_MAX_SIZE_BYTES: usize = 10 * MB;
/// Extensions accepted for supervision weekly reports.
pub const REPORT_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

/// Lowercased extension of a filename, if any.
fn extension_of(filename: &str) -> Option<String> {
    let ext = filename.rsplit('.').next()?;
    if ext == filename {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate an upload against an extension allowlist and size cap.
pub fn validate_upload_constraints(
    filename: &str,
    size_bytes: usize,
    allowed: &[&str],
    max_size: usize,
) -> Result<(), CoreError> {
    let ext = extension_of(filename).ok_or_else(|| {
        CoreError::Validation(format!("File '{filename}' has no extension"))
    })?;
    if !allowed.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Allowed: {}",
            allowed.join(", ")
        )));
    }
    if size_bytes > max_size {
        return Err(CoreError::Validation(format!(
            "File exceeds the maximum size of {} MB",
            max_size / MB
        )));
    }
    Ok(())
}

/// Validate an upload into a project document slot.
pub fn validate_upload(
    slot: DocumentSlot,
    filename: &str,
    size_bytes: usize,
) -> Result<(), CoreError> {
    validate_upload_constraints(
        filename,
        size_bytes,
        slot.allowed_extensions(),
        slot.max_size_bytes(),
    )
}
