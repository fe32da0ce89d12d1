use std::path::Path;

use data_encoding::BASE64;

/// Local preview of a selected image, built immediately after selection and
/// independent of the network outcome.
#[derive(Debug, Clone)]
pub struct Preview {
    pub filename: String,
    pub byte_len: usize,
    /// The image bytes as a `data:` URL, the same encoding a browser
    /// preview would use.
    pub data_url: String,
}

pub fn build_preview(path: &Path, bytes: &[u8]) -> Preview {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let data_url = format!("data:{};base64,{}", mime_for(path), BASE64.encode(bytes));
    Preview {
        filename,
        byte_len: bytes.len(),
        data_url,
    }
}

/// Content type from the file extension. The service accepts common image
/// formats plus DICOM; anything else goes through as an opaque blob.
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "dcm" | "dicom" => "application/dicom",
        _ => "application/octet-stream",
    }
}
