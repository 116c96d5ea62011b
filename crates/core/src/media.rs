//! Upload rules and storage-URL handling shared by the media pipeline.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::error::CoreError;

const MIB: usize = 1024 * 1024;

pub const MAX_IMAGE_BYTES: usize = 10 * MIB;
pub const MAX_PDF_BYTES: usize = 10 * MIB;
pub const MAX_VIDEO_BYTES: usize = 50 * MIB;

pub const ACCEPTED_VIDEO_TYPES: [&str; 4] =
    ["video/mp4", "video/webm", "video/quicktime", "video/avi"];

/// Path segment that marks a public object URL.
pub const PUBLIC_OBJECT_SEGMENT: &str = "/storage/v1/object/public/";

/// What is being uploaded. Decides size limit, bucket and folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Pdf,
    Video,
}

impl MediaKind {
    pub fn bucket(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Pdf => "documents",
            Self::Video => "videos",
        }
    }

    pub fn folder(self) -> &'static str {
        match self {
            Self::Image | Self::Video => "uploads",
            Self::Pdf => "pdfs",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Pdf => MAX_PDF_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Pdf => "PDF",
            Self::Video => "Video",
        }
    }

    /// Reject oversized files before any processing or upload.
    pub fn check_size(self, len: usize) -> Result<(), CoreError> {
        if len > self.max_bytes() {
            return Err(self.too_large());
        }
        Ok(())
    }

    pub fn too_large(self) -> CoreError {
        CoreError::Media(format!(
            "{} must not exceed {}MB",
            self.label(),
            self.max_bytes() / MIB
        ))
    }
}

/// Reject video MIME types outside [`ACCEPTED_VIDEO_TYPES`].
pub fn check_video_type(content_type: &str) -> Result<(), CoreError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if ACCEPTED_VIDEO_TYPES.contains(&mime.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Media(
            "Unsupported video format. Use MP4, WebM, MOV or AVI.".into(),
        ))
    }
}

/// File extension for an accepted video MIME type.
pub fn video_extension(content_type: &str) -> &'static str {
    match content_type.split(';').next().unwrap_or_default().trim() {
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        "video/avi" => "avi",
        _ => "mp4",
    }
}

/// Extension after the last dot, if the name has one.
pub fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
}

/// `<millis>-<random base36>.<ext>`
pub fn unique_file_name(extension: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix = to_base36(rand::rng().random::<u64>());
    format!("{millis}-{suffix}.{}", extension.to_ascii_lowercase())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Object path inside its bucket for a fresh upload.
pub fn upload_path(kind: MediaKind, extension: &str) -> String {
    format!("{}/{}", kind.folder(), unique_file_name(extension))
}

/// `{base}/storage/v1/object/public/{bucket}/{path}`
pub fn public_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}{PUBLIC_OBJECT_SEGMENT}{bucket}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Normalize a stored media reference into a public URL.
///
/// - An URL already containing the public object segment is returned as is.
/// - A `/storage/v1/<kind>/<bucket>/<path>` path is rebuilt from `<path>`.
/// - A bare file name is assumed to live under `uploads/`.
///
/// Anything else is returned unchanged.
pub fn resolve_public_url(base_url: &str, bucket: &str, url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    if url.contains(PUBLIC_OBJECT_SEGMENT) {
        return url.to_string();
    }
    if let Some(rest) = url.strip_prefix("/storage/v1/") {
        // <kind>/<bucket>/<path>
        let mut parts = rest.splitn(3, '/');
        if let (Some(_), Some(_), Some(path)) = (parts.next(), parts.next(), parts.next()) {
            if !path.is_empty() {
                return public_url(base_url, bucket, path);
            }
        }
    }
    if !url.contains("http") && !url.contains('/') {
        return public_url(base_url, bucket, &format!("uploads/{url}"));
    }
    url.to_string()
}

/// Object path relative to its bucket, taken from a public URL.
///
/// Input that is not a public URL is treated as a path already.
pub fn object_path_from_url(url: &str) -> String {
    match url.split_once(PUBLIC_OBJECT_SEGMENT) {
        Some((_, after)) => after
            .split_once('/')
            .map(|(_bucket, path)| path)
            .unwrap_or_default()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
        None => url.to_string(),
    }
}

/// Bucket segment of a public URL.
pub fn bucket_from_url(url: &str) -> Option<&str> {
    let (_, after) = url.split_once(PUBLIC_OBJECT_SEGMENT)?;
    after.split('/').next().filter(|b| !b.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const BASE: &str = "https://proj.supabase.co";

    #[test]
    fn size_limits() {
        assert_matches!(MediaKind::Video.check_size(51 * MIB), Err(CoreError::Media(_)));
        assert!(MediaKind::Video.check_size(50 * MIB).is_ok());
        assert_matches!(MediaKind::Image.check_size(11 * MIB), Err(CoreError::Media(m)) if m.contains("10MB"));
        assert!(MediaKind::Pdf.check_size(MIB).is_ok());
    }

    #[test]
    fn video_types() {
        assert!(check_video_type("video/mp4").is_ok());
        assert!(check_video_type("video/quicktime").is_ok());
        assert!(check_video_type("Video/WebM; codecs=vp9").is_ok());
        assert!(check_video_type("video/x-matroska").is_err());
        assert!(check_video_type("").is_err());
    }

    #[test]
    fn unique_names_have_expected_shape() {
        let a = unique_file_name("JPG");
        let b = unique_file_name("jpg");
        assert_ne!(a, b);
        let (stamp, rest) = a.split_once('-').unwrap();
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        let (random, ext) = rest.split_once('.').unwrap();
        assert!(random.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(ext, "jpg");
        assert!(upload_path(MediaKind::Pdf, "pdf").starts_with("pdfs/"));
    }

    #[test]
    fn base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn extension() {
        assert_eq!(file_extension("photo.final.PNG"), Some("PNG"));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn public_url_passthrough() {
        let url = format!("{BASE}/storage/v1/object/public/images/uploads/a.jpg");
        assert_eq!(resolve_public_url(BASE, "images", &url), url);
    }

    #[test]
    fn malformed_storage_path_is_rebuilt() {
        assert_eq!(
            resolve_public_url(BASE, "videos", "/storage/v1/object/videos/uploads/v.mp4"),
            format!("{BASE}/storage/v1/object/public/videos/uploads/v.mp4")
        );
    }

    #[test]
    fn bare_file_name_goes_under_uploads() {
        assert_eq!(
            resolve_public_url(BASE, "images", "a.jpg"),
            format!("{BASE}/storage/v1/object/public/images/uploads/a.jpg")
        );
        assert_eq!(resolve_public_url(BASE, "images", ""), "");
        assert_eq!(
            resolve_public_url(BASE, "images", "https://elsewhere.test/a.jpg"),
            "https://elsewhere.test/a.jpg"
        );
    }

    #[test]
    fn object_path_and_bucket() {
        let url = format!("{BASE}/storage/v1/object/public/documents/pdfs/sheet.pdf?download=1");
        assert_eq!(object_path_from_url(&url), "pdfs/sheet.pdf");
        assert_eq!(bucket_from_url(&url), Some("documents"));
        assert_eq!(object_path_from_url("uploads/x.jpg"), "uploads/x.jpg");
        assert_eq!(bucket_from_url("uploads/x.jpg"), None);
    }
}
