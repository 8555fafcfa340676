/// Fallback for extensions absent from [`MEDIA_TYPES`].
pub(super) const OCTET_STREAM: &str = "application/octet-stream";

const MEDIA_TYPES: &[(&str, &str)] = &[
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("bmp", "image/bmp"),
    ("ico", "image/vnd.microsoft.icon"),
    // Fonts
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    // Documents
    ("css", "text/css"),
    ("xhtml", "application/xhtml+xml"),
    ("html", "text/html"),
    ("htm", "text/html"),
    // Audio/video
    ("mp3", "audio/mpeg"),
    ("m4a", "audio/mp4"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
];

/// The media type registered for the extension of `path`.
pub(super) fn from_path(path: &str) -> &'static str {
    crate::util::uri::extension(path)
        .and_then(|ext| {
            MEDIA_TYPES
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, media_type)| *media_type)
        })
        .unwrap_or(OCTET_STREAM)
}
