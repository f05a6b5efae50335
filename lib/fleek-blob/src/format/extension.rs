/// Extensions the browser can render a preview for.
pub const PREVIEW_EXTENSIONS: [&str; 7] = ["jpg", "png", "gif", "mp3", "ogg", "flac", "jpeg"];

/// The text after the last dot. A name without any dot is returned whole.
pub fn extension_of(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

pub fn is_preview_supported(extension: &str) -> bool {
    PREVIEW_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(extension))
}
