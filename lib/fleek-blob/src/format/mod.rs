//! Small presentation helpers used by the file browser.
mod digest;
mod drag;
mod extension;
mod size;

pub use digest::digest_hex;
pub use drag::{draggable_style, DragSnapshot, Style, DROP_TRANSITION_DURATION};
pub use extension::{extension_of, is_preview_supported, PREVIEW_EXTENSIONS};
pub use size::{format_size, human_readable_size};
