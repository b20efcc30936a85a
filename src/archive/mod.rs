//! Archive entry naming and ZIP assembly.
//!
//! This module owns the two halves of "put a downloaded payload into the
//! archive under a safe name": [`names`] turns arbitrary strings into
//! bounded, collision-free entry names, and [`writer`] streams payloads
//! into an in-memory deflate-compressed ZIP.

mod names;
mod writer;

pub use names::{
    MAX_NAME_LEN, NameRegistry, extension_for_content_type, has_image_extension, sanitize,
};
pub use writer::ArchiveWriter;
