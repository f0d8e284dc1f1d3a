//! Domain services: catalog persistence, path containment, content types,
//! and file streaming.

pub mod catalog;
pub mod mimetype;
pub mod paths;
pub mod stream;
