//! URL handling module for cover-grab
//!
//! This module turns raw `src` attributes into absolute image URLs and
//! derives the file name each image is stored under.

mod file_name;
mod normalize;

pub use file_name::file_name_for;
pub use normalize::{normalize_image_src, AbsoluteImageUrl};
