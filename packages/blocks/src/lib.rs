//! # Pagebuilder Blocks
//!
//! The content blocks a page is composed from, and the contract they share.
//!
//! Each kind implements [`BlockType`]: default properties, output markup,
//! a property form and a validation check. The editor engine only ever goes
//! through that trait, selected by type key from a [`BlockRegistry`].
//!
//! ```rust
//! use pagebuilder_blocks::{BlockRegistry, HeadingProps, Props};
//!
//! let registry = BlockRegistry::get_all();
//! let heading = registry.get("heading").unwrap();
//! let html = heading.render(&Props::Heading(HeadingProps::new("Hello", 1)));
//! assert_eq!(html, "<h1>Hello</h1>");
//! ```

mod block_type;
pub mod escape;
pub mod form;
mod heading;
mod image;
mod list;
mod paragraph;
mod props;
mod registry;
mod value;

pub use block_type::BlockType;
pub use escape::{escape_html, is_valid_url};
pub use heading::{Heading, HeadingProps};
pub use image::{Image, ImageProps};
pub use list::{List, ListProps};
pub use paragraph::{Paragraph, ParagraphProps};
pub use props::{PropertyMap, Props};
pub use registry::{register, BlockRegistry, RegistryError};
pub use value::{PropKind, PropValue, PropertyError};
