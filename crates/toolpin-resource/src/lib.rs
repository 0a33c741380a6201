//! Description types for the tools toolpin manages.
//!
//! A [`Tool`] is a fully resolved (name, version) pair: the asset to fetch and
//! the file it ends up in. [`AssetCatalog`] maps names and versions to assets.

mod asset;
mod catalog;
mod error;
mod tool;

pub use asset::{AssetDescriptor, AssetFormat};
pub use catalog::{AssetCatalog, StaticCatalog};
pub use error::{Error, Result};
pub use tool::{Tool, ToolSet};
