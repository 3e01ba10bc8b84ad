mod descriptor;
mod error;
mod layout;

pub use descriptor::{origin_reference, read_descriptors, PackageDescriptor, DESCRIPTOR_FILE};
pub use error::{Result, UngxError};
pub use layout::{
    embed_reference, hash_embed_reference, ProjectLayout, EMBED_DIR, HASH_EMBED_DIR,
};

#[cfg(test)]
mod tests;
