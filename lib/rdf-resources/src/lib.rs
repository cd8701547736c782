#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod class;
pub mod error;
mod resource;
mod stream;
mod values;

pub use class::{ResourceClass, ResourceClassConfig, ResourceQuery};
pub use error::{ConfigurationError, LookupError};
pub use resource::Resource;
pub use stream::ResourceStream;
pub use values::{PropertyValues, ResourceDescription};

pub mod model {
    pub use rdf_resources_model::*;
}

pub mod sparql {
    pub use rdf_resources_sparql::*;
}
