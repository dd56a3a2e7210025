//! Safe SQL builder: identifiers from the catalog only, values as parameters.

pub mod builder;
pub mod params;
pub use builder::QueryBuf;
