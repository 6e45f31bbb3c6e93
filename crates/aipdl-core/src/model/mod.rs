//! Data model: airports, their fetchable units, merged artifacts, and the
//! on-disk layout they live in.

mod airport;
mod artifact;
mod layout;
mod unit;
mod window;

pub use airport::Airport;
pub use artifact::{ArtifactKind, MergedArtifact};
pub use layout::{DocumentInfo, Layout};
pub use unit::{ContentKind, UnitDescriptor};
pub use window::ValidityWindow;
