mod asset;
mod snapshot;

pub use asset::*;
pub use snapshot::*;
