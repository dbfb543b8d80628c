pub mod artist;
pub mod block;
pub mod config;
pub mod error;
pub mod filters;
pub mod generator;
pub mod index;
pub mod metadata;
pub mod selector;
pub mod utils;
pub mod weights;


pub use artist::normalize_artist;
pub use block::BlockGenerator;
pub use config::*;
pub use error::GenerateError;
pub use generator::*;
pub use index::GenreIndex;
pub use metadata::*;
pub use weights::GenreWeights;
