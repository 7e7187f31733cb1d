pub mod movie;

pub use movie::{MovieInfo, MovieRecord, StoredMovie, NOT_AVAILABLE};
