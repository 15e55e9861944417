mod artist;
mod auth;
mod library;

pub use artist::ArtistManager;
pub use auth::TokenManager;
pub use library::CacheError;
pub use library::LibraryManager;
