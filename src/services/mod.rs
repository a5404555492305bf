// Service exports
pub mod cache;
pub mod directory;
pub mod remote;

pub use cache::{CacheKey, CacheStats, CachedDirectory};
pub use directory::{DirectoryError, ProviderDirectory, StaticDirectory};
pub use remote::RemoteDirectory;
