pub mod fetcher;
pub mod transport;

pub use fetcher::{AudioFetcher, FetchPolicy};
pub use transport::{AudioTransport, HttpTransport};
