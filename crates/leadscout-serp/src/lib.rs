pub mod client;
pub mod error;
pub mod extract;
pub mod normalize;

pub use client::SerpClient;
pub use error::SerpError;
pub use extract::extract_listings;
pub use normalize::normalize_listing;
