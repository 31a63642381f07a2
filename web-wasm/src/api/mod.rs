pub mod fetch_source;

pub use fetch_source::FetchSource;
