pub mod header;
pub mod home;
pub mod gallery;
pub mod detail;
pub mod markdown;
