//! heartnotes Common Library
//!
//! CLIとWeb(WASM)で共有されるコンテンツローダーと配色生成

pub mod types;
pub mod error;
pub mod color;
pub mod source;
pub mod loader;
pub mod scripture;
pub mod preferences;
pub mod request;

pub use types::{BodyField, ContentRecord, ContentType, GroupEntry, IndexEntry, IndexManifest, ItemConfig};
pub use error::{FetchError, LoadError, Result};
pub use color::{generate_dark_theming, hex_to_hsl, hsl_to_hex, to_dark_mode, ColorRole, Hsl, Theming};
pub use source::{ContentSource, MemorySource};
pub use loader::ContentLoader;
pub use scripture::{link_citations, parse_citation, verse_url, with_version, BibleVersion, Citation};
pub use preferences::{DisplayMode, DisplayPreferences, MemoryStore, PreferenceStore, HEART_EMOJIS};
pub use request::{RequestTicket, RequestTracker};
