//! `livegrid` - live-TV channel grid scraper and HLS stream resolver
//!
//! # Features
//!
//! - **Listing**: scrape the 24/7 channel grid and the generated JSON
//!   schedule into titled groups
//! - **Expansion**: turn a selected listing entry into playable sub-entries
//! - **Resolution**: follow each channel's iframe chain to a playlist URL,
//!   concurrently across a batch, skipping channels that fail
//!
//! # Example
//!
//! ```rust,no_run
//! use livegrid::{ChannelResolver, ListingSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = ChannelResolver::new()?;
//!     let groups = resolver.channel_groups(ListingSource::Grid).await?;
//!     for group in &groups {
//!         println!("{}: {} channels", group.header, group.entries.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod expand;
pub mod extract;
pub mod http_client;
pub mod listing;
pub mod model;
pub mod resolver;
pub mod urls;

pub use error::{Error, Result};
pub use expand::expand;
pub use http_client::SiteClient;
pub use listing::{ListingSource, GRID_PATH, SCHEDULE_PATH};
pub use model::{
    Channel, ChannelGroup, Item, ListingEntry, PlayableEntry, ResolvedStream, ScheduleBlock,
    StreamQuality,
};
pub use resolver::{ChannelResolver, DEFAULT_ROOT};

/// Version of livegrid
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
