//! YouTube Data API collector for CREAFT.
//!
//! Fetches trending charts, keyword search results, video details, and
//! channel metadata, then normalizes everything into
//! [`creaft_core::ContentRecord`] values ready for scoring and storage.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::{SearchOrder, YoutubeClient};
pub use error::YoutubeError;
pub use normalize::{normalize_channel, normalize_video};
pub use types::ChannelInfo;
