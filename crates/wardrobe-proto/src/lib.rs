//! Wire types and payload codec for the outfit-update channel.

pub mod codec;
pub mod error;
pub mod outfit;
pub mod types;
