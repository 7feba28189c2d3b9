//! Consumer module for the indexer.
//!
//! Index messages and the channel they travel through.

mod channel;
mod messages;

pub use channel::{ChannelSource, MessageSender, MessageSource, DEFAULT_CHANNEL_CAPACITY};
pub use messages::{DeleteMessage, IndexMessage, ReindexMessage};
