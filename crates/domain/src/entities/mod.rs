//! Entities created as side effects of quest approval.

mod activity_feed_item;
mod loot_drop;

pub use activity_feed_item::{ActivityFeedItem, ActivityType};
pub use loot_drop::LootDrop;
