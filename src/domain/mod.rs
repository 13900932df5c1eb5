//! Domain entities shared by the pipeline, the adapters and the renderer.

use chrono::FixedOffset;

pub mod content;
pub mod market;
pub mod store;
pub mod types;

/// China Standard Time (UTC+08:00), the zone every timestamp is shown in.
pub const CST: FixedOffset = match FixedOffset::east_opt(8 * 3600) {
    Some(offset) => offset,
    None => panic!("invalid CST offset"),
};
