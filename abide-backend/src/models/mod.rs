//! Domain and wire types shared across the service

mod entry;
mod responses;
mod topic;
mod verse;
mod video;

pub use entry::{Bookmark, BookmarkWithEntry, Entry, EntryType, NewEntry, User};
pub use responses::{
    DevotionPlan, DevotionReply, DevotionRequest, DevotionResponse, FeelingRequest,
    FeelingResponse, CRISIS_TOPIC,
};
pub use topic::Topic;
pub use verse::Verse;
pub use video::VideoDescriptor;
