//! Value Objects - Immutable, identity-less domain primitives

mod page;
mod role;
mod status;
pub mod timestamp;

pub use page::Page;
pub use role::Role;
pub use status::{
    AssetStatus, ComplaintStatus, ConditionStatus, NotificationKind, PlanStatus, Priority,
    QualityStatus,
};
pub use timestamp::Timestamp;
