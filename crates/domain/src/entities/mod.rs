//! Domain entities - Resource records mirrored from the utility backend
//!
//! Every record is a non-authoritative copy: the backend owns identity,
//! validation and referential integrity.

mod asset;
mod complaint;
mod demand;
mod infrastructure;
mod notification;
mod quality;
mod user;

pub use asset::{
    AssetMaintenance, AssetMaintenanceUpdate, AssetUpdate, NewAsset, NewAssetMaintenance,
    WaterAsset,
};
pub use complaint::{
    Complaint, ComplaintCategory, ComplaintCategoryUpdate, ComplaintUpdate, NewComplaint,
    NewComplaintCategory,
};
pub use demand::{
    DemandForecastQuery, DemandUpdate, DistributionPlanUpdate, InvestmentPlan, InvestmentPlanUpdate,
    NewDistributionPlan, NewInvestmentPlan, NewWaterDemand, WaterDemand, WaterDistributionPlan,
};
pub use infrastructure::{
    InfrastructureUpdate, LeakUpdate, NewInfrastructure, NewLeak, WaterInfrastructure, WaterLeak,
};
pub use notification::{
    NewNotification, NewNotificationSetting, Notification, NotificationSetting,
    NotificationSettingUpdate, NotificationUpdate,
};
pub use quality::{
    NewQualityAlert, NewWaterQuality, QualityAlertUpdate, WaterQuality, WaterQualityAlert,
    WaterQualityUpdate,
};
pub use user::{NewUser, User, UserUpdate};
