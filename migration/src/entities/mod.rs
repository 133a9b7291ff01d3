pub mod ai_review_config;
pub mod business;
pub mod redirect_history;
pub mod scan_event;
pub mod step;

pub use ai_review_config::Entity as AiReviewConfigEntity;
pub use business::Entity as BusinessEntity;
pub use redirect_history::Entity as RedirectHistoryEntity;
pub use scan_event::Entity as ScanEventEntity;
pub use step::Entity as StepEntity;
