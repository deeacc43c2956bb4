pub mod page;
pub mod page_analytics;

pub use page::Entity as PageEntity;
pub use page_analytics::Entity as PageAnalyticsEntity;
