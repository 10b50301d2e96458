//! Business logic services.

#![allow(missing_docs)]

pub mod ad;
pub mod category;
pub mod news;
pub mod poll;
pub mod site_config;
pub mod site_health;
pub mod tag;
pub mod user;

pub use ad::AdService;
pub use category::CategoryService;
pub use news::NewsService;
pub use poll::PollService;
pub use site_config::SiteConfigService;
pub use site_health::SiteHealthService;
pub use tag::TagService;
pub use user::UserService;
