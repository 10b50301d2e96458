//! Repository layer for database operations.

pub mod ad;
pub mod category;
pub mod news;
pub mod poll;
pub mod site_configuration;
pub mod tag;
pub mod user;

pub use ad::AdRepository;
pub use category::CategoryRepository;
pub use news::{NewsFilter, NewsRepository};
pub use poll::{PollOptionRepository, PollRepository, PollVoteRepository};
pub use site_configuration::SiteConfigurationRepository;
pub use tag::TagRepository;
pub use user::UserRepository;
