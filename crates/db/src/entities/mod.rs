//! Database entities.

pub mod ad;
pub mod analytics;
pub mod category;
pub mod news;
pub mod news_category;
pub mod news_tag;
pub mod poll;
pub mod poll_option;
pub mod poll_vote;
pub mod seo;
pub mod site_configuration;
pub mod tag;
pub mod user;

pub use ad::Entity as Ad;
pub use analytics::Entity as Analytics;
pub use category::Entity as Category;
pub use news::Entity as News;
pub use news_category::Entity as NewsCategory;
pub use news_tag::Entity as NewsTag;
pub use poll::Entity as Poll;
pub use poll_option::Entity as PollOption;
pub use poll_vote::Entity as PollVote;
pub use seo::Entity as Seo;
pub use site_configuration::Entity as SiteConfiguration;
pub use tag::Entity as Tag;
pub use user::Entity as User;
