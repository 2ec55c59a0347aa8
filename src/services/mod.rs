pub mod action_executor;
pub mod decision_service;
pub mod feed_scraper;
pub mod reply_service;

pub use action_executor::ActionExecutor;
pub use decision_service::DecisionService;
pub use feed_scraper::FeedScraper;
pub use reply_service::ReplyService;
