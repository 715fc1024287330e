pub mod export;
pub mod parser;
pub mod resolver;
pub mod scraper;
pub mod types;
pub mod utils;

pub use resolver::SessionResolver;
pub use scraper::CalendarScraper;

pub(crate) const CALENDAR_URL: &str = "https://www.motogp.com/en/calendar?view=list";
