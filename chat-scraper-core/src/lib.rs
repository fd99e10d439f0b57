pub mod aggregate;
pub mod category;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod report;

pub use aggregate::{AggregationState, CategoryGroups, ParseErrorPolicy, ScrapeSummary};
pub use category::{Category, CategoryDomainMap, CategoryRule, MatchMode};
pub use error::{ExtractError, Result, ScrapeError, UrlRejection};
