pub mod config;
pub mod database;
pub mod error;
pub mod matching;
pub mod search;
pub mod setup_logger;
pub mod storage;

pub use error::{AddressFormatError, RuleError};
pub use matching::RuleQuery;
pub use search::{RuleSearch, SearchResponse};
pub use storage::models::rule::{Rule, RuleDocument, RuleId};
pub use storage::RuleStore;
