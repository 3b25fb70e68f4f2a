pub mod address;
pub mod executor;
pub mod query;
pub mod service;

pub use address::{equals, normalize, overlaps, AddressRange};
pub use executor::find_matching_rule_ids;
pub use query::RuleQuery;
pub use service::{port_matches, AttributeKind};
