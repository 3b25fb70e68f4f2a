pub mod rule;

pub use rule::{AddressSpec, Rule, RuleDocument, RuleId, ServiceAttributes, ServiceEntry};
