use serde::{Deserialize, Serialize};

use crate::registration::domain::DocumentKind;

/// Tunables for the profiles whose document requirement is a business decision.
///
/// Brokers identify themselves by license code and administrators are
/// internal, so neither presents a tax id unless configured here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub broker_document: Option<DocumentKind>,
    pub administrator_document: Option<DocumentKind>,
}
