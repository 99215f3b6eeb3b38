use serde::{Deserialize, Serialize};

use super::fare::Variant;

/// One requested ticket line in an incoming cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSelection {
    pub slug: String,
    pub variant: Variant,
    pub qty: i64,
}

/// Group metadata attached to group-visit carts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub name: String,
    pub size: i64,
}

/// An unpriced cart as submitted by a client
///
/// Addon slugs count one selection per occurrence; repeat a slug to request
/// more than one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartInput {
    #[serde(default)]
    pub tickets: Vec<TicketSelection>,
    #[serde(default)]
    pub addons: Vec<String>,
    #[serde(default)]
    pub group: Option<GroupInfo>,
}

impl CartInput {
    pub fn is_empty(&self) -> bool {
        self.tickets.iter().all(|t| t.qty <= 0) && self.addons.is_empty()
    }
}
