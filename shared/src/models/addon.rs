use serde::{Deserialize, Serialize};

/// An add-on item sold alongside tickets
///
/// Add-ons carry a single price per role with no variant or fare-class axis.
/// `category` may hold several comma-separated values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Addon {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
    pub category: String,
    pub is_active: bool,
    pub price: i64,
    pub price_reseller: Option<i64>,
}

impl Addon {
    /// Whether this addon belongs to the given category
    pub fn has_category(&self, category: &str) -> bool {
        self.category
            .split(',')
            .any(|c| c.trim().eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_category_multi_valued() {
        let addon = Addon {
            id: 1,
            name: "Gazebo".into(),
            description: None,
            slug: "gazebo".into(),
            category: "personal, group".into(),
            is_active: true,
            price: 150_000,
            price_reseller: None,
        };
        assert!(addon.has_category("group"));
        assert!(addon.has_category("personal"));
        assert!(!addon.has_category("reseller"));
    }
}
