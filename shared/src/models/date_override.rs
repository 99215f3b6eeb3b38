use serde::{Deserialize, Serialize};

/// Calendar override for a single date
///
/// Overrides take precedence over both weekly closure and weekend rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DateOverride {
    pub id: i64,
    /// Date as `YYYY-MM-DD`, unique per row
    pub date: String,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "kind"))]
    pub kind: OverrideKind,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    Closed,
    HighSeason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_type_field() {
        let o = DateOverride {
            id: 1,
            date: "2024-12-25".into(),
            kind: OverrideKind::Closed,
            note: Some("Christmas".into()),
        };
        let json = serde_json::to_string(&o).unwrap();
        assert!(json.contains("\"type\":\"closed\""));
    }
}
