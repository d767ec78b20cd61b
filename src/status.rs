use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stock at or below this count is shown as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Status tag stored on a product. The set is open: anything we don't
/// recognize is kept verbatim and treated like `Active`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StatusTag {
    #[default]
    Active,
    Inactive,
    OutOfStock,
    Other(String),
}

impl StatusTag {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => StatusTag::Active,
            "INACTIVE" => StatusTag::Inactive,
            "OUT_OF_STOCK" => StatusTag::OutOfStock,
            _ => StatusTag::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusTag::Active => "ACTIVE",
            StatusTag::Inactive => "INACTIVE",
            StatusTag::OutOfStock => "OUT_OF_STOCK",
            StatusTag::Other(s) => s,
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(StatusTag::parse(&raw))
    }
}

/// How urgently a row needs attention. Ordered from calmest to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Urgency {
    None,
    Neutral,
    Medium,
    Highest,
}

/// The four display buckets a product falls into in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayCategory {
    Hidden,
    OutOfStock,
    LowStock,
    InStock,
}

impl DisplayCategory {
    pub const ALL: [DisplayCategory; 4] = [
        DisplayCategory::Hidden,
        DisplayCategory::OutOfStock,
        DisplayCategory::LowStock,
        DisplayCategory::InStock,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayCategory::Hidden => "Đang ẩn",
            DisplayCategory::OutOfStock => "Hết hàng",
            DisplayCategory::LowStock => "Sắp hết",
            DisplayCategory::InStock => "Còn hàng",
        }
    }

    pub fn urgency(self) -> Urgency {
        match self {
            DisplayCategory::Hidden => Urgency::Neutral,
            DisplayCategory::OutOfStock => Urgency::Highest,
            DisplayCategory::LowStock => Urgency::Medium,
            DisplayCategory::InStock => Urgency::None,
        }
    }
}

impl fmt::Display for DisplayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sort a product into its display bucket. First match wins: an inactive
/// product is hidden even when it has no stock.
pub fn classify(status: &StatusTag, stock_quantity: u32) -> DisplayCategory {
    if *status == StatusTag::Inactive {
        return DisplayCategory::Hidden;
    }
    if *status == StatusTag::OutOfStock || stock_quantity == 0 {
        return DisplayCategory::OutOfStock;
    }
    if stock_quantity <= LOW_STOCK_THRESHOLD {
        return DisplayCategory::LowStock;
    }
    DisplayCategory::InStock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_is_always_hidden() {
        for n in [0, 1, 5, 6, 1000, u32::MAX] {
            assert_eq!(classify(&StatusTag::Inactive, n), DisplayCategory::Hidden);
        }
    }

    #[test]
    fn test_out_of_stock_status_wins_over_quantity() {
        for n in [0, 1, 5, 6, 1000] {
            assert_eq!(classify(&StatusTag::OutOfStock, n), DisplayCategory::OutOfStock);
        }
    }

    #[test]
    fn test_active_zero_is_out_of_stock() {
        assert_eq!(classify(&StatusTag::Active, 0), DisplayCategory::OutOfStock);
    }

    #[test]
    fn test_low_stock_boundary() {
        assert_eq!(classify(&StatusTag::Active, 1), DisplayCategory::LowStock);
        assert_eq!(classify(&StatusTag::Active, 5), DisplayCategory::LowStock);
        assert_eq!(classify(&StatusTag::Active, 6), DisplayCategory::InStock);
        assert_eq!(classify(&StatusTag::Active, 1000), DisplayCategory::InStock);
    }

    #[test]
    fn test_unknown_status_falls_through_to_quantity() {
        let draft = StatusTag::parse("DRAFT");
        assert_eq!(draft, StatusTag::Other("DRAFT".to_string()));
        assert_eq!(classify(&draft, 0), DisplayCategory::OutOfStock);
        assert_eq!(classify(&draft, 3), DisplayCategory::LowStock);
        assert_eq!(classify(&draft, 50), DisplayCategory::InStock);
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(StatusTag::parse("active"), StatusTag::Active);
        assert_eq!(StatusTag::parse(" Inactive "), StatusTag::Inactive);
        assert_eq!(StatusTag::parse("out-of-stock"), StatusTag::OutOfStock);
        assert_eq!(StatusTag::parse("OUT_OF_STOCK").as_str(), "OUT_OF_STOCK");
    }

    #[test]
    fn test_urgency_ordering() {
        assert!(DisplayCategory::OutOfStock.urgency() > DisplayCategory::LowStock.urgency());
        assert!(DisplayCategory::LowStock.urgency() > DisplayCategory::Hidden.urgency());
        assert!(DisplayCategory::Hidden.urgency() > DisplayCategory::InStock.urgency());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&StatusTag::OutOfStock).unwrap();
        assert_eq!(json, "\"OUT_OF_STOCK\"");
        let tag: StatusTag = serde_json::from_str("\"DISCONTINUED\"").unwrap();
        assert_eq!(tag, StatusTag::Other("DISCONTINUED".to_string()));
    }
}
