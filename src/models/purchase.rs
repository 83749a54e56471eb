use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

/// Product family shared by purchases and waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    RawMaterial,
    Beverages,
    Cleaning,
    Other,
}

impl Family {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Family::RawMaterial => "raw-material",
            Family::Beverages => "beverages",
            Family::Cleaning => "cleaning",
            Family::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "raw-material" => Some(Family::RawMaterial),
            "beverages" => Some(Family::Beverages),
            "cleaning" => Some(Family::Cleaning),
            "other" => Some(Family::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Family::RawMaterial => "Raw material",
            Family::Beverages => "Beverages",
            Family::Cleaning => "Cleaning",
            Family::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    pub id: i64,
    pub date: NaiveDate,
    pub supplier: String,
    pub family: Family,
    pub cost: f64,
}

impl Purchase {
    pub fn new(date: NaiveDate, supplier: &str, family: Family, cost: f64) -> Self {
        Self {
            id: 0,
            date,
            supplier: supplier.trim().to_string(),
            family,
            cost: crate::utils::formatting::round2(cost),
        }
    }
}
