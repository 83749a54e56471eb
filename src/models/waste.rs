use super::purchase::Family;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    Kg,
    Units,
    L,
}

impl Unit {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Units => "units",
            Unit::L => "l",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "kg" => Some(Unit::Kg),
            "units" => Some(Unit::Units),
            "l" => Some(Unit::L),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WasteReason {
    Expired,
    Overproduction,
    PreparationError,
    OrderingError,
    Spoilage,
    Breakage,
    StockAdjustment,
    Other,
}

impl WasteReason {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WasteReason::Expired => "expired",
            WasteReason::Overproduction => "overproduction",
            WasteReason::PreparationError => "preparation-error",
            WasteReason::OrderingError => "ordering-error",
            WasteReason::Spoilage => "spoilage",
            WasteReason::Breakage => "breakage",
            WasteReason::StockAdjustment => "stock-adjustment",
            WasteReason::Other => "other",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|r| r.to_db_str() == s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WasteEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub family: Family,
    pub product: String,
    pub unit: Unit,
    pub quantity: f64,
    pub reason: WasteReason,
}

impl WasteEntry {
    pub fn new(
        date: NaiveDate,
        family: Family,
        product: &str,
        unit: Unit,
        quantity: f64,
        reason: WasteReason,
    ) -> Self {
        Self {
            id: 0,
            date,
            family,
            product: product.trim().to_string(),
            unit,
            quantity: crate::utils::formatting::round2(quantity),
            reason,
        }
    }
}
