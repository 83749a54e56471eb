use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Maintenance,
    ProfessionalServices,
    Banking,
    Technology,
    Marketing,
    Cleaning,
    Uniforms,
    Security,
    Other,
}

impl ExpenseCategory {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::ProfessionalServices => "professional-services",
            ExpenseCategory::Banking => "banking",
            ExpenseCategory::Technology => "technology",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Cleaning => "cleaning",
            ExpenseCategory::Uniforms => "uniforms",
            ExpenseCategory::Security => "security",
            ExpenseCategory::Other => "other",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|c| c.to_db_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Maintenance => "Maintenance",
            ExpenseCategory::ProfessionalServices => "Professional services",
            ExpenseCategory::Banking => "Banks & payment methods",
            ExpenseCategory::Technology => "Technology & platforms",
            ExpenseCategory::Marketing => "Marketing & communication",
            ExpenseCategory::Cleaning => "Cleaning & laundry",
            ExpenseCategory::Uniforms => "Uniforms & utensils",
            ExpenseCategory::Security => "Security",
            ExpenseCategory::Other => "Other operating expenses",
        }
    }
}

/// Structural (fixed) costs feed the breakeven; variable ones do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CostKind {
    Fixed,
    Variable,
}

impl CostKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CostKind::Fixed => "fixed",
            CostKind::Variable => "variable",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "fixed" => Some(CostKind::Fixed),
            "variable" => Some(CostKind::Variable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub concept: String,
    pub category: ExpenseCategory,
    pub kind: CostKind,
    pub cost: f64,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        concept: &str,
        category: ExpenseCategory,
        kind: CostKind,
        cost: f64,
    ) -> Self {
        Self {
            id: 0,
            date,
            concept: concept.trim().to_string(),
            category,
            kind,
            cost: crate::utils::formatting::round2(cost),
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == CostKind::Fixed
    }
}
