use crate::models::position::Position;
use serde::Serialize;

/// Flat payroll row: CSV cannot hold the monthly headcount array.
#[derive(Serialize, Clone, Debug)]
pub struct PositionExport {
    pub id: i64,
    pub year: i32,
    pub name: String,
    pub gross_annual: f64,
    pub headcount: String,
}

impl From<&Position> for PositionExport {
    fn from(p: &Position) -> Self {
        Self {
            id: p.id,
            year: p.year,
            name: p.name.clone(),
            gross_annual: p.gross_annual,
            headcount: p.headcount_csv(),
        }
    }
}
