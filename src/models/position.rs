use serde::Serialize;

/// A payroll position planned for a year: salary per person and how many
/// people fill it each month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub id: i64,
    pub year: i32,
    pub name: String,
    pub gross_annual: f64,
    pub headcount: [u32; 12],
}

impl Position {
    pub fn new(year: i32, name: &str, gross_annual: f64, headcount: [u32; 12]) -> Self {
        Self {
            id: 0,
            year,
            name: name.trim().to_string(),
            gross_annual,
            headcount,
        }
    }

    /// Headcount for a 1-based month; 0 outside 1..=12.
    pub fn headcount_in(&self, month: u32) -> u32 {
        match month {
            1..=12 => self.headcount[(month - 1) as usize],
            _ => 0,
        }
    }

    /// Comma-separated headcount, as stored and as accepted by the CLI.
    pub fn headcount_csv(&self) -> String {
        self.headcount
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parse 12 comma-separated monthly headcounts. A single value applies to
/// every month.
pub fn parse_headcount(s: &str) -> Option<[u32; 12]> {
    let values: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;

    match values.len() {
        1 => Some([values[0]; 12]),
        12 => {
            let mut out = [0u32; 12];
            out.copy_from_slice(&values);
            Some(out)
        }
        _ => None,
    }
}
