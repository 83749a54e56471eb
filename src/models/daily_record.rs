use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per service shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShiftValues<T> {
    pub morning: T,
    pub afternoon: T,
    pub night: T,
}

impl<T: Copy> ShiftValues<T> {
    pub fn new(morning: T, afternoon: T, night: T) -> Self {
        Self {
            morning,
            afternoon,
            night,
        }
    }

    pub fn get(&self, shift: Shift) -> T {
        match shift {
            Shift::Morning => self.morning,
            Shift::Afternoon => self.afternoon,
            Shift::Night => self.night,
        }
    }
}

impl ShiftValues<f64> {
    pub fn total(&self) -> f64 {
        self.morning + self.afternoon + self.night
    }
}

impl ShiftValues<u32> {
    /// Day total, widened so three full shifts cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.morning) + u64::from(self.afternoon) + u64::from(self.night)
    }
}

impl ShiftValues<u64> {
    pub fn total(&self) -> u64 {
        self.morning + self.afternoon + self.night
    }
}

/// Named numeric measure of a [`DailyRecord`].
///
/// `None` as shift means the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Sales(Option<Shift>),
    Diners(Option<Shift>),
    Tickets(Option<Shift>),
    AverageTicket(Option<Shift>),
}

/// One row of the sales ledger: everything recorded for a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub sales: ShiftValues<f64>,
    pub diners: ShiftValues<u32>,
    pub tickets: ShiftValues<u32>,
    pub notes: String,
}

impl DailyRecord {
    pub fn new(
        date: NaiveDate,
        sales: ShiftValues<f64>,
        diners: ShiftValues<u32>,
        tickets: ShiftValues<u32>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            sales,
            diners,
            tickets,
            notes: notes.into().trim().to_string(),
        }
    }

    /// Placeholder for a day that has not been operated (yet).
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            sales: ShiftValues::default(),
            diners: ShiftValues::default(),
            tickets: ShiftValues::default(),
            notes: String::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.sales.total() == 0.0
            && self.diners.total() == 0
            && self.tickets.total() == 0
            && self.notes.is_empty()
    }

    pub fn total_sales(&self) -> f64 {
        self.sales.total()
    }

    pub fn total_diners(&self) -> u64 {
        self.diners.total()
    }

    pub fn total_tickets(&self) -> u64 {
        self.tickets.total()
    }

    /// Every shift's sales must be a finite amount, zero or more.
    pub fn validate(&self) -> AppResult<()> {
        for shift in Shift::ALL {
            let v = self.sales.get(shift);
            if !(v.is_finite() && v >= 0.0) {
                return Err(AppError::InvalidInput(format!(
                    "{} sales for {} must be zero or more (got {v})",
                    shift.label().to_lowercase(),
                    self.date
                )));
            }
        }
        Ok(())
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.trim().is_empty()
    }

    /// Average ticket for a shift (or the whole day); 0 when no tickets were issued.
    pub fn average_ticket(&self, shift: Option<Shift>) -> f64 {
        let (sales, tickets) = match shift {
            Some(s) => (self.sales.get(s), u64::from(self.tickets.get(s))),
            None => (self.total_sales(), self.total_tickets()),
        };
        ratio(sales, tickets as f64)
    }

    /// Tickets issued per diner served; 0 when nobody was served.
    pub fn tickets_per_diner(&self) -> f64 {
        ratio(self.total_tickets() as f64, self.total_diners() as f64)
    }

    pub fn measure(&self, m: Measure) -> f64 {
        match m {
            Measure::Sales(Some(s)) => self.sales.get(s),
            Measure::Sales(None) => self.total_sales(),
            Measure::Diners(Some(s)) => self.diners.get(s) as f64,
            Measure::Diners(None) => self.total_diners() as f64,
            Measure::Tickets(Some(s)) => self.tickets.get(s) as f64,
            Measure::Tickets(None) => self.total_tickets() as f64,
            Measure::AverageTicket(s) => self.average_ticket(s),
        }
    }
}

/// `num / den`, or 0 when the denominator is not positive.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

/// Flat CSV/JSON row for import and export.
///
/// Columns missing from an imported file default to zero; the legacy
/// spreadsheet headers are accepted as aliases. A stored day total is never
/// read: totals are always recomputed from the shifts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyRecordRow {
    #[serde(alias = "fecha")]
    pub date: String,
    #[serde(default, deserialize_with = "zero_if_empty", alias = "ventas_manana_eur")]
    pub sales_morning: f64,
    #[serde(default, deserialize_with = "zero_if_empty", alias = "ventas_tarde_eur")]
    pub sales_afternoon: f64,
    #[serde(default, deserialize_with = "zero_if_empty", alias = "ventas_noche_eur")]
    pub sales_night: f64,
    #[serde(default, skip_deserializing)]
    pub sales_total: f64,
    #[serde(default, deserialize_with = "count_cell", alias = "comensales_manana")]
    pub diners_morning: u32,
    #[serde(default, deserialize_with = "count_cell", alias = "comensales_tarde")]
    pub diners_afternoon: u32,
    #[serde(default, deserialize_with = "count_cell", alias = "comensales_noche")]
    pub diners_night: u32,
    #[serde(default, deserialize_with = "count_cell", alias = "tickets_manana")]
    pub tickets_morning: u32,
    #[serde(default, deserialize_with = "count_cell", alias = "tickets_tarde")]
    pub tickets_afternoon: u32,
    #[serde(default, deserialize_with = "count_cell", alias = "tickets_noche")]
    pub tickets_night: u32,
    #[serde(default, alias = "observaciones")]
    pub notes: String,
}

/// Spreadsheet exports leave empty cells where nothing was sold.
fn zero_if_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Counts may come as `12.0` when the exporting tool stored the column as
/// floating point.
fn count_cell<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(v) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(0);
    };
    if v.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&v) {
        return Err(D::Error::custom(format!(
            "count must be a whole number between 0 and {} (got {v})",
            u32::MAX
        )));
    }
    Ok(v as u32)
}

impl From<&DailyRecord> for DailyRecordRow {
    fn from(r: &DailyRecord) -> Self {
        Self {
            date: r.date.format("%Y-%m-%d").to_string(),
            sales_morning: r.sales.morning,
            sales_afternoon: r.sales.afternoon,
            sales_night: r.sales.night,
            sales_total: r.total_sales(),
            diners_morning: r.diners.morning,
            diners_afternoon: r.diners.afternoon,
            diners_night: r.diners.night,
            tickets_morning: r.tickets.morning,
            tickets_afternoon: r.tickets.afternoon,
            tickets_night: r.tickets.night,
            notes: r.notes.clone(),
        }
    }
}

impl DailyRecordRow {
    /// Build a typed record. Accepts `YYYY-MM-DD`, an ISO timestamp
    /// (`YYYY-MM-DD HH:MM:SS`) or `DD/MM/YYYY`.
    pub fn into_record(self) -> Option<DailyRecord> {
        let date = crate::utils::date::parse_flexible_date(&self.date)?;
        Some(DailyRecord::new(
            date,
            ShiftValues::new(self.sales_morning, self.sales_afternoon, self.sales_night),
            ShiftValues::new(
                self.diners_morning,
                self.diners_afternoon,
                self.diners_night,
            ),
            ShiftValues::new(
                self.tickets_morning,
                self.tickets_afternoon,
                self.tickets_night,
            ),
            self.notes,
        ))
    }
}
