// src/models/values.rs
use super::names::{CoefficientName, InputName, ResultName};
use super::scan::Scan;

/// User-editable quantities read from the form.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Inputs {
    pub headcount: f64,
    pub requests_per_year: f64,
    pub company_revenue: f64,
    /// Percentage of revenue, 0 to 100.
    pub indirect_spend: f64,
    /// Accepted but not used by any formula.
    pub average_salary: f64,
}

impl Inputs {
    #[must_use]
    pub fn from_scan(scan: &Scan<InputName>) -> Self {
        Self {
            headcount: scan.value(InputName::Headcount),
            requests_per_year: scan.value(InputName::RequestsPerYear),
            company_revenue: scan.value(InputName::CompanyRevenue),
            indirect_spend: scan.value(InputName::IndirectSpend),
            average_salary: scan.value(InputName::AverageSalary),
        }
    }
}

/// Page-authored constants A to G.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

impl Coefficients {
    #[must_use]
    pub fn from_scan(scan: &Scan<CoefficientName>) -> Self {
        Self {
            a: scan.value(CoefficientName::A),
            b: scan.value(CoefficientName::B),
            c: scan.value(CoefficientName::C),
            d: scan.value(CoefficientName::D),
            e: scan.value(CoefficientName::E),
            f: scan.value(CoefficientName::F),
            g: scan.value(CoefficientName::G),
        }
    }
}

/// Raw computed values, already rounded up. Values may be non-finite when a
/// coefficient divides by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Results {
    pub value_of_time_saved: f64,
    pub savings_from_negotiating: f64,
    pub days_saved_waiting: f64,
    pub supply_chain_risk: f64,
    pub total_savings: f64,
}

impl Results {
    #[inline]
    #[must_use]
    pub const fn get(&self, name: ResultName) -> f64 {
        match name {
            ResultName::ValueOfTimeSaved => self.value_of_time_saved,
            ResultName::SavingsFromNegotiating => self.savings_from_negotiating,
            ResultName::DaysSavedWaiting => self.days_saved_waiting,
            ResultName::SupplyChainRisk => self.supply_chain_risk,
            ResultName::TotalSavings => self.total_savings,
        }
    }
}

/// Display strings for every result, in result order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResults {
    entries: Vec<(ResultName, String)>,
}

impl FormattedResults {
    #[must_use]
    pub const fn new(entries: Vec<(ResultName, String)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, name: ResultName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResultName, &str)> {
        self.entries.iter().map(|(name, text)| (*name, text.as_str()))
    }
}
