// src/core/engine.rs
use crate::models::{Coefficients, Inputs, Results};

/// Computes every result from the form inputs and the page coefficients.
///
/// Each value is rounded up as soon as it is defined, and the total is the
/// rounded-up sum of the three currency values that make it up. Days saved
/// waiting is not part of the total.
///
/// A zero `D` coefficient with a non-zero headcount makes days saved waiting
/// infinite or NaN; the value is returned as is and left to the formatter.
#[must_use]
pub fn compute(inputs: &Inputs, coefficients: &Coefficients) -> Results {
    let Inputs {
        headcount,
        requests_per_year,
        company_revenue,
        indirect_spend,
        average_salary: _,
    } = *inputs;
    let Coefficients { a, b, c, d, e, f, g } = *coefficients;

    let value_of_time_saved = (requests_per_year * a).ceil();
    let savings_from_negotiating = (company_revenue * (indirect_spend / 100.0) * b).ceil();
    let days_saved_waiting = (headcount * c * (headcount / d) * e).ceil();
    let supply_chain_risk = (headcount * f * g).ceil();
    let total_savings = (value_of_time_saved + savings_from_negotiating + supply_chain_risk).ceil();

    Results {
        value_of_time_saved,
        savings_from_negotiating,
        days_saved_waiting,
        supply_chain_risk,
        total_savings,
    }
}
