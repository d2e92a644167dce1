// tests/integration_tests/calculation_test.rs
use savcalc::{
    CoefficientName, Coefficients, InputName, Inputs, ResultName, Scan, compute, format_results,
};

fn reference_inputs() -> Inputs {
    let scan: Scan<InputName> = [
        (InputName::Headcount, 50.0),
        (InputName::RequestsPerYear, 1000.0),
        (InputName::CompanyRevenue, 2_000_000.0),
        (InputName::IndirectSpend, 10.0),
        (InputName::AverageSalary, 80_000.0),
    ]
    .into_iter()
    .collect();
    Inputs::from_scan(&scan)
}

fn reference_coefficients() -> Coefficients {
    let scan: Scan<CoefficientName> = [
        (CoefficientName::A, 2.0),
        (CoefficientName::B, 0.05),
        (CoefficientName::C, 1.0),
        (CoefficientName::D, 25.0),
        (CoefficientName::E, 3.0),
        (CoefficientName::F, 10.0),
        (CoefficientName::G, 1.2),
    ]
    .into_iter()
    .collect();
    Coefficients::from_scan(&scan)
}

#[test]
fn test_reference_scenario_is_formatted() {
    let results = compute(&reference_inputs(), &reference_coefficients());
    let formatted = format_results(&results, "N/A");

    assert_eq!(formatted.get(ResultName::ValueOfTimeSaved), Some("$2,000"));
    assert_eq!(formatted.get(ResultName::SavingsFromNegotiating), Some("$10,000"));
    assert_eq!(formatted.get(ResultName::DaysSavedWaiting), Some("300"));
    assert_eq!(formatted.get(ResultName::SupplyChainRisk), Some("$600"));
    assert_eq!(formatted.get(ResultName::TotalSavings), Some("$12,600"));
}

#[test]
fn test_single_coefficient_example() {
    let inputs: Scan<InputName> = [(InputName::RequestsPerYear, 100.0)].into_iter().collect();
    let coefficients: Scan<CoefficientName> = [(CoefficientName::A, 1.5)].into_iter().collect();

    let results = compute(
        &Inputs::from_scan(&inputs),
        &Coefficients::from_scan(&coefficients),
    );

    assert!((results.value_of_time_saved - 150.0).abs() < f64::EPSILON);
    assert_eq!(
        format_results(&results, "N/A").get(ResultName::ValueOfTimeSaved),
        Some("$150")
    );
}

#[test]
fn test_compute_is_deterministic_and_idempotent() {
    let inputs = reference_inputs();
    let coefficients = reference_coefficients();

    let first = compute(&inputs, &coefficients);
    let second = compute(&inputs, &coefficients);
    assert_eq!(first, second);
    assert_eq!(format_results(&first, "N/A"), format_results(&second, "N/A"));
}

#[test]
fn test_omitted_names_behave_as_zero() {
    let empty_inputs = Inputs::from_scan(&Scan::new());
    let empty_coefficients = Coefficients::from_scan(&Scan::new());
    assert_eq!(empty_inputs, Inputs::default());
    assert_eq!(empty_coefficients, Coefficients::default());

    let mut explicit = reference_coefficients();
    explicit.f = 0.0;
    let omitted: Scan<CoefficientName> = [
        (CoefficientName::A, 2.0),
        (CoefficientName::B, 0.05),
        (CoefficientName::C, 1.0),
        (CoefficientName::D, 25.0),
        (CoefficientName::E, 3.0),
        (CoefficientName::G, 1.2),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        compute(&reference_inputs(), &explicit),
        compute(&reference_inputs(), &Coefficients::from_scan(&omitted))
    );
}

#[test]
fn test_total_is_ceiling_of_currency_values() {
    let headcounts = [0.0, 1.0, 7.0, 250.0];
    let revenues = [0.0, 999.99, 1_234_567.0];
    let rates = [0.0, 0.33, 1.7];

    for &headcount in &headcounts {
        for &company_revenue in &revenues {
            for &rate in &rates {
                let inputs = Inputs {
                    headcount,
                    requests_per_year: headcount * 3.5,
                    company_revenue,
                    indirect_spend: 12.5,
                    average_salary: 0.0,
                };
                let coefficients = Coefficients {
                    a: rate,
                    b: rate / 10.0,
                    c: 1.0,
                    d: 4.0,
                    e: rate,
                    f: rate * 2.0,
                    g: 0.9,
                };
                let results = compute(&inputs, &coefficients);
                let expected = (results.value_of_time_saved
                    + results.savings_from_negotiating
                    + results.supply_chain_risk)
                    .ceil();

                assert!(
                    (results.total_savings - expected).abs() < f64::EPSILON,
                    "total mismatch for headcount={headcount} revenue={company_revenue} rate={rate}"
                );
                assert!(results.value_of_time_saved.fract().abs() < f64::EPSILON);
                assert!(results.supply_chain_risk.fract().abs() < f64::EPSILON);
            }
        }
    }
}

#[test]
fn test_zero_d_is_unavailable_not_a_crash() {
    let mut coefficients = reference_coefficients();
    coefficients.d = 0.0;
    let results = compute(&reference_inputs(), &coefficients);

    assert!(!results.days_saved_waiting.is_finite());
    let formatted = format_results(&results, "N/A");
    assert_eq!(formatted.get(ResultName::DaysSavedWaiting), Some("N/A"));
    assert_eq!(formatted.get(ResultName::TotalSavings), Some("$12,600"));
}
