// tests/integration_tests/common.rs
use anyhow::Result;
use std::fs;
use std::io::Write as _;
use std::path::Path;

pub const CALCULATOR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>ROI calculator</title></head>
<body>
  <form calculator-input class="calc-form">
    <label>Headcount <input type="number" name="headcount" value="50"></label>
    <label>Requests <input type="number" name="number-of-requests-per-year" value="1000"></label>
    <label>Revenue <input type="number" name="company-revenue" value="2000000"></label>
    <label>Indirect spend <input type="number" name="indirect-spend" value="10"></label>
    <label>Salary <input type="number" name="average-salary" value="80000"></label>
    <input type="submit" value="Calculate">
  </form>
  <div class="hidden">
    <div calculator-variable="A">2</div>
    <div calculator-variable="B">0.05</div>
    <div calculator-variable="C">1</div>
    <div calculator-variable="D">25</div>
    <div calculator-variable="E">3</div>
    <div calculator-variable="F">10</div>
    <div calculator-variable="G">1.2</div>
  </div>
  <section>
    <h2 calculator-result="total-savings">$0</h2>
    <p>Time: <span calculator-result="value-of-time-saved">$0</span></p>
    <p>Negotiating: <span calculator-result="savings-from-negotiating">$0</span></p>
    <p>Days: <span calculator-result="days-saved-waiting">0</span></p>
    <p>Risk: <span calculator-result="supply-chain-risk">$0</span></p>
  </section>
</body>
</html>
"#;

pub const PLAIN_PAGE: &str = "<!DOCTYPE html><html><body><h1>About us</h1></body></html>\n";

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Text of every element declaring `name` as its result.
pub fn result_text(page: &savcalc::HtmlPage, name: &str) -> Vec<String> {
    use savcalc::Page as _;

    page.query_all("calculator-result")
        .into_iter()
        .filter(|node| page.attribute(*node, "calculator-result").as_deref() == Some(name))
        .map(|node| page.text_content(node))
        .collect()
}
