use lumen_catalog::{CuCatalog, CuValue};
use lumen_lookup::{CuResult, RcrResolution, ReflectanceResolution};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// JSON envelope printed on stdout in `--json` mode.
#[derive(Debug, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Response {
    pub fn error(message: String) -> Self {
        Self {
            status: Status::Error,
            message: Some(message),
            data: Value::Null,
        }
    }
}

/// What a command produced: structured data, its human rendering, and an optional failure
/// that still carries the data (e.g. a lookup rejected by policy).
#[derive(Debug)]
pub struct CommandOutput {
    pub data: Value,
    pub text: String,
    pub failure: Option<String>,
}

impl CommandOutput {
    pub fn ok(data: Value, text: String) -> Self {
        Self {
            data,
            text,
            failure: None,
        }
    }

    pub fn into_response(self) -> Response {
        Response {
            status: if self.failure.is_some() {
                Status::Error
            } else {
                Status::Ok
            },
            message: self.failure,
            data: self.data,
        }
    }
}

pub fn catalog_summary(catalog: &CuCatalog) -> Value {
    let tables: Vec<Value> = catalog
        .tables()
        .iter()
        .map(|table| {
            let (rcr_min, rcr_max) = table.rcr_range();
            json!({
                "ceiling": table.reflectance().ceiling,
                "wall": table.reflectance().wall,
                "floor": table.reflectance().floor,
                "description": table.description(),
                "rows": table.values().len(),
                "rcr_min": rcr_min,
                "rcr_max": rcr_max,
                "monotonic": table.is_monotonic(),
            })
        })
        .collect();
    json!({
        "fixture": catalog.fixture(),
        "table_count": catalog.len(),
        "tables": tables,
    })
}

pub fn render_tables(catalog: &CuCatalog) -> String {
    let mut out = String::new();
    if let Some(fixture) = catalog.fixture() {
        out.push_str(&format!("{fixture}\n"));
    }
    out.push_str("chart      rcr     rows  description\n");
    for table in catalog.tables() {
        let (first, last) = table.rcr_range();
        out.push_str(&format!(
            "{:<10} {:<7} {:<5} {}\n",
            table.reflectance().to_string(),
            format!("{first}-{last}"),
            table.values().len(),
            table.description().unwrap_or("-")
        ));
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_validation(label: &str, catalog: &CuCatalog) -> String {
    let mut out = format!("{label}: {} CU table(s) valid", catalog.len());
    for table in catalog.tables() {
        let violations = table.monotonic_violations();
        if !violations.is_empty() {
            let pairs: Vec<String> = violations
                .iter()
                .map(|(lo, hi)| format!("{lo}->{hi}"))
                .collect();
            out.push_str(&format!(
                "\nwarning: {} CU rises with RCR at {}",
                table.reflectance(),
                pairs.join(", ")
            ));
        }
    }
    out
}

pub fn render_lookup(result: &CuResult) -> String {
    let flags: Vec<&str> = result.flags().iter().map(|flag| flag.as_str()).collect();
    let mut out = format!("CU {:.3} ({})", result.cu, flags.join(", "));

    match result.reflectance_resolution {
        ReflectanceResolution::Exact => {
            out.push_str(&format!("\n  chart: {}", result.table));
        }
        ReflectanceResolution::Approximated { distance } => {
            out.push_str(&format!(
                "\n  chart: {} (nearest to requested {}, off by {distance} points)",
                result.table, result.requested
            ));
        }
    }

    match result.rcr_resolution {
        RcrResolution::Exact { rcr } => {
            out.push_str(&format!("\n  rcr: {rcr} (tabulated row)"));
        }
        RcrResolution::Interpolated { lower, upper } => {
            out.push_str(&format!(
                "\n  rcr: {:.2} (between rows {lower} and {upper})",
                result.rcr
            ));
        }
        RcrResolution::Extrapolated { boundary } => {
            out.push_str(&format!(
                "\n  rcr: {:.2} (outside the chart, clamped to row {boundary})",
                result.rcr
            ));
            out.push_str("\nwarning: zonal cavity CU is not valid far outside the tabulated rows");
        }
    }

    if result.non_monotonic_table {
        out.push_str("\nwarning: chart CU rises with RCR; check the source data");
    }
    out
}

pub fn render_values(values: &[CuValue]) -> String {
    let mut out = String::from("rcr\tcu");
    for value in values {
        out.push_str(&format!("\n{}\t{}", value.rcr, value.cu));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_catalog::load_str;
    use lumen_lookup::lookup;

    fn catalog() -> CuCatalog {
        load_str(
            r#"{"fixture": "Test fixture", "tables": [{
                "description": "sample",
                "ceilingReflectance": 70, "wallReflectance": 50, "floorReflectance": 20,
                "cuValues": [{"rcr": 1, "cu": 0.65}, {"rcr": 2, "cu": 0.55}]
            }]}"#,
        )
        .unwrap()
    }

    #[test]
    fn lookup_text_names_the_chart_used() {
        let result = lookup(&catalog(), 80, 50, 20, 1.5).unwrap();
        let text = render_lookup(&result);
        assert!(
            text.starts_with("CU 0.600 (interpolated, reflectance-approximated)"),
            "{text}"
        );
        assert!(text.contains("chart: 70/50/20 (nearest to requested 80/50/20"), "{text}");
        assert!(text.contains("between rows 1 and 2"), "{text}");
    }

    #[test]
    fn extrapolated_lookup_text_warns() {
        let result = lookup(&catalog(), 70, 50, 20, 9.0).unwrap();
        let text = render_lookup(&result);
        assert!(text.contains("clamped to row 2"), "{text}");
        assert!(text.contains("warning:"), "{text}");
    }

    #[test]
    fn header_keeps_extrapolation_visible_when_approximated() {
        let result = lookup(&catalog(), 80, 50, 20, 9.0).unwrap();
        let text = render_lookup(&result);
        assert!(
            text.starts_with("CU 0.550 (extrapolated, reflectance-approximated)"),
            "{text}"
        );
    }

    #[test]
    fn tables_text_lists_each_chart() {
        let text = render_tables(&catalog());
        assert!(text.starts_with("Test fixture\n"), "{text}");
        assert!(text.contains("70/50/20"), "{text}");
        assert!(text.ends_with("sample"), "{text}");
    }

    #[test]
    fn failed_output_becomes_error_envelope() {
        let output = CommandOutput {
            data: json!({"cu": 0.5}),
            text: String::new(),
            failure: Some("extrapolated".to_string()),
        };
        let value = serde_json::to_value(output.into_response()).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "extrapolated");
        assert_eq!(value["data"]["cu"], 0.5);
    }
}
