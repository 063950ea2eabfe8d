use crate::constraints::{Bounds, ConstraintSet, InvalidConstraint};
use crate::errors::ParseError;
use crate::log::init_logger;
use crate::parser::{parse_digit_counts, parse_int_list};
use crate::search;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E002", "C002", "WASM001")
    code: String,
    /// Display message
    message: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<InvalidConstraint> for WasmError {
    fn from(e: InvalidConstraint) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<Box<ParseError>> for WasmError {
    fn from(e: Box<ParseError>) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            help: e.help().map(|s| s.to_string()),
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        // Format a comprehensive error message
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        // Create a JavaScript Error object with the formatted message
        js_sys::Error::new(&msg).into()
    }
}

/// Initialize cagesum logging with the specified debug setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info log level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    // 1. Set up panic hook
    console_error_panic_hook::set_once();

    // 2. Initialize logging with the provided debug setting
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
    if !debug_enabled {
        log::info!("Debug logging disabled");
    }
}

/// The web form's fields, as JavaScript hands them over: numeric knobs plus
/// the raw text of the list fields. Missing fields fall back to the form
/// defaults.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CalculateParams {
    min_sum: i32,
    max_sum: i32,
    min_digit: i32,
    max_digit: i32,
    min_count: i32,
    max_count: i32,
    max_repeats: i32,
    /// Comma-separated specific target sums, e.g. `"10,12"`
    exact_sums: String,
    /// Comma-separated forbidden digits
    ignored_digits: String,
    /// Comma-separated required digits
    must_have_digits: String,
    /// Mapping syntax, e.g. `"1:3,2:2-5"`
    digit_counts: String,
}

impl Default for CalculateParams {
    fn default() -> Self {
        CalculateParams {
            min_sum: 0,
            max_sum: 0,
            min_digit: 1,
            max_digit: 9,
            min_count: 1,
            max_count: 9,
            max_repeats: 1,
            exact_sums: String::new(),
            ignored_digits: String::new(),
            must_have_digits: String::new(),
            digit_counts: String::new(),
        }
    }
}

impl CalculateParams {
    /// Parse the text fields and assemble the typed constraint set.
    fn into_constraints(self) -> Result<ConstraintSet, Box<ParseError>> {
        Ok(ConstraintSet {
            sum_range: Bounds::of(self.min_sum, self.max_sum),
            exact_sums: parse_int_list(&self.exact_sums)?,
            count_range: Bounds::of(self.min_count, self.max_count),
            digit_range: Bounds::of(self.min_digit, self.max_digit),
            max_repeats: self.max_repeats,
            digit_counts: parse_digit_counts(&self.digit_counts)?,
            ignored_digits: parse_int_list(&self.ignored_digits)?.into_iter().collect(),
            must_have_digits: parse_int_list(&self.must_have_digits)?.into_iter().collect(),
        })
    }
}

/// JS entry: `(params: object)` — the form fields, camelCase, text lists raw.
/// Returns `Array<{sum: number, combinations: number[][]}>` in scan order.
#[wasm_bindgen]
pub fn calculate_sums(params: JsValue) -> Result<JsValue, JsValue> {
    let params: CalculateParams = serde_wasm_bindgen::from_value(params).map_err(|e| {
        // Structured error for deserialization failures
        WasmError {
            code: "WASM001".to_string(),
            message: format!("params must be an object of form fields: {e}"),
            help: Some(
                "Pass the form fields as one object, e.g. {minSum: 3, maxSum: 10, minCount: 2}"
                    .to_string(),
            ),
        }
    })?;

    let constraints = params.into_constraints().map_err(WasmError::from)?;
    let mapping = search::search(&constraints).map_err(WasmError::from)?;

    serde_wasm_bindgen::to_value(&mapping).map_err(|e| {
        WasmError {
            code: "WASM002".to_string(),
            message: format!("serialization failed: {e}"),
            help: Some("This is an internal error. Please report this issue.".to_string()),
        }
        .into()
    })
}
