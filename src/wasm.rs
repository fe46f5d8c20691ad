//! WASM bindings for Tensile Sim
//!
//! Lets a browser or web-view front end run the engine locally. Every
//! entry point takes and returns JSON strings; the caller keeps the
//! simulation state and passes it back on each increment.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::prelude::*;
use crate::results::{points_in_phase, specimen_width_percent};

// Use wee_alloc for smaller WASM binary
#[cfg(feature = "wasm")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

static BUILTIN: OnceLock<MaterialCatalog> = OnceLock::new();

fn builtin_catalog() -> &'static MaterialCatalog {
    BUILTIN.get_or_init(MaterialCatalog::builtin)
}

// ========================
// Input Data Structures
// ========================

#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub material: Option<Material>,
    pub strain: f64,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub state: SimulationState,
    #[serde(default)]
    pub increment: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub options: SimulationOptions,
}

// ========================
// Output Data Structures
// ========================

#[derive(Debug, Serialize)]
pub struct WasmResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct ComputeResult {
    pub stress: f64,
    pub phase: Phase,
    pub color: &'static str,
    pub label: &'static str,
}

/// Everything a view needs after one increment
#[derive(Debug, Serialize)]
pub struct AdvanceResult {
    pub state: SimulationState,
    pub chart: ChartDomain,
    pub specimen_width: f64,
    pub phase_color: &'static str,
    pub phase_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub state: SimulationState,
    pub report: TestReport,
    pub elastic_points: Vec<SimulationPoint>,
    pub plastic_points: Vec<SimulationPoint>,
    pub rupture_points: Vec<SimulationPoint>,
    pub message: &'static str,
    pub conclusion: String,
    pub behavior: &'static str,
}

// ========================
// WASM Entry Points
// ========================

/// Built-in materials as a JSON array
#[wasm_bindgen]
pub fn materials() -> String {
    serde_json::to_string(builtin_catalog()).unwrap_or_else(|_| "[]".to_string())
}

/// Stress and phase at a given strain
#[wasm_bindgen]
pub fn compute(request_json: &str) -> String {
    respond(parse::<ComputeRequest>(request_json).and_then(run_compute))
}

/// Apply one strain increment to the supplied state
#[wasm_bindgen]
pub fn advance(request_json: &str) -> String {
    respond(parse::<AdvanceRequest>(request_json).and_then(run_advance))
}

/// Run a full test to rupture and return the report
#[wasm_bindgen]
pub fn run(request_json: &str) -> String {
    respond(parse::<RunRequest>(request_json).and_then(run_full))
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ========================
// Request Handling
// ========================

fn parse<T: for<'de> Deserialize<'de>>(json: &str) -> SimResult<T> {
    Ok(serde_json::from_str(json)?)
}

fn respond<T: Serialize>(result: SimResult<T>) -> String {
    let response = match result {
        Ok(results) => WasmResponse {
            success: true,
            error: None,
            results: Some(results),
        },
        Err(e) => WasmResponse {
            success: false,
            error: Some(e.to_string()),
            results: None,
        },
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

fn resolve_material(material: Option<Material>, material_id: Option<String>) -> SimResult<Material> {
    match (material, material_id) {
        (Some(material), _) => {
            material.validate()?;
            Ok(material)
        }
        (None, Some(id)) => builtin_catalog().get(&id).cloned(),
        (None, None) => Err(SimError::InvalidInput(
            "either material_id or material is required".to_string(),
        )),
    }
}

fn run_compute(request: ComputeRequest) -> SimResult<ComputeResult> {
    let material = resolve_material(request.material, request.material_id)?;
    if !request.strain.is_finite() || request.strain < 0.0 {
        return Err(SimError::InvalidInput(format!(
            "strain must be finite and non-negative, got {}",
            request.strain
        )));
    }
    let (stress, phase) = compute_stress_and_phase(&material, request.strain);
    Ok(ComputeResult {
        stress,
        phase,
        color: phase.color(),
        label: phase.label(),
    })
}

fn run_advance(request: AdvanceRequest) -> SimResult<AdvanceResult> {
    let material = resolve_material(request.material, request.material_id)?;
    let increment = request
        .increment
        .unwrap_or_else(|| default_increment(&material));
    request.state.validate()?;
    let state = advance_strain(&material, &request.state, increment)?;
    Ok(AdvanceResult {
        chart: ChartDomain::for_session(&material, &state),
        specimen_width: specimen_width_percent(&material, &state),
        phase_color: state.current_phase.color(),
        phase_label: state.current_phase.label(),
        state,
    })
}

fn run_full(request: RunRequest) -> SimResult<RunResult> {
    let material = resolve_material(request.material, request.material_id)?;
    let mut test = TensileTest::with_options(material, request.options)?;
    test.run_to_rupture()?;

    let state = test.state().clone();
    let report = test.report();
    Ok(RunResult {
        elastic_points: points_in_phase(&state, Phase::Elastic),
        plastic_points: points_in_phase(&state, Phase::Plastic),
        rupture_points: points_in_phase(&state, Phase::Rupture),
        message: report.result_message(),
        conclusion: report.conclusion(&test.material().name),
        behavior: report.behavior(),
        report,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_json() {
        let response = advance(r#"{"material_id": "al6061"}"#);
        let value: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["results"]["state"]["data_points"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_bad_json_reports_error() {
        let value: serde_json::Value = serde_json::from_str(&compute("{")).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().starts_with("Serialization error"));
    }

    #[test]
    fn test_run_json() {
        let value: serde_json::Value =
            serde_json::from_str(&run(r#"{"material_id": "steel1020"}"#)).unwrap();
        assert_eq!(value["results"]["report"]["ruptured"], true);
        assert_eq!(value["results"]["rupture_points"].as_array().unwrap().len(), 1);
        assert!(value["results"]["behavior"].as_str().unwrap().contains("brittle"));
    }

    #[test]
    fn test_builtin_catalog_is_built_once() {
        assert!(std::ptr::eq(builtin_catalog(), builtin_catalog()));
        assert!(materials().contains("steel1020"));
    }

    #[test]
    fn test_advance_rejects_negative_client_strain() {
        let state = SimulationState {
            current_strain: -0.1,
            ..SimulationState::new()
        };
        let request = serde_json::json!({ "material_id": "steel1020", "state": state });
        let value: serde_json::Value =
            serde_json::from_str(&advance(&request.to_string())).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("current_strain"));
    }
}
