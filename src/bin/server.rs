//! Tensile Sim HTTP Server
//!
//! Stateless: clients hold the simulation state and send it back with
//! every increment request.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use tensile_sim::prelude::*;

type Catalog = Arc<MaterialCatalog>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Either a catalog id or an inline material
#[derive(Debug, Default, Deserialize)]
struct MaterialRef {
    #[serde(default)]
    material_id: Option<String>,
    #[serde(default)]
    material: Option<Material>,
}

#[derive(Debug, Deserialize)]
struct StressRequest {
    #[serde(flatten)]
    material: MaterialRef,
    strain: f64,
}

#[derive(Debug, Deserialize)]
struct AdvanceRequest {
    #[serde(flatten)]
    material: MaterialRef,
    #[serde(default)]
    state: SimulationState,
    #[serde(default)]
    increment: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RunRequest {
    #[serde(flatten)]
    material: MaterialRef,
    #[serde(default)]
    increment: Option<f64>,
}

#[derive(Debug, Serialize)]
struct StressResult {
    strain: f64,
    stress: f64,
    phase: Phase,
}

#[derive(Debug, Serialize)]
struct RunResult {
    state: SimulationState,
    report: TestReport,
    message: String,
    conclusion: String,
    behavior: String,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

fn respond<T: Serialize>(result: SimResult<T>) -> (StatusCode, Json<ApiResponse<T>>) {
    match result {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            let status = match e {
                SimError::MaterialNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            };
            log::debug!("Request rejected: {}", e);
            (
                status,
                Json(ApiResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

fn resolve_material(catalog: &MaterialCatalog, reference: MaterialRef) -> SimResult<Material> {
    match (reference.material, reference.material_id) {
        (Some(material), _) => {
            material.validate()?;
            Ok(material)
        }
        (None, Some(id)) => catalog.get(&id).cloned(),
        (None, None) => Err(SimError::InvalidInput(
            "either material_id or material is required".to_string(),
        )),
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn materials(State(catalog): State<Catalog>) -> impl IntoResponse {
    Json(catalog.iter().cloned().collect::<Vec<_>>())
}

async fn stress(
    State(catalog): State<Catalog>,
    Json(request): Json<StressRequest>,
) -> impl IntoResponse {
    respond(run_stress(&catalog, request))
}

fn run_stress(catalog: &MaterialCatalog, request: StressRequest) -> SimResult<StressResult> {
    let material = resolve_material(catalog, request.material)?;
    if !request.strain.is_finite() || request.strain < 0.0 {
        return Err(SimError::InvalidInput(format!(
            "strain must be finite and non-negative, got {}",
            request.strain
        )));
    }
    let (stress, phase) = compute_stress_and_phase(&material, request.strain);
    Ok(StressResult {
        strain: request.strain,
        stress,
        phase,
    })
}

async fn advance(
    State(catalog): State<Catalog>,
    Json(request): Json<AdvanceRequest>,
) -> impl IntoResponse {
    respond(run_advance(&catalog, request))
}

fn run_advance(catalog: &MaterialCatalog, request: AdvanceRequest) -> SimResult<SimulationState> {
    let material = resolve_material(catalog, request.material)?;
    let increment = request
        .increment
        .unwrap_or_else(|| default_increment(&material));
    request.state.validate()?;
    advance_strain(&material, &request.state, increment)
}

async fn run(State(catalog): State<Catalog>, Json(request): Json<RunRequest>) -> impl IntoResponse {
    respond(run_to_rupture(&catalog, request))
}

fn run_to_rupture(catalog: &MaterialCatalog, request: RunRequest) -> SimResult<RunResult> {
    let material = resolve_material(catalog, request.material)?;
    let options = SimulationOptions {
        increment: request.increment,
        ..SimulationOptions::default()
    };

    let mut test = TensileTest::with_options(material, options)?;
    test.run_to_rupture()?;

    let report = test.report();
    Ok(RunResult {
        message: report.result_message().to_string(),
        conclusion: report.conclusion(&test.material().name),
        behavior: report.behavior().to_string(),
        state: test.state().clone(),
        report,
    })
}

fn load_catalog() -> anyhow::Result<MaterialCatalog> {
    match std::env::var("TENSILE_MATERIALS") {
        Ok(path) => MaterialCatalog::from_json_file(&path)
            .with_context(|| format!("failed to load material catalog from {}", path)),
        Err(_) => Ok(MaterialCatalog::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let catalog = Arc::new(load_catalog()?);
    log::info!("Loaded {} materials: {}", catalog.len(), catalog.ids().join(", "));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/materials", get(materials))
        .route("/api/v1/stress", post(stress))
        .route("/api/v1/advance", post(advance))
        .route("/api/v1/run", post(run))
        .layer(cors)
        .with_state(catalog);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8087".to_string());
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;

    log::info!("Tensile Sim Server listening on http://{}", addr);
    log::info!("  Health check: GET  /health");
    log::info!("  Materials:    GET  /api/v1/materials");
    log::info!("  Stress:       POST /api/v1/stress");
    log::info!("  Advance:      POST /api/v1/advance");
    log::info!("  Run:          POST /api/v1/run");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_request_from_id() {
        let catalog = MaterialCatalog::builtin();
        let request: AdvanceRequest = serde_json::from_str(r#"{"material_id": "steel1020"}"#).unwrap();
        let state = run_advance(&catalog, request).unwrap();
        assert_eq!(state.data_points.len(), 1);
        assert_eq!(state.current_phase, Phase::Plastic);
    }

    #[test]
    fn test_advance_request_continues_state() {
        let catalog = MaterialCatalog::builtin();
        let first = run_advance(
            &catalog,
            serde_json::from_str(r#"{"material_id": "copper", "increment": 0.0001}"#).unwrap(),
        )
        .unwrap();
        let body = serde_json::json!({ "material_id": "copper", "state": first.clone(), "increment": 0.0001 });
        let second = run_advance(&catalog, serde_json::from_value(body).unwrap()).unwrap();
        assert_eq!(second.data_points.len(), 2);
        assert_eq!(second.data_points[0], first.data_points[0]);
    }

    #[test]
    fn test_advance_rejects_negative_client_strain() {
        let catalog = MaterialCatalog::builtin();
        let state = SimulationState {
            current_strain: -0.5,
            ..SimulationState::new()
        };
        let body = serde_json::json!({ "material_id": "steel1020", "state": state });
        assert!(matches!(
            run_advance(&catalog, serde_json::from_value(body).unwrap()),
            Err(SimError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_inline_material_and_errors() {
        let catalog = MaterialCatalog::builtin();
        let request: StressRequest = serde_json::from_str(
            r#"{"material": {"id": "custom", "elastic_modulus": 100.0, "yield_strength": 200.0,
                "ultimate_strength": 300.0, "rupture_strain": 0.2}, "strain": 0.001}"#,
        )
        .unwrap();
        let result = run_stress(&catalog, request).unwrap();
        assert_eq!(result.phase, Phase::Elastic);

        let request: StressRequest =
            serde_json::from_str(r#"{"material_id": "nope", "strain": 0.1}"#).unwrap();
        assert!(matches!(
            run_stress(&catalog, request),
            Err(SimError::MaterialNotFound(_))
        ));

        let request: RunRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            run_to_rupture(&catalog, request),
            Err(SimError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_run_request() {
        let catalog = MaterialCatalog::builtin();
        let request: RunRequest = serde_json::from_str(r#"{"material_id": "abs"}"#).unwrap();
        let result = run_to_rupture(&catalog, request).unwrap();
        assert!(result.report.ruptured);
        assert!(result.conclusion.contains("ABS Plastic"));
        assert!(result.behavior.contains("brittle"));
    }
}
