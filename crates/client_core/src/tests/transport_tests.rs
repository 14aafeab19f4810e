use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{extract::Query, extract::State, http::StatusCode, routing::get, Json, Router};
use tokio::{net::TcpListener, sync::Mutex};

const SCRAMBLED: &str = "OBBOBRBYOGYYBOOBOGOBWBWYWWGBGRRRWOORYWYRYRYGWRGWGGWRYG";
const SOLVED: &str = "RRRRRRRRRBBBBBBBBBWWWWWWWWWGGGGGGGGGYYYYYYYYYOOOOOOOOO";

#[derive(Clone, Default)]
struct SolverState {
    seen_cubes: Arc<Mutex<Vec<String>>>,
}

async fn handle_solve(
    State(state): State<SolverState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<SolveResponse>) {
    let cube = params.get("cube").cloned().unwrap_or_default();
    state.seen_cubes.lock().await.push(cube.clone());

    if cube == SOLVED {
        return (
            StatusCode::OK,
            Json(SolveResponse::failed("Cube is already solved.")),
        );
    }

    (
        StatusCode::OK,
        Json(SolveResponse::solved(
            SOLVED,
            vec!["U".to_string(), "R'".to_string()],
            12.5,
        )),
    )
}

async fn handle_unprocessable() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": "Piece for a color is missing." })),
    )
}

async fn handle_html() -> &'static str {
    "<html>not a solver</html>"
}

async fn spawn_solver_server() -> anyhow::Result<(String, SolverState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = SolverState::default();
    let app = Router::new()
        .route("/", get(handle_solve))
        .route("/unprocessable", get(handle_unprocessable))
        .route("/html", get(handle_html))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn cube(raw: &str) -> CubeState {
    CubeState::parse(raw).expect("valid cube")
}

#[tokio::test]
async fn sends_cube_as_query_parameter_and_parses_success() {
    let (server_url, state) = spawn_solver_server().await.expect("spawn server");
    let transport = HttpSolverTransport::new(&format!("{server_url}/")).expect("endpoint");

    let response = transport.solve(&cube(SCRAMBLED)).await.expect("response");

    assert_eq!(
        response,
        SolveResponse::solved(SOLVED, vec!["U".to_string(), "R'".to_string()], 12.5)
    );
    assert_eq!(*state.seen_cubes.lock().await, vec![SCRAMBLED.to_string()]);
}

#[tokio::test]
async fn application_error_is_returned_in_body() {
    let (server_url, _state) = spawn_solver_server().await.expect("spawn server");
    let transport = HttpSolverTransport::new(&server_url).expect("endpoint");

    let response = transport.solve(&cube(SOLVED)).await.expect("response");

    assert_eq!(response.error.as_deref(), Some("Cube is already solved."));
    assert_eq!(response.cube, None);
}

#[tokio::test]
async fn non_success_status_still_reads_body() {
    let (server_url, _state) = spawn_solver_server().await.expect("spawn server");
    let transport =
        HttpSolverTransport::new(&format!("{server_url}/unprocessable")).expect("endpoint");

    let response = transport.solve(&cube(SCRAMBLED)).await.expect("response");

    assert_eq!(
        response.error.as_deref(),
        Some("Piece for a color is missing.")
    );
}

#[tokio::test]
async fn non_json_body_is_transport_error() {
    let (server_url, _state) = spawn_solver_server().await.expect("spawn server");
    let transport = HttpSolverTransport::new(&format!("{server_url}/html")).expect("endpoint");

    let err = transport
        .solve(&cube(SCRAMBLED))
        .await
        .expect_err("must fail");

    assert!(matches!(err, TransportError::InvalidBody(_)), "{err}");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport = HttpSolverTransport::new(&format!("http://{addr}/")).expect("endpoint");
    let err = transport
        .solve(&cube(SCRAMBLED))
        .await
        .expect_err("must fail");

    assert!(matches!(err, TransportError::Request(_)), "{err}");
}

#[test]
fn rejects_unparseable_endpoint() {
    let err = HttpSolverTransport::new("not a url").err().expect("must fail");
    assert!(matches!(err, TransportError::InvalidEndpoint(_)));
}
