//! Thin client for the IronCoach REST API.
//!
//! Every call goes through [`request`], which attaches the bearer token
//! of the stored session and folds transport, HTTP and decoding problems
//! into [`ApiError`]. A 401 on an authenticated call drops the stored
//! session before reporting [`ApiError::Unauthorized`]; the pages react
//! by routing back to the login view.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::session;
use crate::types::{
    AuthSession, Client, Exercise, PlanDetail, PlanPayload, PlanSummary, SessionSummary,
    TodayWorkout,
};

const API_URL: &str = "https://api.ironcoach.app/v1";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,
    #[error("Could not reach the server. Check your connection and try again.")]
    Network,
    #[error("{0}")]
    Rejected(String),
    #[error("The server rejected the request ({0}).")]
    Http(u16),
    #[error("Unexpected response from the server.")]
    Decode,
}

/// Error body the API uses for 4xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Auth {
    Bearer,
    None,
}

fn build_headers(auth: Auth) -> Result<Headers, ApiError> {
    let headers = Headers::new().map_err(|_| ApiError::Network)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|_| ApiError::Network)?;
    if auth == Auth::Bearer {
        if let Some(session) = session::load_auth_session() {
            headers
                .set("Authorization", &format!("Bearer {}", session.access_token))
                .map_err(|_| ApiError::Network)?;
        }
    }
    Ok(headers)
}

async fn request(
    method: &str,
    path: &str,
    body: Option<String>,
    auth: Auth,
) -> Result<Response, ApiError> {
    let window = web_sys::window().ok_or(ApiError::Network)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(ref b) = body {
        opts.set_body(&JsValue::from_str(b));
    }
    opts.set_headers(&JsValue::from(&build_headers(auth)?));

    let url = format!("{}{}", API_URL, path);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(|_| ApiError::Network)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ApiError::Network)?;
    let resp: Response = resp_value.dyn_into().map_err(|_| ApiError::Network)?;

    if resp.status() == 401 && auth == Auth::Bearer {
        session::clear_auth_session();
        return Err(ApiError::Unauthorized);
    }

    if !resp.ok() {
        let status = resp.status();
        log::warn!("{} {} failed with {}", method, path, status);
        if let Some(message) = error_message(&resp).await {
            return Err(ApiError::Rejected(message));
        }
        return Err(ApiError::Http(status));
    }

    Ok(resp)
}

async fn error_message(resp: &Response) -> Option<String> {
    let json = JsFuture::from(resp.json().ok()?).await.ok()?;
    let body: ErrorBody = serde_wasm_bindgen::from_value(json).ok()?;
    body.message.or(body.error)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let json = JsFuture::from(resp.json().map_err(|_| ApiError::Decode)?)
        .await
        .map_err(|_| ApiError::Decode)?;
    serde_wasm_bindgen::from_value(json).map_err(|_| ApiError::Decode)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    decode(request("GET", path, None, Auth::Bearer).await?).await
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    method: &str,
    path: &str,
    body: &B,
    auth: Auth,
) -> Result<T, ApiError> {
    let body = serde_json::to_string(body).map_err(|_| ApiError::Decode)?;
    decode(request(method, path, Some(body), auth).await?).await
}

/// POST that only cares about success.
async fn send_command<B: Serialize>(method: &str, path: &str, body: &B) -> Result<(), ApiError> {
    let body = serde_json::to_string(body).map_err(|_| ApiError::Decode)?;
    request(method, path, Some(body), Auth::Bearer).await?;
    Ok(())
}

// ============ AUTH ============

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

pub async fn sign_in(email: &str, password: &str) -> Result<AuthSession, ApiError> {
    send_json("POST", "/auth/login", &Credentials { email, password }, Auth::None).await
}

pub async fn sign_up(registration: &Registration) -> Result<AuthSession, ApiError> {
    send_json("POST", "/auth/register", registration, Auth::None).await
}

// ============ TRAINER DATA ============

pub async fn fetch_clients() -> Result<Vec<Client>, ApiError> {
    get_json("/clients").await
}

pub async fn fetch_exercises() -> Result<Vec<Exercise>, ApiError> {
    get_json("/exercises").await
}

#[derive(Serialize)]
pub struct NewExercise {
    pub name: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
}

pub async fn create_exercise(exercise: &NewExercise) -> Result<Exercise, ApiError> {
    send_json("POST", "/exercises", exercise, Auth::Bearer).await
}

// ============ PLANS ============

pub async fn fetch_plans() -> Result<Vec<PlanSummary>, ApiError> {
    get_json("/plans").await
}

pub async fn fetch_plan(id: u32) -> Result<PlanDetail, ApiError> {
    get_json(&format!("/plans/{}", id)).await
}

/// Returns the persisted plan, including the id the assignment calls
/// need.
pub async fn create_plan(payload: &PlanPayload) -> Result<PlanDetail, ApiError> {
    send_json("POST", "/plans", payload, Auth::Bearer).await
}

pub async fn update_plan(id: u32, payload: &PlanPayload) -> Result<PlanDetail, ApiError> {
    send_json("PUT", &format!("/plans/{}", id), payload, Auth::Bearer).await
}

pub async fn delete_plan(id: u32) -> Result<(), ApiError> {
    request("DELETE", &format!("/plans/{}", id), None, Auth::Bearer).await?;
    Ok(())
}

#[derive(Serialize)]
struct ClientIds<'a> {
    client_ids: &'a [u32],
}

pub async fn assign_plan(id: u32, client_ids: &[u32]) -> Result<(), ApiError> {
    send_command("POST", &format!("/plans/{}/assign", id), &ClientIds { client_ids }).await
}

pub async fn unassign_plan(id: u32, client_ids: &[u32]) -> Result<(), ApiError> {
    send_command("POST", &format!("/plans/{}/unassign", id), &ClientIds { client_ids }).await
}

// ============ WORKOUTS ============

pub async fn fetch_today() -> Result<TodayWorkout, ApiError> {
    get_json("/workouts/today").await
}

#[derive(Serialize)]
struct Completion {
    completed: bool,
}

pub async fn complete_exercise(log_id: u32, completed: bool) -> Result<(), ApiError> {
    send_command("POST", &format!("/logs/{}/complete", log_id), &Completion { completed }).await
}

#[derive(Serialize)]
struct Difficulty<'a> {
    rating: u8,
    comment: Option<&'a str>,
}

pub async fn report_difficulty(
    log_id: u32,
    rating: u8,
    comment: Option<&str>,
) -> Result<(), ApiError> {
    send_command(
        "POST",
        &format!("/logs/{}/difficulty", log_id),
        &Difficulty { rating, comment },
    )
    .await
}

pub async fn fetch_day_summary() -> Result<SessionSummary, ApiError> {
    get_json("/workouts/today/summary").await
}
