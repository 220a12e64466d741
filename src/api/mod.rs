mod catalog;
mod cli;
mod error;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

use crate::core::{
    CalcResult, EmiInputs, EmiResult, IncomeTaxInputs, IncomeTaxResult, LumpsumInputs,
    LumpsumResult, SipInputs, SipResult, StepUpEmiInputs, StepUpEmiResult, StepUpSipInputs,
    StepUpSwpInputs, SwpInputs, SwpResult, calculate_emi, calculate_income_tax,
    calculate_lumpsum, calculate_sip, calculate_step_up_emi, calculate_step_up_sip,
    calculate_step_up_swp, calculate_swp,
};

pub use catalog::{CALCULATORS, CalculatorInfo, InputBounds};
pub use cli::{Calculation, Cli, CliError, Command, run_cli};
pub use error::{ApiError, ApiResult};

/// One calculator's input record as accepted over HTTP. Query strings and
/// JSON bodies decode straight into it, layered over its defaults.
trait Calculator: DeserializeOwned + fmt::Debug + Send + 'static {
    const SLUG: &'static str;
    type Output: Serialize;

    fn calculate(&self) -> CalcResult<Self::Output>;
}

impl Calculator for SipInputs {
    const SLUG: &'static str = "sip";
    type Output = SipResult;

    fn calculate(&self) -> CalcResult<SipResult> {
        calculate_sip(self)
    }
}

impl Calculator for StepUpSipInputs {
    const SLUG: &'static str = "step-up-sip";
    type Output = SipResult;

    fn calculate(&self) -> CalcResult<SipResult> {
        calculate_step_up_sip(self)
    }
}

impl Calculator for LumpsumInputs {
    const SLUG: &'static str = "lumpsum";
    type Output = LumpsumResult;

    fn calculate(&self) -> CalcResult<LumpsumResult> {
        calculate_lumpsum(self)
    }
}

impl Calculator for EmiInputs {
    const SLUG: &'static str = "emi";
    type Output = EmiResult;

    fn calculate(&self) -> CalcResult<EmiResult> {
        calculate_emi(self)
    }
}

impl Calculator for StepUpEmiInputs {
    const SLUG: &'static str = "step-up-emi";
    type Output = StepUpEmiResult;

    fn calculate(&self) -> CalcResult<StepUpEmiResult> {
        calculate_step_up_emi(self)
    }
}

impl Calculator for SwpInputs {
    const SLUG: &'static str = "swp";
    type Output = SwpResult;

    fn calculate(&self) -> CalcResult<SwpResult> {
        calculate_swp(self)
    }
}

impl Calculator for StepUpSwpInputs {
    const SLUG: &'static str = "step-up-swp";
    type Output = SwpResult;

    fn calculate(&self) -> CalcResult<SwpResult> {
        calculate_step_up_swp(self)
    }
}

impl Calculator for IncomeTaxInputs {
    const SLUG: &'static str = "income-tax";
    type Output = IncomeTaxResult;

    fn calculate(&self) -> CalcResult<IncomeTaxResult> {
        calculate_income_tax(self)
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/calculators", get(catalog_handler))
        .route(
            "/api/sip",
            get(calculate_get::<SipInputs>).post(calculate_post::<SipInputs>),
        )
        .route(
            "/api/step-up-sip",
            get(calculate_get::<StepUpSipInputs>).post(calculate_post::<StepUpSipInputs>),
        )
        .route(
            "/api/lumpsum",
            get(calculate_get::<LumpsumInputs>).post(calculate_post::<LumpsumInputs>),
        )
        .route(
            "/api/emi",
            get(calculate_get::<EmiInputs>).post(calculate_post::<EmiInputs>),
        )
        .route(
            "/api/step-up-emi",
            get(calculate_get::<StepUpEmiInputs>).post(calculate_post::<StepUpEmiInputs>),
        )
        .route(
            "/api/swp",
            get(calculate_get::<SwpInputs>).post(calculate_post::<SwpInputs>),
        )
        .route(
            "/api/step-up-swp",
            get(calculate_get::<StepUpSwpInputs>).post(calculate_post::<StepUpSwpInputs>),
        )
        .route(
            "/api/income-tax",
            get(calculate_get::<IncomeTaxInputs>).post(calculate_post::<IncomeTaxInputs>),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(bind: IpAddr, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from((bind, port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "fincalc HTTP API listening");

    axum::serve(listener, router()).await
}

async fn catalog_handler() -> Response {
    json_response(StatusCode::OK, json!({ "calculators": CALCULATORS }))
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn calculate_get<C: Calculator>(inputs: Result<Query<C>, QueryRejection>) -> Response {
    match inputs {
        Ok(Query(inputs)) => calculate_response(&inputs),
        Err(rejection) => rejected::<C>(ApiError::Payload(rejection.body_text())),
    }
}

async fn calculate_post<C: Calculator>(inputs: Result<Json<C>, JsonRejection>) -> Response {
    match inputs {
        Ok(Json(inputs)) => calculate_response(&inputs),
        Err(rejection) => rejected::<C>(ApiError::Payload(rejection.body_text())),
    }
}

fn calculate_response<C: Calculator>(inputs: &C) -> Response {
    match run_calculator(inputs) {
        Ok(output) => json_response(StatusCode::OK, output),
        Err(err) => rejected::<C>(err),
    }
}

fn run_calculator<C: Calculator>(inputs: &C) -> ApiResult<C::Output> {
    let output = inputs.calculate()?;
    tracing::info!(calculator = C::SLUG, ?inputs, "calculated");
    Ok(output)
}

fn rejected<C: Calculator>(err: ApiError) -> Response {
    tracing::warn!(calculator = C::SLUG, error = %err, "rejected request");
    err.into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
