use crate::{llm_client::LanguageModel, services::assistant::AssistantService};
use actix_web::{
    HttpRequest, HttpResponse, Responder,
    error::{InternalError, JsonPayloadError},
    web,
};
use chrono::Utc;
use log::{debug, error};
use roi_dashboard_core::{CHAT_ENDPOINT, ChatRequest};
use serde::Serialize;
use serde_json::json;
use serde_valid::Validate;

const HEALTH_ENDPOINT: &str = "/api/health";

const AVAILABLE_ENDPOINTS: [&str; 3] = ["GET /", "GET /api/health", "POST /api/chat"];

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<&'static str>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            available_endpoints: None,
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody::new("Invalid request", err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

#[derive(Clone)]
pub struct Api<Model>
where
    Model: LanguageModel,
{
    pub assistant: AssistantService<Model>,
}

impl<Model> Api<Model>
where
    Model: LanguageModel + 'static,
{
    pub fn new(model: Model) -> Self {
        Api {
            assistant: AssistantService::new(model),
        }
    }

    /// Register all routes, the JSON error handler and the 404 fallback
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/", web::get().to(Self::index))
            .route(HEALTH_ENDPOINT, web::get().to(Self::healthcheck))
            .route(CHAT_ENDPOINT, web::post().to(Self::chat))
            .default_service(web::route().to(Self::not_found));
    }

    pub async fn index() -> impl Responder {
        debug!("index() called");

        HttpResponse::Ok().json(json!({
            "service": "ROI Dashboard Assistant",
            "version": env!("CARGO_PKG_VERSION"),
            "revision": env!("GIT_SHORT_REV"),
            "status": "running",
            "timestamp": Utc::now().to_rfc3339(),
            "endpoints": {
                "chat": format!("POST {CHAT_ENDPOINT}"),
                "health": format!("GET {HEALTH_ENDPOINT}"),
            },
        }))
    }

    pub async fn healthcheck() -> impl Responder {
        HttpResponse::Ok().json(json!({ "status": "ok" }))
    }

    pub async fn chat(body: web::Json<ChatRequest>, api: web::Data<Self>) -> impl Responder {
        let request = body.into_inner();
        debug!("chat() called: {:?}", request.message);

        if let Err(e) = request.validate() {
            return HttpResponse::BadRequest().json(ErrorBody::new("Invalid request", e.to_string()));
        }

        match api.assistant.respond(&request).await {
            Ok(reply) => HttpResponse::Ok().json(reply),
            Err(e) => {
                error!("chat failed: {e:#}");
                HttpResponse::InternalServerError().json(ErrorBody::new(
                    "Unexpected error",
                    "An unexpected error occurred. Please try again.",
                ))
            }
        }
    }

    pub async fn not_found(req: HttpRequest) -> impl Responder {
        debug!("not_found() called: {} {}", req.method(), req.path());

        HttpResponse::NotFound().json(ErrorBody {
            available_endpoints: Some(AVAILABLE_ENDPOINTS.to_vec()),
            ..ErrorBody::new("Not found", "The requested endpoint does not exist")
        })
    }
}
