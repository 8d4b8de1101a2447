pub mod transport;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{self, TOKEN_KEY, USER_KEY};
use crate::error::{ApiError, ApiResult};
use crate::filters::ExpenseFilters;
use crate::models::{
    Category, Expense, ExpenseEnvelope, ExtractedData, LoginResponse, PaginatedExpenses,
    ParseInvoiceResponse, SaveInvoiceRequest, UpdateExpenseRequest, User,
};
use crate::storage::{self, KeyValueStore, LocalStorage};
use crate::upload::SelectedFile;

pub use transport::{ApiRequest, GlooTransport, HttpMethod, RawResponse, RequestBody, Transport};

const SERVER_ERROR: &str = "Could not reach the server";
const UPLOAD_ERROR: &str = "Could not upload the file";
const NETWORK_ERROR: &str = "Network error";

/// Backend client: base URL, transport and the store holding the bearer token.
#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    storage: S,
}

pub type BrowserClient = ApiClient<GlooTransport, LocalStorage>;

/// Client wired to `fetch` and `localStorage` at the configured base URL.
pub fn client() -> BrowserClient {
    ApiClient::new(config::api_base_url(), GlooTransport, LocalStorage)
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, storage: S) -> Self {
        Self { base_url: base_url.into(), transport, storage }
    }

    fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn headers(&self, json_body: bool) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if json_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = self.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        headers
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> ApiResult<R> {
        let request = ApiRequest {
            method,
            url: self.url(endpoint),
            query,
            headers: self.headers(true),
            body: body.map(RequestBody::Json).unwrap_or(RequestBody::Empty),
        };
        self.dispatch(request, SERVER_ERROR).await
    }

    async fn request_with_file<R: DeserializeOwned>(&self, endpoint: &str, file: &SelectedFile) -> ApiResult<R> {
        let request = ApiRequest {
            method: HttpMethod::Post,
            url: self.url(endpoint),
            query: Vec::new(),
            headers: self.headers(false),
            body: RequestBody::File(file.clone()),
        };
        self.dispatch(request, UPLOAD_ERROR).await
    }

    async fn dispatch<R: DeserializeOwned>(&self, request: ApiRequest, fallback: &str) -> ApiResult<R> {
        log::debug!("{} {}", request.method.as_str(), request.url);
        let (method, url) = (request.method, request.url.clone());
        let result = match self.transport.send(request).await {
            Ok(raw) => normalize(raw, fallback),
            Err(message) if message.trim().is_empty() => Err(ApiError::Network(NETWORK_ERROR.to_string())),
            Err(message) => Err(ApiError::Network(message)),
        };
        if let Err(err) = &result {
            log::warn!("{} {} failed: {}", method.as_str(), url, err);
        }
        result
    }

    pub async fn register(&self, email: &str, password: &str) -> ApiResult<User> {
        self.request(
            HttpMethod::Post,
            "/auth/register",
            Vec::new(),
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Persists token and user on success.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let response: LoginResponse = self
            .request(
                HttpMethod::Post,
                "/auth/login",
                Vec::new(),
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        self.storage.set(TOKEN_KEY, &response.token);
        storage::save_json(&self.storage, USER_KEY, &response.user);
        Ok(response)
    }

    pub fn logout(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    pub fn current_user(&self) -> Option<User> {
        storage::load_json(&self.storage, USER_KEY)
    }

    pub async fn parse_invoice(&self, file: &SelectedFile) -> ApiResult<ExtractedData> {
        let response: ParseInvoiceResponse = self.request_with_file("/invoices/parse", file).await?;
        Ok(response.extracted)
    }

    pub async fn save_invoice(&self, invoice: &SaveInvoiceRequest) -> ApiResult<Expense> {
        let envelope: ExpenseEnvelope = self
            .request(HttpMethod::Post, "/invoices/save", Vec::new(), Some(to_body(invoice)?))
            .await?;
        Ok(envelope.expense)
    }

    pub async fn get_expenses(&self, filters: &ExpenseFilters) -> ApiResult<PaginatedExpenses> {
        self.request(HttpMethod::Get, "/expenses", filters.query_pairs(), None).await
    }

    pub async fn update_expense_category(&self, expense_id: &str, category: Category) -> ApiResult<Expense> {
        let envelope: ExpenseEnvelope = self
            .request(
                HttpMethod::Patch,
                &format!("/expenses/{}/category", expense_id),
                Vec::new(),
                Some(json!({ "category": category })),
            )
            .await?;
        Ok(envelope.expense)
    }

    pub async fn update_expense(&self, expense_id: &str, update: &UpdateExpenseRequest) -> ApiResult<Expense> {
        let envelope: ExpenseEnvelope = self
            .request(
                HttpMethod::Patch,
                &format!("/expenses/{}", expense_id),
                Vec::new(),
                Some(to_body(update)?),
            )
            .await?;
        Ok(envelope.expense)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> ApiResult<()> {
        self.request(HttpMethod::Delete, &format!("/expenses/{}", expense_id), Vec::new(), None)
            .await
    }
}

fn to_body<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Maps a raw response onto the uniform result: backend `error` message on non-2xx,
/// otherwise the payload, unwrapped from a `data` envelope when present.
fn normalize<R: DeserializeOwned>(raw: RawResponse, fallback: &str) -> ApiResult<R> {
    let parsed = if raw.body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&raw.body)
    };

    if !raw.is_success() {
        let message = parsed
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::Backend { status: raw.status, message });
    }

    let mut body = parsed.map_err(|e| ApiError::Decode(e.to_string()))?;
    let has_envelope = body.get("data").map_or(false, |data| !data.is_null());
    let payload = if has_envelope { body["data"].take() } else { body };
    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}
