use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use web_sys::FormData;

use crate::upload::SelectedFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Sent as `multipart/form-data` under the `file` field.
    File(SelectedFile),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

#[cfg(test)]
impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One attempt per call; an `Err` means the request never produced a response.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String>;
}

/// `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlooTransport;

impl GlooTransport {
    fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
        let mut builder = Self::builder(request.method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        }
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let response = match request.body {
            RequestBody::Empty => builder.send().await,
            RequestBody::Json(value) => builder.json(&value).map_err(|e| e.to_string())?.send().await,
            RequestBody::File(file) => {
                let raw = file
                    .raw
                    .ok_or_else(|| format!("{} is no longer available for upload", file.name))?;
                let form = FormData::new().map_err(|e| format!("{:?}", e))?;
                form.append_with_blob("file", &raw).map_err(|e| format!("{:?}", e))?;
                builder.body(form).map_err(|e| e.to_string())?.send().await
            }
        }
        .map_err(|e| e.to_string())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use async_trait::async_trait;

    use super::{ApiRequest, HttpMethod, RawResponse, Transport};

    /// Replays scripted responses in order and records every request it sees.
    #[derive(Clone, Default)]
    pub struct RecordingTransport {
        requests: Rc<RefCell<Vec<ApiRequest>>>,
        responses: Rc<RefCell<VecDeque<Result<RawResponse, String>>>>,
    }

    impl RecordingTransport {
        pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(RawResponse { status, body: body.to_string() }));
            self
        }

        pub fn respond_empty(&self, status: u16) -> &Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(RawResponse { status, body: String::new() }));
            self
        }

        pub fn fail(&self, message: &str) -> &Self {
            self.responses.borrow_mut().push_back(Err(message.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }

        pub fn methods(&self) -> Vec<HttpMethod> {
            self.requests.borrow().iter().map(|r| r.method).collect()
        }
    }

    #[async_trait(?Send)]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        }
    }
}
