//! HTTP gateway shared by every resource screen.
//!
//! One fire-once request per call: no retries, no timeouts, no caching.
//! Plain resources are sent as JSON, asset-bearing ones as `FormData`. The
//! bearer token is attached to every request, and any 401 ends the session
//! no matter which resource triggered it.

use gloo_net::http::{Request, RequestBuilder, Response};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use common::api::{ApiErrorBody, ApiFailure, Endpoint, ListQuery};
use common::config::AppConfig;
use common::model::pagination::ListResponse;
use common::model::record::Record;
use common::payload::Payload;

use super::session;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiGateway {
    base_url: String,
}

impl ApiGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url().to_string(),
        }
    }

    pub async fn list(
        &self,
        endpoint: Endpoint,
        query: &ListQuery,
    ) -> Result<ListResponse, ApiFailure> {
        let request = authorized(Request::get(&endpoint.collection_url(&self.base_url)))
            .query(query.params())
            .build()
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        let response = dispatch(request).await?;
        response
            .json::<ListResponse>()
            .await
            .map_err(|e| ApiFailure::Decode(e.to_string()))
    }

    pub async fn get_by_id(&self, endpoint: Endpoint, id: i64) -> Result<Record, ApiFailure> {
        let request = authorized(Request::get(&endpoint.item_url(&self.base_url, id)))
            .build()
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        let response = dispatch(request).await?;
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiFailure::Decode(e.to_string()))?;
        Record::from_response(value).map_err(|e| ApiFailure::Decode(e.to_string()))
    }

    pub async fn create(&self, endpoint: Endpoint, payload: Payload<File>) -> Result<(), ApiFailure> {
        let builder = authorized(Request::post(&endpoint.collection_url(&self.base_url)));
        dispatch(with_payload(builder, payload)?).await.map(|_| ())
    }

    pub async fn update(
        &self,
        endpoint: Endpoint,
        id: i64,
        payload: Payload<File>,
    ) -> Result<(), ApiFailure> {
        let builder = authorized(Request::put(&endpoint.item_url(&self.base_url, id)));
        dispatch(with_payload(builder, payload)?).await.map(|_| ())
    }

    pub async fn delete(&self, endpoint: Endpoint, id: i64) -> Result<(), ApiFailure> {
        let request = authorized(Request::delete(&endpoint.item_url(&self.base_url, id)))
            .build()
            .map_err(|e| ApiFailure::Network(e.to_string()))?;
        dispatch(request).await.map(|_| ())
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

fn with_payload(builder: RequestBuilder, payload: Payload<File>) -> Result<Request, ApiFailure> {
    match payload {
        Payload::Json(values) => builder
            .json(&values)
            .map_err(|e| ApiFailure::Network(e.to_string())),
        Payload::Multipart(form) => {
            let data = FormData::new().map_err(js_failure)?;
            for (name, value) in &form.fields {
                data.append_with_str(name, value).map_err(js_failure)?;
            }
            if let Some((name, file)) = &form.file {
                data.append_with_blob_and_filename(name, file, &file.name())
                    .map_err(js_failure)?;
            }
            builder
                .body(data)
                .map_err(|e| ApiFailure::Network(e.to_string()))
        }
    }
}

async fn dispatch(request: Request) -> Result<Response, ApiFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    let status = response.status();
    if status == 401 {
        session::end_session();
        return Err(ApiFailure::Unauthorized);
    }
    if !response.ok() {
        let body = response.json::<ApiErrorBody>().await.ok();
        return Err(ApiFailure::Http { status, body });
    }
    Ok(response)
}

fn js_failure(err: JsValue) -> ApiFailure {
    ApiFailure::Network(format!("{err:?}"))
}
