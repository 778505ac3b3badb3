//! Rows of the hosted backend holding the schedule strings
//!
//! The backend exposes its tables through a REST API (`/rest/v1/<table>`)
//! filtered with query parameters such as `id=eq.<id>`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::BackendConfig;
use crate::error::{Error, Result};

pub use self::models::{Academy, Class};

pub mod models;

const ACADEMY_COLUMNS: &str = "id,name,schedule";
const CLASS_COLUMNS: &str = "id,academy_id,name,schedule,teacher";

/// Query of one row by id
pub fn by_id_query(columns: &str, id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", columns.to_owned()),
        ("id", format!("eq.{id}")),
        ("limit", "1".to_owned()),
    ]
}

/// Query of the classes of an academy, by name
pub fn academy_classes_query(academy_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", CLASS_COLUMNS.to_owned()),
        ("academy_id", format!("eq.{academy_id}")),
        ("order", "name.asc".to_owned()),
    ]
}

/// REST endpoint of a table
pub fn table_url(base: &str, table: &str) -> String {
    format!("{}/rest/v1/{table}", base.trim_end_matches('/'))
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Client sending the API key with every request
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let Some(base_url) = config.url.clone() else {
            return Err(Error::Config("backend.url is not set".into()));
        };
        let Some(key) = config.api_key.as_deref() else {
            return Err(Error::Config("backend.api_key is not set".into()));
        };

        let invalid_key = |_| Error::Config("backend.api_key isn't a valid header".into());
        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid_key)?,
        );

        // Use custom User-Agent
        let client = Client::builder()
            .user_agent(format!("hagwon-timetable/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    async fn rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>> {
        let url = table_url(&self.base_url, table);
        debug!(%url, ?query, "querying backend");

        let response = self.client.get(&url).query(query).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    pub async fn fetch_class(&self, id: &str) -> Result<Class> {
        self.rows("classes", &by_id_query(CLASS_COLUMNS, id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("class {id}")))
    }

    pub async fn fetch_academy(&self, id: &str) -> Result<Academy> {
        self.rows("academies", &by_id_query(ACADEMY_COLUMNS, id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("academy {id}")))
    }

    /// Every class of an academy, ordered by name
    pub async fn fetch_academy_classes(&self, academy_id: &str) -> Result<Vec<Class>> {
        let classes: Vec<Class> = self
            .rows("classes", &academy_classes_query(academy_id))
            .await?;
        info!(academy_id, count = classes.len(), "classes fetched");

        Ok(classes)
    }
}

/// Turn an error status into an error, keeping the backend's message
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Backend {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<models::ApiError>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_schedule_multiple;

    #[test]
    fn urls() {
        assert_eq!(
            table_url("https://abc.supabase.co/", "classes"),
            "https://abc.supabase.co/rest/v1/classes"
        );
    }

    #[test]
    fn queries() {
        let query = by_id_query(CLASS_COLUMNS, "42");
        assert!(query.contains(&("id", "eq.42".to_string())));
        assert!(query.contains(&("limit", "1".to_string())));

        let query = academy_classes_query("7");
        assert!(query.contains(&("academy_id", "eq.7".to_string())));
        assert!(query.contains(&("order", "name.asc".to_string())));
    }

    #[test]
    fn class_rows() {
        let body = r#"[
            {"id": "c1", "academy_id": "a1", "name": "고1 수학", "schedule": "월/수 18:00~20:00", "teacher": "김선생", "price": 300000},
            {"id": "c2", "academy_id": "a1", "name": "영어", "schedule": null}
        ]"#;

        let classes: Vec<Class> = serde_json::from_str(body).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].teacher.as_deref(), Some("김선생"));
        assert_eq!(
            parse_schedule_multiple(classes[0].schedule.as_deref()).len(),
            2
        );
        assert_eq!(classes[1].schedule, None);
        assert!(parse_schedule_multiple(classes[1].schedule.as_deref()).is_empty());
    }

    #[test]
    fn academy_row_without_schedule() {
        let academy: Academy = serde_json::from_str(r#"{"id": "a1", "name": "명문학원"}"#).unwrap();
        assert_eq!(academy.schedule, None);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            error_message(r#"{"code": "PGRST301", "message": "JWT expired"}"#),
            "JWT expired"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn client_needs_url_and_key() {
        let config = BackendConfig::default();
        assert!(matches!(BackendClient::new(&config), Err(Error::Config(_))));

        let config = BackendConfig {
            url: Some("https://abc.supabase.co".into()),
            api_key: Some("anon".into()),
            ..BackendConfig::default()
        };
        assert!(BackendClient::new(&config).is_ok());
    }
}
