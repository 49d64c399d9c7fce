//! HTTP Data Service
//!
//! `reqwest`-backed implementation of the REST contract. Works natively and
//! on wasm32, where reqwest goes through the browser's `fetch`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::traits::{ActionService, DataService, ListQuery, SearchableService};
use crate::config::ClientConfig;
use crate::domain::{Page, Record, RecordId};
use crate::error::{Error, Result};

/// Characters left as-is in an id path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

pub struct HttpDataService {
    client: Client,
    base: Url,
}

impl HttpDataService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base = Url::parse(&config.normalized_base()).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self { client: Client::new(), base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub(crate) fn collection_url(&self, collection: &str) -> Result<Url> {
        self.join(&format!("{}/", collection))
    }

    pub(crate) fn record_url(&self, collection: &str, id: &RecordId) -> Result<Url> {
        let segment = utf8_percent_encode(&id.to_string(), PATH_SEGMENT).to_string();
        self.join(&format!("{}/{}/", collection, segment))
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| Error::Config(format!("bad path {:?}: {}", path, e)))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder, what: &str) -> Result<T> {
        let response = check(request.send().await?, what).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Map non-2xx responses onto the error taxonomy
async fn check(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(Error::NotFound(what.to_string()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Status { status: status.as_u16(), body });
    }
    Ok(response)
}

#[async_trait(?Send)]
impl DataService for HttpDataService {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Page<Record>> {
        let url = self.collection_url(collection)?;
        log::debug!("[http] GET {} {:?}", url, query.to_pairs());
        let request = self.client.get(url).query(&query.to_pairs());
        self.send_json(request, collection).await
    }

    async fn retrieve(&self, collection: &str, id: &RecordId) -> Result<Record> {
        let url = self.record_url(collection, id)?;
        log::debug!("[http] GET {}", url);
        self.send_json(self.client.get(url), &format!("{}/{}", collection, id)).await
    }

    async fn create(&self, collection: &str, body: &Value) -> Result<Record> {
        let url = self.collection_url(collection)?;
        log::debug!("[http] POST {}", url);
        self.send_json(self.client.post(url).json(body), collection).await
    }

    async fn update(&self, collection: &str, id: &RecordId, body: &Value) -> Result<Record> {
        let url = self.record_url(collection, id)?;
        log::debug!("[http] PUT {}", url);
        self.send_json(self.client.put(url).json(body), &format!("{}/{}", collection, id)).await
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<()> {
        let url = self.record_url(collection, id)?;
        log::debug!("[http] DELETE {}", url);
        check(self.client.delete(url).send().await?, &format!("{}/{}", collection, id)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl SearchableService for HttpDataService {}

#[async_trait(?Send)]
impl ActionService for HttpDataService {
    async fn action(&self, collection: &str, action: &str) -> Result<Vec<Record>> {
        let url = self.join(&format!("{}/{}/", collection, action))?;
        log::debug!("[http] GET {}", url);
        self.send_json(self.client.get(url), &format!("{}/{}", collection, action)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> HttpDataService {
        HttpDataService::new(&ClientConfig::new("https://records.example.org/api")).unwrap()
    }

    #[test]
    fn test_collection_url() {
        let url = service().collection_url("fieldtrials").unwrap();
        assert_eq!(url.as_str(), "https://records.example.org/api/fieldtrials/");
    }

    #[test]
    fn test_record_url_encodes_id() {
        let svc = service();
        assert_eq!(
            svc.record_url("potato-varieties", &RecordId::Int(42)).unwrap().as_str(),
            "https://records.example.org/api/potato-varieties/42/"
        );
        assert_eq!(
            svc.record_url("weatherdata", &RecordId::Str("a b/c".into())).unwrap().as_str(),
            "https://records.example.org/api/weatherdata/a%20b%2Fc/"
        );
    }

    #[test]
    fn test_rejects_relative_base() {
        assert!(matches!(HttpDataService::new(&ClientConfig::new("/api/")), Err(Error::Config(_))));
    }
}
