//! Remote task store over a PostgREST-style API (Supabase-compatible).
//!
//! One relational table of task rows; filters are query parameters
//! (`id=eq.N`, `owner_id=eq.UUID`), inserts return the created row via
//! `Prefer: return=representation`. Updates and deletes whose filter
//! matches zero rows succeed with an empty result, which is exactly the
//! semantics the session layer expects.

use async_trait::async_trait;

use taskchain_core::api::TaskStore;
use taskchain_core::config::BackendConfig;
use taskchain_core::error::StoreError;
use taskchain_core::task::{NewTask, OwnerId, TaskId, TaskPatch, TaskRecord};

use crate::http::{ensure_success, parse_json, StoreHttpError};

const SELECT_COLUMNS: &str = "id,title,status,prev_id,next_id,owner_id,created_at";

#[derive(Clone)]
pub struct RestTaskStore {
    http: reqwest::Client,
    anon_key: String,
    // Pre-built table endpoint; every operation derives its URL from it.
    url_rows: String,
}

impl RestTaskStore {
    pub fn new(
        base_url: &str,
        anon_key: String,
        table: &str,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            anon_key,
            url_rows: format!("{}/rest/v1/{}", normalized, table),
        })
    }

    pub fn from_config(cfg: &BackendConfig) -> anyhow::Result<Self> {
        if cfg.base_url.trim().is_empty() {
            anyhow::bail!("backend.base_url is not configured");
        }
        Self::new(
            &cfg.base_url,
            cfg.anon_key.clone(),
            &cfg.table,
            cfg.timeout_ms,
        )
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    fn row_filter(&self, id: TaskId, owner: OwnerId) -> String {
        format!("{}?id=eq.{}&owner_id=eq.{}", self.url_rows, id, owner)
    }
}

fn store_err(err: StoreHttpError) -> StoreError {
    if err.is_decode() {
        StoreError::Decode(err.to_string())
    } else {
        StoreError::Request(anyhow::Error::new(err))
    }
}

#[async_trait]
impl TaskStore for RestTaskStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn fetch_all(&self, owner: OwnerId) -> Result<Vec<TaskRecord>, StoreError> {
        let url = format!(
            "{}?select={}&owner_id=eq.{}",
            self.url_rows, SELECT_COLUMNS, owner
        );
        tracing::debug!(
            target: "taskchain.store",
            stage = "store.http.fetch_all.in",
            url = %url,
            owner = %owner
        );
        let req = self.auth(self.http.get(&url));
        let resp = req
            .send()
            .await
            .map_err(|err| store_err(StoreHttpError::from_reqwest(err, url.clone())))?;
        let rows: Vec<TaskRecord> = parse_json(resp).await.map_err(store_err)?;
        tracing::debug!(
            target: "taskchain.store",
            stage = "store.http.fetch_all.out",
            rows = rows.len()
        );
        Ok(rows)
    }

    async fn insert(&self, task: NewTask) -> Result<TaskRecord, StoreError> {
        let url = &self.url_rows;
        tracing::debug!(
            target: "taskchain.store",
            stage = "store.http.insert.in",
            url = %url,
            owner = %task.owner_id,
            prev = ?task.prev_id,
            next = ?task.next_id
        );
        let req = self
            .auth(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(&task);
        let resp = req
            .send()
            .await
            .map_err(|err| store_err(StoreHttpError::from_reqwest(err, url.clone())))?;
        // PostgREST wraps the representation in a one-element array.
        let mut rows: Vec<TaskRecord> = parse_json(resp).await.map_err(store_err)?;
        let created = rows
            .pop()
            .ok_or_else(|| StoreError::Decode("insert returned no representation".to_string()))?;
        tracing::debug!(
            target: "taskchain.store",
            stage = "store.http.insert.out",
            task_id = %created.id
        );
        Ok(created)
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        owner: OwnerId,
    ) -> Result<(), StoreError> {
        let url = self.row_filter(id, owner);
        tracing::debug!(
            target: "taskchain.store",
            stage = "store.http.update.in",
            url = %url,
            task_id = %id
        );
        let req = self.auth(self.http.patch(&url)).json(&patch);
        let resp = req
            .send()
            .await
            .map_err(|err| store_err(StoreHttpError::from_reqwest(err, url.clone())))?;
        ensure_success(resp).await.map_err(store_err)?;
        tracing::debug!(target: "taskchain.store", stage = "store.http.update.out", task_id = %id);
        Ok(())
    }

    async fn delete(&self, id: TaskId, owner: OwnerId) -> Result<(), StoreError> {
        let url = self.row_filter(id, owner);
        tracing::debug!(
            target: "taskchain.store",
            stage = "store.http.delete.in",
            url = %url,
            task_id = %id
        );
        let req = self.auth(self.http.delete(&url));
        let resp = req
            .send()
            .await
            .map_err(|err| store_err(StoreHttpError::from_reqwest(err, url.clone())))?;
        ensure_success(resp).await.map_err(store_err)?;
        tracing::debug!(target: "taskchain.store", stage = "store.http.delete.out", task_id = %id);
        Ok(())
    }
}
