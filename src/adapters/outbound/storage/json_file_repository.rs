use super::InMemoryRiskRepository;
use crate::ports::outbound::RiskRepository;
use crate::risk_scoring::domain::{Risk, RiskDraft, RiskFilter, RiskId, RiskPatch, SortSpec};
use crate::shared::security::{validate_not_symlink, validate_store_file};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// JsonFileRiskRepository - durable storage in a single JSON array file
///
/// Records are served from an [`InMemoryRiskRepository`] loaded at open time.
/// Every mutation rewrites the whole file while holding a write lock, so the
/// file always reflects a state the in-memory map passed through. The file is
/// written to a sibling temporary file first and renamed into place. A
/// mutation whose write fails is undone in memory before the error returns.
pub struct JsonFileRiskRepository {
    path: PathBuf,
    inner: InMemoryRiskRepository,
    write_lock: Mutex<()>,
}

impl JsonFileRiskRepository {
    /// Opens the store at `path`; a missing file is an empty register
    ///
    /// Stored `severity` and `band` values are ignored and re-derived from the
    /// ratings.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let inner = if tokio::fs::try_exists(&path).await.unwrap_or(false)
            || path.is_symlink()
        {
            validate_store_file(&path)?;
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read risk store {}", path.display()))?;
            let risks = parse_store(&content)
                .with_context(|| format!("Failed to parse risk store {}", path.display()))?;
            debug!(path = %path.display(), records = risks.len(), "Loaded risk store");
            InMemoryRiskRepository::from_risks(risks)
        } else {
            debug!(path = %path.display(), "Risk store does not exist yet; starting empty");
            InMemoryRiskRepository::new()
        };

        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self) -> Result<()> {
        if self.path.is_symlink() {
            validate_not_symlink(&self.path, "write")?;
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&self.inner.snapshot())
            .context("Failed to serialize risk store")?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        tokio::fs::write(&temp, content)
            .await
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .with_context(|| format!("Failed to replace risk store {}", self.path.display()))?;

        debug!(path = %self.path.display(), records = self.inner.len(), "Persisted risk store");
        Ok(())
    }
}

fn parse_store(content: &str) -> Result<Vec<Risk>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(content)?)
}

#[async_trait]
impl RiskRepository for JsonFileRiskRepository {
    async fn create(&self, draft: RiskDraft) -> Result<Risk> {
        let _guard = self.write_lock.lock().await;
        let risk = self.inner.create(draft).await?;
        if let Err(e) = self.persist().await {
            self.inner.discard(risk.id());
            warn!(risk_id = %risk.id(), "Rolled back create after failed write");
            return Err(e);
        }
        Ok(risk)
    }

    async fn find_by_id(&self, id: &RiskId) -> Result<Option<Risk>> {
        self.inner.find_by_id(id).await
    }

    async fn update_by_id(&self, id: &RiskId, patch: &RiskPatch) -> Result<Option<Risk>> {
        let _guard = self.write_lock.lock().await;
        let Some(previous) = self.inner.find_by_id(id).await? else {
            return Ok(None);
        };
        let updated = self.inner.update_by_id(id, patch).await?;
        if updated.is_some() {
            if let Err(e) = self.persist().await {
                self.inner.restore(previous);
                warn!(risk_id = %id, "Rolled back update after failed write");
                return Err(e);
            }
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &RiskId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(previous) = self.inner.find_by_id(id).await? else {
            return Ok(false);
        };
        let removed = self.inner.delete_by_id(id).await?;
        if removed {
            if let Err(e) = self.persist().await {
                self.inner.restore(previous);
                warn!(risk_id = %id, "Rolled back delete after failed write");
                return Err(e);
            }
        }
        Ok(removed)
    }

    async fn list(
        &self,
        filter: &RiskFilter,
        sort: &SortSpec,
        skip: usize,
        take: usize,
    ) -> Result<(Vec<Risk>, usize)> {
        self.inner.list(filter, sort, skip, take).await
    }
}
