//! Application state: the shared analyzer and the in-memory session store

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use analysis_client::ContractAnalyzer;
use chrono::NaiveTime;
use shared_types::{AuditLogEntry, SessionLog};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Request body limit when `--max-upload-mb` is not given
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state
pub struct AppState {
    pub analyzer: ContractAnalyzer,
    /// PDF render timeout in milliseconds
    pub render_timeout_ms: u64,
    /// Largest accepted request body; uploads travel base64 encoded
    pub max_upload_bytes: usize,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(analyzer: ContractAnalyzer, render_timeout_ms: u64, session_ttl: Duration) -> Self {
        Self {
            analyzer,
            render_timeout_ms,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            sessions: SessionStore::new(session_ttl),
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// One user's session: its audit log, plus a separate lock that
/// serializes audits without blocking log reads
pub struct SessionContext {
    pub id: Uuid,
    audit: Mutex<()>,
    state: Mutex<SessionState>,
}

struct SessionState {
    log: SessionLog,
    last_active: Instant,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            audit: Mutex::new(()),
            state: Mutex::new(SessionState {
                log: SessionLog::new(),
                last_active: Instant::now(),
            }),
        }
    }

    /// Wait for any running audit on this session, then hold the audit lock.
    /// The log stays readable while the guard is held.
    pub async fn begin_audit(&self) -> MutexGuard<'_, ()> {
        let guard = self.audit.lock().await;
        self.touch().await;
        guard
    }

    /// Snapshot of the log, oldest first. Counts as activity.
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        let mut state = self.state.lock().await;
        state.last_active = Instant::now();
        state.log.entries().to_vec()
    }

    pub async fn record(&self, filename: &str, at: NaiveTime) -> AuditLogEntry {
        let mut state = self.state.lock().await;
        state.last_active = Instant::now();
        state.log.record(filename, at).clone()
    }

    async fn touch(&self) {
        self.state.lock().await.last_active = Instant::now();
    }

    /// Sessions with an audit in flight are never expired
    fn is_expired(&self, ttl: Duration) -> bool {
        if self.audit.try_lock().is_err() {
            return false;
        }
        match self.state.try_lock() {
            Ok(state) => state.last_active.elapsed() >= ttl,
            Err(_) => false,
        }
    }
}

/// Session contexts keyed by id, pruned after `ttl` of inactivity
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<SessionContext>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a session, pruning expired ones first
    pub async fn create(&self) -> Arc<SessionContext> {
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, ctx| !ctx.is_expired(self.ttl));
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Pruned {} idle sessions", pruned);
        }

        let ctx = Arc::new(SessionContext::new());
        sessions.insert(ctx.id, ctx.clone());
        debug!("Created session {} ({} active)", ctx.id, sessions.len());
        ctx
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<SessionContext>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Remove a session; returns false if it did not exist
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
