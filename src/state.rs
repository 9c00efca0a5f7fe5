//! Application state: quiz bank, prompts, OpenAI client, and the attested-report store.
//!
//! The report store is in-memory and keyed by content hash; it does not survive restarts
//! and is not shared across instances. It holds at most `ACADEMY_MAX_REPORTS` entries
//! (default 10_000), evicting the oldest first.

use std::sync::Arc;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::config::{load_config_from_env, Prompts};
use crate::domain::QuizModule;
use crate::openai::OpenAI;
use crate::placement::SLOT_COUNT;
use crate::seeds::seed_modules;

pub const DEFAULT_MAX_REPORTS: usize = 10_000;

/// Attested reports in insertion order, bounded by `capacity`.
pub struct ReportStore {
    entries: IndexMap<String, Value>,
    capacity: usize,
}

impl ReportStore {
    pub fn new(capacity: usize) -> Self {
        Self { entries: IndexMap::new(), capacity: capacity.max(1) }
    }

    /// Insert a report; returns how many old entries were evicted to stay within capacity.
    pub fn insert(&mut self, content_hash: &str, report: Value) -> usize {
        self.entries.insert(content_hash.to_ascii_lowercase(), report);
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.shift_remove_index(0);
            evicted += 1;
        }
        evicted
    }

    pub fn get(&self, content_hash: &str) -> Option<&Value> {
        self.entries.get(&content_hash.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn max_reports_from_env() -> usize {
    std::env::var("ACADEMY_MAX_REPORTS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_REPORTS)
}

#[derive(Clone)]
pub struct AppState {
    pub modules: Arc<Vec<QuizModule>>,
    pub reports: Arc<RwLock<ReportStore>>,
    pub openai: Option<OpenAI>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, pick the quiz bank, init OpenAI.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_config_from_env().unwrap_or_default();

        let modules = if cfg.modules.is_empty() {
            seed_modules()
        } else {
            cfg.modules
        };
        for (mi, m) in modules.iter().enumerate() {
            for (qi, q) in m.questions.iter().enumerate() {
                if q.wrong.len() != SLOT_COUNT - 1 {
                    warn!(target: "quiz", module = mi, question = qi, wrong = q.wrong.len(), "Question does not have exactly 3 distractors; it will fail to render");
                }
            }
            info!(target: "quiz", module = mi, title = %m.title, questions = m.questions.len(), "Startup quiz inventory");
        }

        let openai = OpenAI::from_env();
        if let Some(oa) = &openai {
            info!(target: "academy_backend", base_url = %oa.base_url, model = %oa.model, "OpenAI enabled.");
        } else {
            info!(target: "academy_backend", "OpenAI disabled (no OPENAI_API_KEY). Using local assessment heuristic.");
        }

        let max_reports = max_reports_from_env();
        info!(target: "attestation", max_reports, "Report store capacity");

        Self::with_parts(modules, cfg.prompts, openai).with_report_capacity(max_reports)
    }

    pub fn with_parts(modules: Vec<QuizModule>, prompts: Prompts, openai: Option<OpenAI>) -> Self {
        Self {
            modules: Arc::new(modules),
            reports: Arc::new(RwLock::new(ReportStore::new(DEFAULT_MAX_REPORTS))),
            openai,
            prompts,
        }
    }

    pub fn with_report_capacity(mut self, capacity: usize) -> Self {
        self.reports = Arc::new(RwLock::new(ReportStore::new(capacity)));
        self
    }

    #[instrument(level = "debug", skip(self, report))]
    pub async fn store_report(&self, content_hash: &str, report: Value) {
        let mut store = self.reports.write().await;
        let evicted = store.insert(content_hash, report);
        if evicted > 0 {
            debug!(target: "attestation", evicted, capacity = store.capacity(), "Evicted oldest reports");
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_report(&self, content_hash: &str) -> Option<Value> {
        self.reports.read().await.get(content_hash).cloned()
    }
}
