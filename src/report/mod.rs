//! In-memory report outline and its expansion state machine.
//!
//! ```text
//! Empty ──generate──▶ Generated ──expand──▶ Expanded(1) ──expand──▶ Expanded(1)
//!   ▲                                                                   │
//!   └──────────────────────────────reset────────────────────────────────┘
//! ```
//!
//! Expansion runs [`EXPANSION_PASSES`] passes, each after a fixed delay. Only
//! top-level sections ever gain children, so the visible outline stops growing
//! after the first expansion; later expansions are accepted and leave it as is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{expand_pass, initial_outline, max_depth, SectionLabel};

/// Number of passes one expansion runs.
pub const EXPANSION_PASSES: u32 = 4;

/// Deepest expansion level accepted before `expand` is refused.
pub const MAX_EXPANSION_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Report has not been generated")]
    NotGenerated,
    #[error("Report has already been generated")]
    AlreadyGenerated,
    #[error("Report expansion is already in progress")]
    ExpansionInProgress,
    #[error("Report is expanded to the maximum depth of {0}")]
    DepthLimitReached(usize),
}

/// Where the outline is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum OutlineState {
    Empty,
    Generated,
    Expanded { depth: usize },
}

impl OutlineState {
    fn for_sections(sections: &[SectionLabel]) -> Self {
        match max_depth(sections) {
            0 => Self::Empty,
            1 => Self::Generated,
            deepest => Self::Expanded { depth: deepest - 1 },
        }
    }
}

/// Read-only view of the outline handed to pages, exporters and API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSnapshot {
    pub state: OutlineState,
    pub expanding: bool,
    pub sections: Vec<SectionLabel>,
}

struct OutlineInner {
    state: OutlineState,
    sections: Vec<SectionLabel>,
}

/// Shared handle to the report outline.
///
/// Clones refer to the same outline. The lock is never held across an await;
/// a running expansion works on its own copy and commits at the end.
#[derive(Clone)]
pub struct OutlineStore {
    inner: Arc<Mutex<OutlineInner>>,
    expanding: Arc<AtomicBool>,
    pass_delay: Duration,
}

impl OutlineStore {
    pub fn new(pass_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(OutlineInner {
                state: OutlineState::Empty,
                sections: Vec::new(),
            })),
            expanding: Arc::new(AtomicBool::new(false)),
            pass_delay,
        }
    }

    pub fn state(&self) -> OutlineState {
        self.inner.lock().expect("outline lock poisoned").state
    }

    pub fn sections(&self) -> Vec<SectionLabel> {
        self.inner
            .lock()
            .expect("outline lock poisoned")
            .sections
            .clone()
    }

    pub fn is_expanding(&self) -> bool {
        self.expanding.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> OutlineSnapshot {
        let inner = self.inner.lock().expect("outline lock poisoned");
        OutlineSnapshot {
            state: inner.state,
            expanding: self.is_expanding(),
            sections: inner.sections.clone(),
        }
    }

    /// Fill an empty outline with the fixed top-level sections.
    pub fn generate(&self) -> Result<Vec<SectionLabel>, ReportError> {
        let mut inner = self.inner.lock().expect("outline lock poisoned");
        self.ensure_idle()?;
        if inner.state != OutlineState::Empty {
            return Err(ReportError::AlreadyGenerated);
        }

        inner.sections = initial_outline();
        inner.state = OutlineState::Generated;
        tracing::info!(sections = inner.sections.len(), "Generated report outline");
        Ok(inner.sections.clone())
    }

    /// Drop the outline and return to the empty state.
    pub fn reset(&self) -> Result<(), ReportError> {
        let mut inner = self.inner.lock().expect("outline lock poisoned");
        self.ensure_idle()?;
        inner.sections.clear();
        inner.state = OutlineState::Empty;
        tracing::info!("Reset report outline");
        Ok(())
    }

    /// Run a full expansion and return the committed outline.
    pub async fn expand(&self) -> Result<Vec<SectionLabel>, ReportError> {
        Ok(self.begin_expansion()?.run().await)
    }

    /// Claim the single expansion slot and capture the outline to expand.
    ///
    /// Fails without side effects when the outline is not expandable or another
    /// expansion is pending. The slot is released when the returned
    /// [`Expansion`] finishes or is dropped.
    pub fn begin_expansion(&self) -> Result<Expansion, ReportError> {
        let inner = self.inner.lock().expect("outline lock poisoned");
        match inner.state {
            OutlineState::Empty => return Err(ReportError::NotGenerated),
            OutlineState::Expanded { depth } if depth >= MAX_EXPANSION_DEPTH => {
                return Err(ReportError::DepthLimitReached(MAX_EXPANSION_DEPTH))
            }
            _ => {}
        }

        if self
            .expanding
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ReportError::ExpansionInProgress);
        }

        tracing::info!(sections = inner.sections.len(), "Starting report expansion");
        Ok(Expansion {
            store: self.clone(),
            sections: inner.sections.clone(),
            _pending: PendingGuard(self.expanding.clone()),
        })
    }

    /// Must be called with the outline lock held; the flag is only set under it.
    fn ensure_idle(&self) -> Result<(), ReportError> {
        if self.is_expanding() {
            return Err(ReportError::ExpansionInProgress);
        }
        Ok(())
    }

    fn commit(&self, sections: Vec<SectionLabel>) -> Vec<SectionLabel> {
        let mut inner = self.inner.lock().expect("outline lock poisoned");
        inner.state = OutlineState::for_sections(&sections);
        inner.sections = sections;
        inner.sections.clone()
    }
}

/// A claimed expansion, ready to run its timed passes.
pub struct Expansion {
    store: OutlineStore,
    sections: Vec<SectionLabel>,
    _pending: PendingGuard,
}

impl Expansion {
    /// Run every pass in order, then commit the result to the store.
    pub async fn run(mut self) -> Vec<SectionLabel> {
        for pass in 1..=EXPANSION_PASSES {
            tokio::time::sleep(self.store.pass_delay).await;
            let before = self.sections.len();
            self.sections = expand_pass(&self.sections);
            tracing::debug!(
                pass,
                added = self.sections.len() - before,
                "Expansion pass complete"
            );
        }

        let committed = self.store.commit(std::mem::take(&mut self.sections));
        tracing::info!(sections = committed.len(), "Report expansion finished");
        committed
    }
}

/// Clears the pending flag when an expansion ends, however it ends.
struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> OutlineStore {
        OutlineStore::new(Duration::ZERO)
    }

    #[test]
    fn starts_empty() {
        let store = store();
        assert_eq!(store.state(), OutlineState::Empty);
        assert!(store.sections().is_empty());
        assert!(!store.is_expanding());
    }

    #[test]
    fn generate_only_from_empty() {
        let store = store();
        store.generate().unwrap();
        assert_eq!(store.generate(), Err(ReportError::AlreadyGenerated));
    }

    #[test]
    fn reset_returns_to_empty() {
        let store = store();
        store.generate().unwrap();
        store.reset().unwrap();
        assert_eq!(store.state(), OutlineState::Empty);
        assert!(store.sections().is_empty());
        store.generate().unwrap();
    }

    #[test]
    fn expansion_requires_generated_outline() {
        assert_eq!(
            store().begin_expansion().err(),
            Some(ReportError::NotGenerated)
        );
    }

    #[test]
    fn pending_expansion_blocks_other_changes() {
        let store = store();
        store.generate().unwrap();

        let pending = store.begin_expansion().unwrap();
        assert!(store.is_expanding());
        assert_eq!(
            store.begin_expansion().err(),
            Some(ReportError::ExpansionInProgress)
        );
        assert_eq!(store.reset(), Err(ReportError::ExpansionInProgress));

        drop(pending);
        assert!(!store.is_expanding());
        assert_eq!(store.state(), OutlineState::Generated);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let store = store();
        {
            let mut inner = store.inner.lock().unwrap();
            inner.state = OutlineState::Expanded {
                depth: MAX_EXPANSION_DEPTH,
            };
        }
        assert_eq!(
            store.begin_expansion().err(),
            Some(ReportError::DepthLimitReached(MAX_EXPANSION_DEPTH))
        );
    }

    #[tokio::test]
    async fn expand_commits_one_level() {
        let store = store();
        store.generate().unwrap();

        let sections = store.expand().await.unwrap();
        assert_eq!(sections.len(), 32);
        assert_eq!(store.state(), OutlineState::Expanded { depth: 1 });
        assert!(!store.is_expanding());
    }
}
