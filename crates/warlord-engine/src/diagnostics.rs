//! Pass-through diagnostics bundle.

use std::collections::BTreeMap;

use serde::Serialize;

/// Snapshot of the engine's learning state, reported alongside estimates and
/// on its own via [`PowerEngine::diagnostics`](crate::PowerEngine::diagnostics).
///
/// Carries no state of its own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineDiagnostics {
    pub is_trained: bool,
    pub corpus_size: usize,
    pub feature_importance: BTreeMap<String, f32>,
}
