use crate::{
    models::{Comparison, DebugSummary, SharedAlbum},
    services::comparison::MISSING_USERNAMES,
};

/// Everything the compare page shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompareView {
    pub username1: String,
    pub username2: String,
    pub loading: bool,
    pub error: Option<String>,
    pub overlap: Vec<SharedAlbum>,
    pub debug: Option<DebugSummary>,
    /// Set once a comparison has finished successfully
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub enum CompareAction {
    EditUsername1(String),
    EditUsername2(String),
    Submit,
    Loaded(Comparison),
    Failed(String),
}

impl CompareView {
    /// Applies one action and returns the next view
    pub fn reduce(self, action: CompareAction) -> Self {
        match action {
            CompareAction::EditUsername1(username1) => Self { username1, ..self },
            CompareAction::EditUsername2(username2) => Self { username2, ..self },
            CompareAction::Submit => {
                let missing = self.username1.trim().is_empty() || self.username2.trim().is_empty();
                Self {
                    error: missing.then(|| MISSING_USERNAMES.to_string()),
                    overlap: Vec::new(),
                    loading: !missing,
                    completed: false,
                    ..self
                }
            }
            CompareAction::Loaded(comparison) => Self {
                overlap: comparison.shared,
                debug: Some(comparison.debug),
                loading: false,
                completed: true,
                ..self
            },
            CompareAction::Failed(message) => Self {
                error: Some(message),
                loading: false,
                ..self
            },
        }
    }

    /// Folds a sequence of actions starting from this view
    pub fn reduce_all(self, actions: impl IntoIterator<Item = CompareAction>) -> Self {
        actions.into_iter().fold(self, Self::reduce)
    }
}
