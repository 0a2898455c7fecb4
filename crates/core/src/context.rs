//! Application context built once at startup.
//!
//! Holds the resolved configuration and the loaded fallback sentiment model. It is immutable
//! after construction; servers share it behind an `Arc`.

use std::sync::Arc;

use crate::config::CoreConfig;
use crate::error::NotetakerResult;
use crate::sentiment::{classify_sentiment, load_model, SentimentModel, SentimentResult};

pub struct AppContext {
    cfg: CoreConfig,
    sentiment_model: Arc<dyn SentimentModel>,
}

impl AppContext {
    /// Loads the configured sentiment model and builds the context.
    ///
    /// The remote backend performs network I/O with a blocking client, so call this before
    /// starting an async runtime or from a blocking task.
    ///
    /// # Errors
    ///
    /// Returns `NotetakerError::ModelLoad` if the model could not be loaded after one retry.
    pub fn initialise(cfg: CoreConfig) -> NotetakerResult<Self> {
        tracing::info!(backend = cfg.sentiment_backend().kind(), "loading sentiment model");
        let sentiment_model = load_model(cfg.sentiment_backend())?;
        Ok(Self::with_model(cfg, sentiment_model))
    }

    /// Builds a context around an already loaded model.
    pub fn with_model(cfg: CoreConfig, sentiment_model: Arc<dyn SentimentModel>) -> Self {
        Self {
            cfg,
            sentiment_model,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn sentiment_model(&self) -> &dyn SentimentModel {
        self.sentiment_model.as_ref()
    }

    /// Classifies the sentiment and intent of a patient's dialogue.
    ///
    /// May block on the fallback model.
    pub fn analyse_sentiment(&self, dialogue: &str) -> SentimentResult {
        classify_sentiment(dialogue, self.sentiment_model.as_ref())
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("cfg", &self.cfg)
            .field("sentiment_model", &self.sentiment_model.name())
            .finish()
    }
}
