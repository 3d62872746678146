//! Model backends and request dispatch.
//!
//! A [`ModelBackend`] is anything that can be loaded once and then answer
//! [`InferenceRequest`]s. Backends are registered per [`ModelKind`] in a
//! [`ModelRegistry`], which routes requests by their `model_name`.
//!
//! [`PromptedBackend`] is the stock backend: it assembles the prompt for its
//! kind, hands it to a caller-supplied [`TextGenerator`] and post-processes
//! the completion.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::postprocess::{extract_json_object, extract_questions, extract_sql, postgres_to_sqlite};
use super::prompts::{followup_prompt, sql_prompt, visualization_prompt};
use super::{InferenceOutput, InferenceRequest, ModelKind};
use crate::error::{BriefError, BriefResult};
use crate::logging::LogConfig;

/// Capability of a model that answers inference requests.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Loads weights or opens connections. May be called repeatedly.
    async fn ensure_loaded(&self) -> BriefResult<()>;

    /// Answers one request.
    async fn infer(&self, request: &InferenceRequest) -> BriefResult<InferenceOutput>;
}

/// Raw text completion, the transport behind a [`PromptedBackend`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Prepares the generator for use.
    async fn load(&self) -> BriefResult<()>;

    /// Completes `prompt`.
    async fn complete(&self, prompt: &str) -> BriefResult<String>;
}

/// Wraps a backend so its loading step runs at most once, even under
/// concurrent callers. A failed load is retried on the next call.
pub struct LoadOnce<B> {
    inner: B,
    loaded: OnceCell<()>,
}

impl<B: ModelBackend> LoadOnce<B> {
    /// Wraps `inner`.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            loaded: OnceCell::new(),
        }
    }

    /// Whether the wrapped backend finished loading.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: ModelBackend> ModelBackend for LoadOnce<B> {
    async fn ensure_loaded(&self) -> BriefResult<()> {
        self.loaded
            .get_or_try_init(|| self.inner.ensure_loaded())
            .await?;
        Ok(())
    }

    async fn infer(&self, request: &InferenceRequest) -> BriefResult<InferenceOutput> {
        self.ensure_loaded().await?;
        self.inner.infer(request).await
    }
}

/// Backend that prompts a text generator the way its model kind expects.
pub struct PromptedBackend<G> {
    kind: ModelKind,
    generator: G,
    log_config: LogConfig,
}

impl<G: TextGenerator> PromptedBackend<G> {
    /// Creates a backend of `kind` driven by `generator`.
    pub fn new(kind: ModelKind, generator: G) -> Self {
        Self {
            kind,
            generator,
            log_config: LogConfig::default(),
        }
    }

    /// Sets how much prompt and completion text is logged.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    /// The model kind served.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    fn prompt(&self, request: &InferenceRequest) -> String {
        match self.kind {
            ModelKind::SqlCoder => sql_prompt(&request.question, &request.schema),
            ModelKind::Data2Viz => visualization_prompt(&request.question, &request.query_result),
            ModelKind::Followup => followup_prompt(&request.question),
        }
    }

    fn postprocess(&self, completion: &str) -> InferenceOutput {
        match self.kind {
            ModelKind::SqlCoder => {
                InferenceOutput::Sql(postgres_to_sqlite(extract_sql(completion).trim()))
            }
            ModelKind::Data2Viz => match extract_json_object(completion) {
                Some(chart) => InferenceOutput::Chart(chart),
                None => InferenceOutput::Text(completion.trim().to_string()),
            },
            ModelKind::Followup => InferenceOutput::Questions(extract_questions(completion)),
        }
    }
}

#[async_trait]
impl<G: TextGenerator> ModelBackend for PromptedBackend<G> {
    async fn ensure_loaded(&self) -> BriefResult<()> {
        self.generator.load().await
    }

    #[instrument(skip_all, fields(model = %self.kind, generator = self.generator.name()))]
    async fn infer(&self, request: &InferenceRequest) -> BriefResult<InferenceOutput> {
        let prompt = self.prompt(request);
        if self.log_config.log_prompts {
            debug!(prompt = %self.log_config.field(&prompt), "Prompt assembled");
        }
        let completion = self.generator.complete(&prompt).await?;
        if self.log_config.log_completions {
            debug!(completion = %self.log_config.field(&completion), "Completion received");
        }
        Ok(self.postprocess(&completion))
    }
}

/// Routes requests to the backend registered for their model name.
#[derive(Default)]
pub struct ModelRegistry {
    backends: HashMap<ModelKind, Arc<dyn ModelBackend>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend` for `kind`, wrapped so it loads at most once.
    pub fn register<B: ModelBackend + 'static>(&mut self, kind: ModelKind, backend: B) -> &mut Self {
        self.backends.insert(kind, Arc::new(LoadOnce::new(backend)));
        self
    }

    /// Looks up a backend by wire name.
    pub fn get(&self, model_name: &str) -> BriefResult<Arc<dyn ModelBackend>> {
        let kind: ModelKind = model_name.parse()?;
        self.backends
            .get(&kind)
            .cloned()
            .ok_or_else(|| BriefError::ModelNotFound(model_name.to_string()))
    }

    /// Registered model kinds.
    pub fn kinds(&self) -> Vec<ModelKind> {
        self.backends.keys().copied().collect()
    }

    /// Answers `request` with the backend its `model_name` selects.
    #[instrument(skip_all, fields(model = %request.model_name))]
    pub async fn dispatch(&self, request: &InferenceRequest) -> BriefResult<InferenceOutput> {
        let backend = self.get(&request.model_name)?;
        let output = backend.infer(request).await?;
        info!("Inference completed");
        Ok(output)
    }
}
