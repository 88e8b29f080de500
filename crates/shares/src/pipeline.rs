//! Cache-first orchestration of the fetch, process, save and render steps.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use shares_core::{
    DisclosureSource, ExtremumProcessor, PipelineConfig, Presenter, Result, Snapshot,
    SnapshotStore, StorageBackend,
};

use crate::identifier::resolve_identifier;

/// What a [`Pipeline::run`] rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Identifier the fresh fetch was issued for.
    pub identifier: String,
    /// Snapshot rendered from the store before fetching, if any.
    pub cached: Option<Snapshot>,
    /// Snapshot fetched, saved and rendered, if the refresh succeeded.
    pub fresh: Option<Snapshot>,
}

impl RunReport {
    /// The snapshot left on display, with a fresh result taking precedence.
    #[must_use]
    pub fn displayed(&self) -> Option<&Snapshot> {
        self.fresh.as_ref().or(self.cached.as_ref())
    }
}

/// Orchestrates the cache-first render and the fresh fetch.
///
/// All collaborators are injected, so any of them can be replaced by a test
/// double. No failure escapes [`Pipeline::run`]: each one is logged and the
/// display keeps whatever it showed before.
///
/// # Example
///
/// ```rust,ignore
/// use shares::{Pipeline, PipelineConfig, SlotPresenter, SqliteBackend, TextSlots};
/// use std::sync::Arc;
///
/// let config = PipelineConfig::default();
/// let slots = Arc::new(TextSlots::new());
/// let pipeline = Pipeline::with_edgar(
///     config.clone(),
///     Arc::new(SqliteBackend::new("shares.sqlite")?),
///     Arc::new(SlotPresenter::new(config.slots.clone(), slots.clone())),
/// )?;
///
/// let report = pipeline.run_with_query("?CIK=0000320193").await;
/// println!("{:?}", slots.get("share-max-value"));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    source: Arc<dyn DisclosureSource>,
    store: SnapshotStore,
    processor: ExtremumProcessor,
    presenter: Arc<dyn Presenter>,
}

impl Pipeline {
    /// Create a pipeline from its collaborators.
    ///
    /// The snapshot is stored under `config.cache_key` of `backend`.
    ///
    /// # Errors
    /// Returns [`SharesError::InvalidParameter`](shares_core::SharesError::InvalidParameter)
    /// if the configuration is incomplete.
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn DisclosureSource>,
        backend: Arc<dyn StorageBackend>,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self> {
        config.validate()?;
        let store = SnapshotStore::new(backend, config.cache_key.clone());
        let processor = ExtremumProcessor::new(config.fiscal_year_cutoff.clone());

        debug!(
            source = source.name(),
            key = %config.cache_key,
            "Creating pipeline"
        );

        Ok(Self {
            config,
            source,
            store,
            processor,
            presenter,
        })
    }

    /// Create a pipeline fetching from SEC EDGAR with `config.user_agent`.
    ///
    /// # Errors
    /// Returns an error if the configuration is incomplete.
    #[cfg(feature = "edgar")]
    pub fn with_edgar(
        config: PipelineConfig,
        backend: Arc<dyn StorageBackend>,
        presenter: Arc<dyn Presenter>,
    ) -> Result<Self> {
        let source = Arc::new(shares_edgar::EdgarClient::new(&config.user_agent));
        Self::new(config, source, backend, presenter)
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The snapshot store in use.
    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Resolve the identifier from a query string, falling back to the default.
    #[must_use]
    pub fn resolve_identifier(&self, query: &str) -> String {
        resolve_identifier(
            query,
            &self.config.identifier_param,
            &self.config.default_identifier,
        )
    }

    /// Render the stored snapshot, if there is a valid one.
    ///
    /// A missing snapshot leaves the display untouched. A corrupt snapshot or a
    /// failing backend is logged and also leaves it untouched.
    #[instrument(skip(self), fields(key = %self.config.cache_key))]
    pub fn render_cached(&self) -> Option<Snapshot> {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                debug!(entity = %snapshot.entity_name, "Rendering cached snapshot");
                self.render(&snapshot);
                Some(snapshot)
            }
            Ok(None) => {
                debug!("No cached snapshot to render");
                None
            }
            Err(e) => {
                warn!(error = %e, "Ignoring stored snapshot");
                None
            }
        }
    }

    /// Fetch, process, save and render fresh data for `identifier`.
    ///
    /// Nothing is rendered unless fetching, processing and saving all succeed.
    ///
    /// # Errors
    /// Returns the fetch, processing or save failure; it has already been
    /// logged.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn refresh(&self, identifier: &str) -> Result<Snapshot> {
        let snapshot = self.fetch_and_process(identifier).await.inspect_err(|e| {
            warn!(error = %e, "No fresh data available");
        })?;

        self.store.save(&snapshot).inspect_err(|e| {
            warn!(error = %e, "Failed to save snapshot");
        })?;
        self.render(&snapshot);

        info!(
            entity = %snapshot.entity_name,
            max = snapshot.max.val,
            min = snapshot.min.val,
            "Rendered fresh snapshot"
        );
        Ok(snapshot)
    }

    /// Render the stored snapshot, then refresh it for `identifier`.
    ///
    /// The cached render completes before the request is issued, so a
    /// successful refresh is always the last thing rendered.
    pub async fn run(&self, identifier: &str) -> RunReport {
        let cached = self.render_cached();
        let fresh = self.refresh(identifier).await.ok();

        RunReport {
            identifier: identifier.to_string(),
            cached,
            fresh,
        }
    }

    /// [`run`](Self::run) with the identifier taken from a query string.
    pub async fn run_with_query(&self, query: &str) -> RunReport {
        let identifier = self.resolve_identifier(query);
        self.run(&identifier).await
    }

    async fn fetch_and_process(&self, identifier: &str) -> Result<Snapshot> {
        let payload = self.source.fetch_disclosure(identifier).await?;
        self.processor.process(&payload)
    }

    fn render(&self, snapshot: &Snapshot) {
        self.presenter
            .render(&snapshot.entity_name, &snapshot.max, &snapshot.min);
    }
}
