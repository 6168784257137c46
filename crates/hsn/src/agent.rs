//! Main HsnAgent struct and public API.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::reference::{Loader, LoaderConfig, ReferenceStore};
use crate::request::{Action, QueryRequest, QueryResponse};
use crate::suggestion::{Suggester, SuggesterConfig, similarity};
use crate::validation::Validator;

/// Configuration for an [`HsnAgent`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Reference file loader configuration.
    pub loader: LoaderConfig,
    /// Suggestion ranking configuration.
    pub suggester: SuggesterConfig,
}

/// Answers validation and suggestion queries against one reference table.
///
/// The agent holds no mutable state, so a single instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct HsnAgent {
    store: Arc<ReferenceStore>,
    validator: Validator,
    suggester: Suggester,
}

impl HsnAgent {
    /// Create an agent with default configuration.
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self {
            validator: Validator::new(Arc::clone(&store)),
            suggester: Suggester::new(Arc::clone(&store)),
            store,
        }
    }

    /// Create an agent with a custom suggester configuration.
    pub fn with_config(store: Arc<ReferenceStore>, config: SuggesterConfig) -> Result<Self> {
        Ok(Self {
            validator: Validator::new(Arc::clone(&store)),
            suggester: Suggester::with_config(Arc::clone(&store), config)?,
            store,
        })
    }

    /// Load a reference file and build an agent over it.
    pub fn from_path(path: impl AsRef<Path>, config: AgentConfig) -> Result<Self> {
        let store = Loader::with_config(config.loader).load_file(path)?;
        Self::with_config(Arc::new(store), config.suggester)
    }

    /// Handle a query request.
    pub fn handle(&self, request: &QueryRequest) -> QueryResponse {
        debug!(action = %request.action, "handling query");
        match request.action {
            Action::Validate => QueryResponse::from_validation(self.validator.validate(&request.query)),
            Action::Suggest => QueryResponse::from_suggestions(
                similarity::normalize(&request.query),
                self.suggester.suggest_default(&request.query),
            ),
        }
    }

    /// Suggest up to `top_k` codes for a description.
    pub fn suggest(&self, description: &str, top_k: usize) -> QueryResponse {
        let suggestions = self.suggester.suggest(description, top_k);
        QueryResponse::from_suggestions(similarity::normalize(description), suggestions)
    }

    /// Interpret a free-text message and handle it.
    pub fn handle_message(&self, message: &str) -> (QueryRequest, QueryResponse) {
        let request = QueryRequest::from_message(message);
        let response = self.handle(&request);
        (request, response)
    }

    /// The code validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// The description suggester.
    pub fn suggester(&self) -> &Suggester {
        &self.suggester
    }

    /// The shared reference store.
    pub fn store(&self) -> &Arc<ReferenceStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::CodeEntry;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn agent() -> HsnAgent {
        let store = ReferenceStore::from_entries(vec![
            CodeEntry::new("01", "LIVE ANIMALS"),
            CodeEntry::new("0101", "LIVE HORSES, ASSES, MULES AND HINNIES"),
            CodeEntry::new("99", "MISCELLANEOUS"),
        ])
        .unwrap();
        HsnAgent::new(Arc::new(store))
    }

    #[test]
    fn test_handle_validate() {
        let response = agent().handle(&QueryRequest::validate("01, 0101, 999999"));
        match response {
            QueryResponse::Validate(results) => {
                let codes: Vec<&str> = results.keys().map(|k| k.as_str()).collect();
                assert_eq!(codes, vec!["01", "0101", "999999"]);
                assert!(results["01"].valid);
                assert!(results["0101"].valid);
                assert_eq!(results["999999"].nearest.as_deref(), Some("99"));
            }
            other => panic!("Expected Validate, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_suggest() {
        let response = agent().handle(&QueryRequest::suggest("Live Animals"));
        match response {
            QueryResponse::Suggest(s) => {
                assert_eq!(s.query, "live animals");
                assert_eq!(s.suggestions[0].code, "01");
                assert_eq!(s.suggestions[0].confidence, 1.0);
                assert!(s.error.is_none());
            }
            other => panic!("Expected Suggest, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_suggest_uses_configured_top_k() {
        let store = Arc::clone(agent().store());
        let config = SuggesterConfig {
            top_k: 1,
            ..Default::default()
        };
        let agent = HsnAgent::with_config(store, config).unwrap();

        match agent.handle(&QueryRequest::suggest("live horses")) {
            QueryResponse::Suggest(s) => assert_eq!(s.suggestions.len(), 1),
            other => panic!("Expected Suggest, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_empty_suggest() {
        match agent().handle(&QueryRequest::suggest("  ")) {
            QueryResponse::Suggest(s) => {
                assert!(s.suggestions.is_empty());
                assert_eq!(s.error.as_deref(), Some("Empty description provided"));
            }
            other => panic!("Expected Suggest, got {:?}", other),
        }
    }

    #[test]
    fn test_handle_message() {
        let (request, response) = agent().handle_message("is 0101 valid?");
        assert_eq!(request, QueryRequest::validate("0101"));
        assert!(matches!(response, QueryResponse::Validate(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"code,description\n01,LIVE ANIMALS\n0101,LIVE HORSES\n")
            .unwrap();

        let agent = HsnAgent::from_path(file.path(), AgentConfig::default()).unwrap();
        assert_eq!(agent.store().len(), 2);
        assert!(agent.store().source().is_some());
    }

    #[test]
    fn test_from_path_rejects_bad_weights() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"code,description\n01,LIVE ANIMALS\n").unwrap();

        let config = AgentConfig {
            suggester: SuggesterConfig {
                sequence_weight: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(HsnAgent::from_path(file.path(), config).is_err());
    }
}
