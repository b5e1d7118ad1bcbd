//! Process-wide lookup of record types by name.
//!
//! Services that receive payloads tagged with a record name (queues, webhooks,
//! the API gateway) validate them here without naming the Rust type.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use schemars::schema::RootSchema;
use serde_json::Value;

use crate::config::ValidationConfig;
use crate::error::RegistryError;
use crate::models::{
    AnalyticsData, Analogy, ApiError, ApiResponse, AuthResponse, CodeExplanation,
    ConceptExplanation, ConversationMessage, DebuggingSuggestion, DocumentMetadata, Example,
    ExpertiseLevel, Fix, GenerationContext, IngestionResult, Issue, KnowledgeDocument,
    LearningContext, LearningInteraction, LearningPath, LearningResource, LineExplanation,
    LoginCredentials, Milestone, NotificationSettings, PaginatedResponse, PersonalizedResponse,
    ProgressMetrics, SearchFilters, SearchResult, SessionContext, SkillAssessment,
    SkillImprovement, SkillLevel, StepByStep, User, UserContext, UserFeedback, UserPreferences,
    UserRegistration, WorkflowOptimization,
};
use crate::record::Record;

type ValidateFn = fn(&Value, ValidationConfig) -> Result<Value, RegistryError>;

/// One registered record type.
pub struct RecordType {
    name: &'static str,
    schema: RootSchema,
    validate: ValidateFn,
}

impl RecordType {
    fn of<R: Record>() -> Self {
        Self {
            name: R::NAME,
            schema: schemars::schema_for!(R),
            validate: canonicalize::<R>,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// JSON Schema (draft 7) of the record.
    #[must_use]
    pub const fn schema(&self) -> &RootSchema {
        &self.schema
    }
}

impl std::fmt::Debug for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn canonicalize<R: Record>(value: &Value, config: ValidationConfig) -> Result<Value, RegistryError> {
    let record = R::from_json_with(value, config)?;
    serde_json::to_value(&record).map_err(RegistryError::serialization)
}

static GLOBAL: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

/// Every shared record type, keyed by name.
#[derive(Debug)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, RecordType>,
    config: ValidationConfig,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Shared instance with the default configuration. Built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        let types: BTreeMap<_, _> = all_record_types()
            .into_iter()
            .map(|ty| (ty.name, ty))
            .collect();
        tracing::debug!(
            types = types.len(),
            deny_unknown_fields = config.deny_unknown_fields,
            "type registry initialized"
        );
        Self { types, config }
    }

    #[must_use]
    pub const fn config(&self) -> ValidationConfig {
        self.config
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered record names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    /// Looks up a record type.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownType`] if `name` is not registered.
    pub fn get(&self, name: &str) -> Result<&RecordType, RegistryError> {
        self.types.get(name).ok_or_else(|| {
            tracing::debug!(type_name = name, "unknown record type");
            RegistryError::unknown_type(name)
        })
    }

    /// JSON Schema of the named record.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownType`] if `name` is not registered.
    pub fn schema(&self, name: &str) -> Result<&RootSchema, RegistryError> {
        self.get(name).map(RecordType::schema)
    }

    /// Validates `payload` as the named record and returns its canonical JSON
    /// form: defaults filled in, datetimes normalized to UTC, absent optionals
    /// dropped.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownType`] for an unregistered name and
    /// [`RegistryError::Validation`] listing every violation otherwise.
    pub fn validate(&self, name: &str, payload: &Value) -> Result<Value, RegistryError> {
        let ty = self.get(name)?;
        (ty.validate)(payload, self.config).inspect_err(|err| {
            if let RegistryError::Validation(v) = err {
                tracing::debug!(
                    type_name = ty.name,
                    violations = v.len(),
                    "payload rejected"
                );
            }
        })
    }
}

fn all_record_types() -> Vec<RecordType> {
    vec![
        // users
        RecordType::of::<NotificationSettings>(),
        RecordType::of::<UserPreferences>(),
        RecordType::of::<SkillLevel>(),
        RecordType::of::<ExpertiseLevel>(),
        RecordType::of::<UserFeedback>(),
        RecordType::of::<LearningInteraction>(),
        RecordType::of::<LearningContext>(),
        RecordType::of::<User>(),
        RecordType::of::<UserRegistration>(),
        RecordType::of::<LoginCredentials>(),
        // explanations
        RecordType::of::<Example>(),
        RecordType::of::<Analogy>(),
        RecordType::of::<StepByStep>(),
        RecordType::of::<ConceptExplanation>(),
        RecordType::of::<LineExplanation>(),
        RecordType::of::<Issue>(),
        RecordType::of::<CodeExplanation>(),
        RecordType::of::<Fix>(),
        RecordType::of::<DebuggingSuggestion>(),
        // knowledge base
        RecordType::of::<DocumentMetadata>(),
        RecordType::of::<KnowledgeDocument>(),
        RecordType::of::<SearchFilters>(),
        RecordType::of::<SearchResult>(),
        RecordType::of::<IngestionResult>(),
        RecordType::of::<GenerationContext>(),
        // sessions
        RecordType::of::<ConversationMessage>(),
        RecordType::of::<SessionContext>(),
        RecordType::of::<UserContext>(),
        // learning paths
        RecordType::of::<LearningResource>(),
        RecordType::of::<Milestone>(),
        RecordType::of::<LearningPath>(),
        // progress
        RecordType::of::<SkillImprovement>(),
        RecordType::of::<ProgressMetrics>(),
        RecordType::of::<AnalyticsData>(),
        // assessment
        RecordType::of::<SkillAssessment>(),
        RecordType::of::<PersonalizedResponse>(),
        RecordType::of::<WorkflowOptimization>(),
        // api
        RecordType::of::<AuthResponse>(),
        RecordType::of::<ApiResponse>(),
        RecordType::of::<PaginatedResponse>(),
        RecordType::of::<ApiError>(),
    ]
}
