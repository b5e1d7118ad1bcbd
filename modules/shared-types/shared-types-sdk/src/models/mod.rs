//! Record types grouped by the part of the platform that owns them.

pub mod api;
pub mod assessment;
pub mod enums;
pub mod explanation;
pub mod knowledge;
pub mod path;
pub mod progress;
pub mod session;
pub mod user;

pub use api::{ApiError, ApiResponse, AuthResponse, PaginatedResponse, ValidationViolation};
pub use assessment::{PersonalizedResponse, SkillAssessment, WorkflowOptimization};
pub use enums::{
    DifficultyLevel, DocumentType, ExplanationDepth, ExplanationStyle, InteractionType,
    IssueSeverity, IssueType, UnknownVariant,
};
pub use explanation::{
    Analogy, CodeExplanation, ConceptExplanation, DebuggingSuggestion, Example, Fix, Issue,
    LineExplanation, StepByStep,
};
pub use knowledge::{
    DocumentMetadata, GenerationContext, IngestionResult, KnowledgeDocument, SearchFilters,
    SearchResult,
};
pub use path::{LearningPath, LearningResource, Milestone};
pub use progress::{AnalyticsData, ProgressMetrics, SkillImprovement};
pub use session::{ConversationMessage, SessionContext, UserContext};
pub use user::{
    ExpertiseLevel, LearningContext, LearningInteraction, LoginCredentials, NotificationSettings,
    SkillLevel, User, UserFeedback, UserPreferences, UserRegistration,
};
