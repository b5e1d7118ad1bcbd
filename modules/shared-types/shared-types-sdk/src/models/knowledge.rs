//! Knowledge-base documents and the records the retrieval pipeline exchanges.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use super::enums::{DifficultyLevel, DocumentType};
use crate::decode::{Decode, DecodeContext, decode_object, non_negative, unit_interval};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct DocumentMetadata {
    pub author: String,
    pub created_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
}

impl Decode for DocumentMetadata {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let author = r.required("author");
            let created_date = r.required("created_date");
            let last_updated = r.required("last_updated");
            let version = r.required("version");
            let language = r.optional("language");
            let framework = r.optional("framework");
            Some(Self {
                author: author?,
                created_date: created_date?,
                last_updated: last_updated?,
                version: version?,
                language: language?,
                framework: framework?,
            })
        })
    }
}

/// A unit of retrievable knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct KnowledgeDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub document_type: DocumentType,
    #[serde(default)]
    pub topics: Vec<String>,
    pub difficulty_level: DifficultyLevel,
    pub source: String,
    /// Embedding of `content`. The dimension belongs to the embedding model
    /// and is not checked here.
    #[serde(default)]
    pub embedding_vector: Vec<f64>,
    pub metadata: DocumentMetadata,
}

impl Decode for KnowledgeDocument {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let id = r.required("id");
            let title = r.required("title");
            let content = r.required("content");
            let document_type = r.required("document_type");
            let topics = r.or_default("topics");
            let difficulty_level = r.required("difficulty_level");
            let source = r.required("source");
            let embedding_vector = r.or_default("embedding_vector");
            let metadata = r.required("metadata");
            Some(Self {
                id: id?,
                title: title?,
                content: content?,
                document_type: document_type?,
                topics: topics?,
                difficulty_level: difficulty_level?,
                source: source?,
                embedding_vector: embedding_vector?,
                metadata: metadata?,
            })
        })
    }
}

/// Narrowing applied to a knowledge search. Absent filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<Vec<DocumentType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Named bounds, e.g. `start` and `end`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<BTreeMap<String, DateTime<Utc>>>,
}

impl Decode for SearchFilters {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let topics = r.optional("topics");
            let difficulty_level = r.optional("difficulty_level");
            let document_type = r.optional("document_type");
            let language = r.optional("language");
            let date_range = r.optional("date_range");
            Some(Self {
                topics: topics?,
                difficulty_level: difficulty_level?,
                document_type: document_type?,
                language: language?,
                date_range: date_range?,
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SearchResult {
    /// Identifier of the matched [`KnowledgeDocument`].
    pub document_id: String,
    pub title: String,
    pub content_snippet: String,
    #[schemars(range(min = 0.0, max = 1.0))]
    pub relevance_score: f64,
    pub metadata: DocumentMetadata,
}

impl Decode for SearchResult {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let document_id = r.required("document_id");
            let title = r.required("title");
            let content_snippet = r.required("content_snippet");
            let relevance_score = r.required_with("relevance_score", unit_interval);
            let metadata = r.required("metadata");
            Some(Self {
                document_id: document_id?,
                title: title?,
                content_snippet: content_snippet?,
                relevance_score: relevance_score?,
                metadata: metadata?,
            })
        })
    }
}

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct IngestionResult {
    pub documents_processed: i64,
    pub documents_failed: i64,
    pub total_chunks: i64,
    /// Seconds.
    #[schemars(range(min = 0.0))]
    pub processing_time: f64,
}

impl Decode for IngestionResult {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let documents_processed = r.required("documents_processed");
            let documents_failed = r.required("documents_failed");
            let total_chunks = r.required("total_chunks");
            let processing_time = r.required_with("processing_time", non_negative);
            Some(Self {
                documents_processed: documents_processed?,
                documents_failed: documents_failed?,
                total_chunks: total_chunks?,
                processing_time: processing_time?,
            })
        })
    }
}

const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.7;

/// Retrieved material handed to the answer generator.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct GenerationContext {
    pub query: String,
    pub retrieved_documents: Vec<SearchResult>,
    pub context_text: String,
    #[serde(default = "default_relevance_threshold")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub relevance_threshold: f64,
}

const fn default_relevance_threshold() -> f64 {
    DEFAULT_RELEVANCE_THRESHOLD
}

impl Decode for GenerationContext {
    fn decode(value: &Value, cx: &mut DecodeContext) -> Option<Self> {
        decode_object(value, cx, |r| {
            let query = r.required("query");
            let retrieved_documents = r.required("retrieved_documents");
            let context_text = r.required("context_text");
            let relevance_threshold = r.or_else_with(
                "relevance_threshold",
                DEFAULT_RELEVANCE_THRESHOLD,
                unit_interval,
            );
            Some(Self {
                query: query?,
                retrieved_documents: retrieved_documents?,
                context_text: context_text?,
                relevance_threshold: relevance_threshold?,
            })
        })
    }
}

crate::impl_record!(
    DocumentMetadata,
    KnowledgeDocument,
    SearchFilters,
    SearchResult,
    IngestionResult,
    GenerationContext,
);
