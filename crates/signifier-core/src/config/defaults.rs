// Single source of truth for all default values.

// --- Pipeline ---
pub const DEFAULT_STAGES: [&str; 4] = ["intent_matcher", "subsumption", "constraint_validator", "ranker"];
pub const DEFAULT_NARROW_ON_SUBSUMPTION: bool = false;
pub const DEFAULT_STRICT_ORDERING: bool = false;

// Hard timeouts (ms).
pub const DEFAULT_INTENT_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_SUBSUMPTION_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_VALIDATOR_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_RANKER_TIMEOUT_MS: u64 = 1_000;

// Soft latency budgets (ms).
pub const DEFAULT_TOTAL_BUDGET_MS: f64 = 150.0;
pub const DEFAULT_INTENT_BUDGET_MS: f64 = 30.0;
pub const DEFAULT_SUBSUMPTION_BUDGET_MS: f64 = 20.0;
pub const DEFAULT_VALIDATOR_BUDGET_MS: f64 = 80.0;
pub const DEFAULT_RANKER_BUDGET_MS: f64 = 10.0;

// --- Ranking ---
pub const DEFAULT_INTENT_WEIGHT: f64 = 0.7;
pub const DEFAULT_CONSTRAINT_WEIGHT: f64 = 0.2;
pub const DEFAULT_SUBSUMPTION_WEIGHT: f64 = 0.1;
pub const DEFAULT_GATE_PASS_THRESHOLD: f64 = 0.5;
pub const DEFAULT_TIE_EPSILON: f64 = 1e-9;

// --- Subsumption ---
pub const DEFAULT_TYPE_COERCION: bool = true;

// --- Matching ---
pub const DEFAULT_MATCHER_VERSION: &str = "v1";
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_CASE_SENSITIVE: bool = false;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.0;
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Validation ---
pub const DEFAULT_VALIDATION_CACHING: bool = false;
pub const DEFAULT_VALIDATION_CACHE_SIZE: u64 = 1_000;
pub const DEFAULT_VALIDATION_PARALLEL: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_RETRIEVAL_LOG_CAPACITY: usize = 10_000;
pub const DEFAULT_DEGRADATION_HISTORY_CAPACITY: usize = 1_000;
