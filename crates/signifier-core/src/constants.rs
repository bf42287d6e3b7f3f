/// Signifier pipeline version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Signal emitted by the intent matcher stage.
pub const SIGNAL_INTENT_SIMILARITY: &str = "intent_similarity";

/// Signal emitted by the constraint validator stage.
pub const SIGNAL_CONSTRAINT_CONFORMS: &str = "constraint_conforms";

/// Signal emitted by the structured subsumption filter stage.
pub const SIGNAL_SUBSUMPTION_PASS: &str = "subsumption_pass";

/// Every signal name the built-in stages can emit.
pub const KNOWN_SIGNALS: [&str; 3] = [
    SIGNAL_INTENT_SIMILARITY,
    SIGNAL_CONSTRAINT_CONFORMS,
    SIGNAL_SUBSUMPTION_PASS,
];

/// Separator between artifact and property in flat snapshot keys.
pub const FLAT_KEY_SEPARATOR: &str = "::";

/// Upper bound on `k` accepted in a request.
pub const MAX_TOP_K: usize = 100;

/// Returns true if `name` is a signal emitted by a built-in stage.
pub fn is_known_signal(name: &str) -> bool {
    KNOWN_SIGNALS.contains(&name)
}
