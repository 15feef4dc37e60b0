//! Port interfaces for identifier suggestion
//!
//! The host owns the username-suggestion algorithm; the core only calls it.

/// Host identifier-suggestion procedure.
///
/// Given a candidate string, returns a valid local identifier that does not
/// clash with existing accounts. Implementations are expected to be
/// deterministic for a fixed snapshot of existing accounts.
pub trait IdentifierSuggester: Send + Sync {
    /// Suggest an identifier for `candidate`.
    fn suggest(&self, candidate: &str) -> String;

    /// Suggest an identifier for `candidate`, treating `allowed` as free even
    /// if an account already holds it.
    ///
    /// Used when re-deriving the identifier of an existing account so the
    /// account does not collide with itself. The default ignores `allowed`.
    fn suggest_allowing(&self, candidate: &str, allowed: &str) -> String {
        let _ = allowed;
        self.suggest(candidate)
    }
}
