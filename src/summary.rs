use crate::models::Account;
use crate::stats::compute_stats;
use std::fmt;

/// The audit text call is opaque to the rest of the app: accounts in,
/// prose out. It may be slow and it may fail; neither blocks a request.
pub trait AuditGenerator: Send + Sync {
    fn generate(&self, accounts: &[Account]) -> Result<String, SummaryError>;
}

#[derive(Debug)]
pub struct SummaryError(pub String);

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "summary generation failed: {}", self.0)
    }
}

impl std::error::Error for SummaryError {}

/// Built-in generator that writes the audit from the derived stats.
/// Stands in for the remote text-generation service; swap it behind the
/// trait to call a real one.
pub struct TemplateAuditGenerator;

impl AuditGenerator for TemplateAuditGenerator {
    fn generate(&self, accounts: &[Account]) -> Result<String, SummaryError> {
        if accounts.is_empty() {
            return Ok("No accounts on file. Add a subscription to start tracking revenue."
                .to_string());
        }

        let stats = compute_stats(accounts);
        let expired = accounts.len() - stats.active_accounts;
        let mut text = format!(
            "Portfolio holds {} account(s): {} active, {} expired. \
             Lifetime revenue ${:.0}, of which ${:.0} was collected this month.",
            accounts.len(),
            stats.active_accounts,
            expired,
            stats.total_revenue,
            stats.this_month_revenue,
        );
        if stats.expiring_soon > 0 {
            text.push_str(&format!(
                " Attention: {} subscription(s) expire within the next 3 days.",
                stats.expiring_soon
            ));
        } else {
            text.push_str(" No subscriptions are at immediate risk of lapsing.");
        }
        Ok(text)
    }
}

/// Cached audit text tagged with the collection generation it was built
/// from. Every mutation bumps the generation, so a tag that no longer
/// matches means the text is stale and a regeneration is due. Only one
/// generation attempt runs at a time per generation; a duplicate poll
/// while one is in flight just sees "pending".
#[derive(Debug, Default)]
pub struct AuditCache {
    generation: u64,
    cached: Option<(u64, String)>,
    in_flight: Option<u64>,
}

impl AuditCache {
    /// Called after every add/renew/remove.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        // a computation already running is for an older generation now;
        // its result will land as stale text, and the next poll retries
        self.in_flight = None;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Text matching the current collection, if any.
    pub fn fresh_text(&self) -> Option<&str> {
        match &self.cached {
            Some((generation, text)) if *generation == self.generation => Some(text),
            _ => None,
        }
    }

    /// Whatever text we last produced, fresh or not. Shown while a new
    /// summary is brewing rather than blanking the panel.
    pub fn any_text(&self) -> Option<&str> {
        self.cached.as_ref().map(|(_, text)| text.as_str())
    }

    /// Claims the right to generate for the current generation. Returns
    /// the generation token to report back with, or `None` when the
    /// cache is already fresh or another attempt is under way.
    pub fn begin(&mut self) -> Option<u64> {
        if self.fresh_text().is_some() || self.in_flight == Some(self.generation) {
            return None;
        }
        self.in_flight = Some(self.generation);
        Some(self.generation)
    }

    /// Applies a finished generation attempt. A failure keeps the prior
    /// text; a success is stored under its token and is fresh only if
    /// the collection has not moved on since.
    pub fn complete(&mut self, generation: u64, result: Result<String, SummaryError>) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
        if let Ok(text) = result {
            let newer = self
                .cached
                .as_ref()
                .is_none_or(|(cached_generation, _)| *cached_generation < generation);
            if newer {
                self.cached = Some((generation, text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_accounts;

    #[test]
    fn template_generator_mentions_counts() {
        let text = TemplateAuditGenerator.generate(&seed_accounts()).unwrap();
        assert!(text.contains("2 account(s)"));
    }

    #[test]
    fn template_generator_handles_empty_collection() {
        let text = TemplateAuditGenerator.generate(&[]).unwrap();
        assert!(text.contains("No accounts"));
    }

    #[test]
    fn fresh_text_requires_matching_generation() {
        let mut cache = AuditCache::default();
        let token = cache.begin().expect("first begin claims the slot");
        cache.complete(token, Ok("audit v1".to_string()));

        assert_eq!(cache.fresh_text(), Some("audit v1"));

        cache.invalidate();
        assert_eq!(cache.fresh_text(), None);
        assert_eq!(cache.any_text(), Some("audit v1"));
    }

    #[test]
    fn begin_suppresses_duplicate_attempts() {
        let mut cache = AuditCache::default();
        assert!(cache.begin().is_some());
        assert!(cache.begin().is_none());
    }

    #[test]
    fn begin_is_a_no_op_while_fresh() {
        let mut cache = AuditCache::default();
        let token = cache.begin().unwrap();
        cache.complete(token, Ok("audit".to_string()));
        assert!(cache.begin().is_none());
    }

    #[test]
    fn invalidation_reopens_the_slot() {
        let mut cache = AuditCache::default();
        let token = cache.begin().unwrap();
        cache.complete(token, Ok("audit".to_string()));

        cache.invalidate();
        assert!(cache.begin().is_some());
    }

    #[test]
    fn late_result_is_kept_but_stale() {
        let mut cache = AuditCache::default();
        let token = cache.begin().unwrap();
        cache.invalidate();
        cache.complete(token, Ok("computed for old state".to_string()));

        assert_eq!(cache.fresh_text(), None);
        assert_eq!(cache.any_text(), Some("computed for old state"));
    }

    #[test]
    fn failure_preserves_prior_text_and_allows_retry() {
        let mut cache = AuditCache::default();
        let token = cache.begin().unwrap();
        cache.complete(token, Ok("good audit".to_string()));

        cache.invalidate();
        let retry = cache.begin().unwrap();
        cache.complete(retry, Err(SummaryError("service down".to_string())));

        assert_eq!(cache.any_text(), Some("good audit"));
        assert!(cache.begin().is_some(), "retry allowed after failure");
    }
}
