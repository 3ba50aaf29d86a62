//! Request-scoped trace identifier for correlating logs with error responses.
//!
//! The identifier lives in Tokio task-local storage, so it is visible to
//! everything polled inside [`TraceId::scope`] but not to spawned tasks.
//! Re-enter the scope explicitly when moving work elsewhere.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use user_registry::domain::TraceId;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let observed = TraceId::scope(trace_id, async { TraceId::current() }).await;
/// assert_eq!(observed, Some(trace_id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random trace identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier in scope for the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Poll `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scope_exposes_identifier_only_inside() {
        let trace_id = TraceId::generate();
        let inside = TraceId::scope(trace_id, async { TraceId::current() }).await;
        assert_eq!(inside, Some(trace_id));
        assert_eq!(TraceId::current(), None);
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_scope() {
        let trace_id = TraceId::generate();
        let spawned = TraceId::scope(trace_id, async {
            tokio::spawn(async { TraceId::current() }).await
        })
        .await
        .expect("task joins");
        assert_eq!(spawned, None);
    }

    #[test]
    fn display_and_parse_agree() {
        let trace_id = TraceId::generate();
        let parsed: TraceId = trace_id.to_string().parse().expect("valid UUID");
        assert_eq!(parsed, trace_id);
    }

    #[test]
    fn parse_rejects_non_uuid() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }
}
