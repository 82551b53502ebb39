//! Cancellation and deadlines for running evaluations.
//!
//! A `Context` is shared between the embedder and the evaluator. The
//! embedder derives contexts with a timeout, a deadline or a cancel
//! handle; the evaluator polls `err()` at loop iterations and calls and
//! aborts with the cause as a script error.
//!
//! Contexts form a tree: a derived context is done as soon as any of its
//! ancestors is done.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a context is done.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cancelled {
    /// The deadline of this context or an ancestor passed.
    DeadlineExceeded,
    /// A `CancelHandle` of this context or an ancestor was triggered.
    Canceled,
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cancelled::DeadlineExceeded => "context deadline exceeded",
            Cancelled::Canceled => "context canceled",
        })
    }
}

impl std::error::Error for Cancelled {}

#[derive(Debug)]
struct Node {
    deadline: Option<Instant>,
    cancelled: AtomicBool,
    parent: Option<Context>,
}

/// Cheaply cloneable, thread-safe cancellation context.
#[derive(Clone, Debug)]
pub struct Context {
    node: Arc<Node>,
}

/// Cancels the context it was created with (and everything derived
/// from it). Dropping the handle does not cancel.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    node: Arc<Node>,
}

/// Granularity of `Context::sleep` checks against cancellation.
const SLEEP_SLICE: Duration = Duration::from_millis(5);

impl Context {
    /// Root context: never done.
    pub fn background() -> Self {
        Context {
            node: Arc::new(Node {
                deadline: None,
                cancelled: AtomicBool::new(false),
                parent: None,
            }),
        }
    }

    fn derive(&self, deadline: Option<Instant>) -> Self {
        Context {
            node: Arc::new(Node {
                deadline,
                cancelled: AtomicBool::new(false),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Child context that is done `timeout` from now.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.derive(Instant::now().checked_add(timeout))
    }

    /// Child context that is done at `deadline`.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.derive(Some(deadline))
    }

    /// Child context plus a handle that cancels it.
    #[must_use]
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let ctx = self.derive(None);
        let handle = CancelHandle {
            node: Arc::clone(&ctx.node),
        };
        (ctx, handle)
    }

    /// `Some(cause)` once this context or an ancestor is done.
    pub fn err(&self) -> Option<Cancelled> {
        let mut current = Some(self);
        let now = Instant::now();
        while let Some(ctx) = current {
            if ctx.node.cancelled.load(Ordering::Acquire) {
                return Some(Cancelled::Canceled);
            }
            if ctx.node.deadline.is_some_and(|deadline| now >= deadline) {
                return Some(Cancelled::DeadlineExceeded);
            }
            current = ctx.node.parent.as_ref();
        }
        None
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Earliest deadline along the ancestor chain.
    pub fn deadline(&self) -> Option<Instant> {
        let own = self.node.deadline;
        let inherited = self.node.parent.as_ref().and_then(Context::deadline);
        match (own, inherited) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Block for `duration`, returning early with the cause if the
    /// context is done first.
    pub fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
        let end = Instant::now() + duration;
        loop {
            if let Some(cause) = self.err() {
                return Err(cause);
            }
            let now = Instant::now();
            if now >= end {
                return Ok(());
            }
            let mut slice = (end - now).min(SLEEP_SLICE);
            if let Some(deadline) = self.deadline() {
                slice = slice.min(deadline.saturating_duration_since(now));
            }
            std::thread::sleep(slice);
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::background()
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.node.cancelled.store(true, Ordering::Release);
    }
}
