//! Test action capability
//!
//! A test action is anything that can be invoked with a [`TestContext`] and eventually yields
//! a [`TestOutcome`]. Async closures implement [`TestAction`] directly; synchronous closures are
//! adapted through [`SyncAction`].

use std::future::Future;

use futures::future::BoxFuture;

use super::context::TestContext;
use crate::errors::TestOutcome;

/// Something the runner can execute as a test body.
pub trait TestAction: Send + Sync {
    /// Start the action. Nothing observable may happen before the returned future is polled.
    fn invoke<'a>(&'a self, ctx: TestContext) -> BoxFuture<'a, TestOutcome>;
}

impl<F, Fut> TestAction for F
where
    F: Fn(TestContext) -> Fut + Send + Sync,
    Fut: Future<Output = TestOutcome> + Send + 'static,
{
    fn invoke<'a>(&'a self, ctx: TestContext) -> BoxFuture<'a, TestOutcome> {
        Box::pin(async move { self(ctx).await })
    }
}

/// Adapter running a synchronous closure as a test action.
pub struct SyncAction<F>(pub F);

impl<F> TestAction for SyncAction<F>
where
    F: Fn(&TestContext) -> TestOutcome + Send + Sync,
{
    fn invoke<'a>(&'a self, ctx: TestContext) -> BoxFuture<'a, TestOutcome> {
        Box::pin(async move { (self.0)(&ctx) })
    }
}
