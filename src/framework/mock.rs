//! # Mock Source
//!
//! A [`RemoteSource`] with scripted replies for testing controllers without a backend.
//!
//! Queue replies with [`MockSource::expect_query`], hand a clone to the controller,
//! then inspect [`MockSource::calls`] and finish with [`MockSource::verify`].
//!
//! ```ignore
//! let mock = MockSource::<AccessEntry>::new();
//! mock.expect_query().after(Duration::from_secs(2)).return_ok(entries, None);
//! mock.expect_query().return_err(SourceError::Status(503));
//!
//! let (actor, client) = ListQueryActor::new(options, Arc::new(mock.clone()), &config);
//! // ...
//! mock.verify(); // every scripted reply was consumed
//! ```

use crate::framework::SourceError;
use crate::sources::{PageMeta, RemotePage, RemoteQuery, RemoteSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

enum Reply<T> {
    Page(RemotePage<T>),
    Fail(SourceError),
    Panic,
}

struct Expectation<T> {
    delay: Duration,
    reply: Reply<T>,
}

/// Scripted source. Replies are consumed in call order; a call with nothing
/// scripted fails with a transport error.
pub struct MockSource<T> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    calls: Arc<Mutex<Vec<RemoteQuery>>>,
}

impl<T> Clone for MockSource<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T> Default for MockSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MockSource<T> {
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scripts the reply to the next unscripted call.
    pub fn expect_query(&self) -> QueryExpectationBuilder<T> {
        QueryExpectationBuilder {
            delay: Duration::ZERO,
            expectations: self.expectations.clone(),
        }
    }

    /// Every query received so far, in order.
    pub fn calls(&self) -> Vec<RemoteQuery> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics if scripted replies were left unconsumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for one scripted reply.
pub struct QueryExpectationBuilder<T> {
    delay: Duration,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T> QueryExpectationBuilder<T> {
    /// Holds the reply back for `delay` (virtual time under a paused runtime).
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn return_ok(self, items: Vec<T>, meta: Option<PageMeta>) {
        self.push(Reply::Page(RemotePage::new(items, meta)));
    }

    pub fn return_err(self, error: SourceError) {
        self.push(Reply::Fail(error));
    }

    /// Makes the call panic, as a buggy source would.
    pub fn panic(self) {
        self.push(Reply::Panic);
    }

    fn push(self, reply: Reply<T>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            delay: self.delay,
            reply,
        });
    }
}

#[async_trait]
impl<T: Send + 'static> RemoteSource<T> for MockSource<T> {
    async fn query(&self, query: &RemoteQuery) -> Result<RemotePage<T>, SourceError> {
        self.calls.lock().unwrap().push(query.clone());
        let next = self.expectations.lock().unwrap().pop_front();

        let Some(expectation) = next else {
            return Err(SourceError::Transport("no scripted reply".into()));
        };
        if !expectation.delay.is_zero() {
            tokio::time::sleep(expectation.delay).await;
        }
        match expectation.reply {
            Reply::Page(page) => Ok(page),
            Reply::Fail(error) => Err(error),
            Reply::Panic => panic!("scripted source panic"),
        }
    }
}
