//! Bounded Connection Pool
//!
//! Fixed-size pool with blocking acquire and guaranteed release. Connections
//! are created once at startup and only destroyed at process shutdown; a
//! request borrows one for its lifetime through [`PooledConnection`], whose
//! `Drop` impl returns it on every exit path.
//!
//! The pool is generic over the pooled resource so the checkout discipline
//! can be exercised in tests without a live backend.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::shared::error::AppError;

/// Process-wide bounded set of reusable connections.
///
/// Invariant: every connection is either in the available queue or held by
/// exactly one in-flight [`PooledConnection`]; never both, never neither.
pub struct ConnectionPool<C> {
    inner: Arc<PoolInner<C>>,
}

struct PoolInner<C> {
    available: Mutex<VecDeque<C>>,
    permits: Arc<Semaphore>,
    size: usize,
    acquire_timeout: Option<Duration>,
}

impl<C> Clone for ConnectionPool<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Send + 'static> ConnectionPool<C> {
    /// Build a pool over an eagerly-created set of connections.
    ///
    /// With `acquire_timeout` unset, `acquire` waits indefinitely for a free
    /// connection; when set, a request that cannot be serviced within the
    /// deadline fails with [`AppError::PoolExhausted`].
    pub fn new(connections: Vec<C>, acquire_timeout: Option<Duration>) -> Self {
        let size = connections.len();
        Self {
            inner: Arc::new(PoolInner {
                available: Mutex::new(connections.into()),
                permits: Arc::new(Semaphore::new(size)),
                size,
                acquire_timeout,
            }),
        }
    }

    /// Total number of connections owned by the pool.
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// Number of connections currently checked in.
    pub fn available(&self) -> usize {
        self.inner.available.lock().len()
    }

    /// Check out a connection, waiting until one is free.
    ///
    /// The semaphore admits at most `size` holders; a permit therefore
    /// guarantees the available queue is non-empty, because connections are
    /// requeued before their permit is returned.
    pub async fn acquire(&self) -> Result<PooledConnection<C>, AppError> {
        let permits = Arc::clone(&self.inner.permits);
        let permit = match self.inner.acquire_timeout {
            Some(deadline) => tokio::time::timeout(deadline, permits.acquire_owned())
                .await
                .map_err(|_| AppError::PoolExhausted)?,
            None => permits.acquire_owned().await,
        }
        .map_err(|_| AppError::Internal("connection pool closed".into()))?;

        let conn = self.inner.available.lock().pop_front();
        debug_assert!(conn.is_some(), "semaphore permit issued with empty pool");
        let conn =
            conn.ok_or_else(|| AppError::Internal("connection pool bookkeeping desynced".into()))?;

        Ok(PooledConnection {
            conn: Some(conn),
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }
}

/// Scope-bound borrow of one pool connection.
///
/// Dereferences to the underlying connection for statement execution. The
/// connection is returned to the pool exactly once, when the handle drops:
/// on normal return, `?` propagation, or panic unwind alike. Ownership rules
/// prevent the inner connection from outliving the handle.
pub struct PooledConnection<C: Send + 'static> {
    conn: Option<C>,
    pool: Arc<PoolInner<C>>,
    _permit: OwnedSemaphorePermit,
}

impl<C: Send + 'static> std::fmt::Debug for PooledConnection<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConnection")
            .field("checked_out", &self.conn.is_some())
            .finish()
    }
}

impl<C: Send + 'static> Deref for PooledConnection<C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.conn.as_ref().expect("connection taken before drop")
    }
}

impl<C: Send + 'static> DerefMut for PooledConnection<C> {
    fn deref_mut(&mut self) -> &mut C {
        self.conn.as_mut().expect("connection taken before drop")
    }
}

impl<C: Send + 'static> Drop for PooledConnection<C> {
    fn drop(&mut self) {
        // Requeue before the permit drops so a woken waiter always finds
        // a connection.
        if let Some(conn) = self.conn.take() {
            self.pool.available.lock().push_back(conn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_pool(size: usize) -> ConnectionPool<u32> {
        ConnectionPool::new((0..size as u32).collect(), None)
    }

    #[tokio::test]
    async fn test_acquire_removes_from_available() {
        let pool = test_pool(3);
        assert_eq!(pool.available(), 3);

        let _a = pool.acquire().await.unwrap();
        let _b = pool.acquire().await.unwrap();
        assert_eq!(pool.available(), 1);
    }

    #[tokio::test]
    async fn test_drop_returns_connection() {
        let pool = test_pool(1);

        let conn = pool.acquire().await.unwrap();
        assert_eq!(pool.available(), 0);
        drop(conn);
        assert_eq!(pool.available(), 1);

        // The same connection can be checked out again.
        let again = pool.acquire().await.unwrap();
        assert_eq!(*again, 0);
    }

    #[tokio::test]
    async fn test_release_on_error_path() {
        let pool = test_pool(2);

        async fn failing_op(pool: &ConnectionPool<u32>) -> Result<(), AppError> {
            let _conn = pool.acquire().await?;
            Err(AppError::InvalidInput("bad input".into()))
        }

        assert!(failing_op(&pool).await.is_err());
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_release_on_panic() {
        let pool = test_pool(1);

        let task_pool = pool.clone();
        let handle = tokio::spawn(async move {
            let _conn = task_pool.acquire().await.unwrap();
            panic!("handler blew up mid-request");
        });
        assert!(handle.await.is_err());

        assert_eq!(pool.available(), 1);
        let _conn = pool.acquire().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_checked_out_never_exceeds_pool_size() {
        const POOL_SIZE: usize = 4;
        const TASKS: usize = 64;

        let pool = test_pool(POOL_SIZE);
        let in_use = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(TASKS);
        for _ in 0..TASKS {
            let pool = pool.clone();
            let in_use = Arc::clone(&in_use);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _conn = pool.acquire().await.unwrap();
                let now = in_use.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(1)).await;
                in_use.fetch_sub(1, Ordering::SeqCst);
            }));
        }

        // Every waiter completes: no deadlock with 16x oversubscription.
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= POOL_SIZE);
        assert_eq!(in_use.load(Ordering::SeqCst), 0);
        assert_eq!(pool.available(), POOL_SIZE);
    }

    #[tokio::test]
    async fn test_acquire_blocks_until_release() {
        let pool = test_pool(1);

        let held = pool.acquire().await.unwrap();
        let waiter_pool = pool.clone();
        let waiter = tokio::spawn(async move {
            let _conn = waiter_pool.acquire().await.unwrap();
        });

        // The waiter cannot finish while the connection is held.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(held);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_acquire_timeout_fails_with_pool_exhausted() {
        let pool = ConnectionPool::new(vec![0u32], Some(Duration::from_millis(10)));

        let _held = pool.acquire().await.unwrap();
        let err = pool.acquire().await.unwrap_err();
        assert!(matches!(err, AppError::PoolExhausted));
    }

    #[tokio::test]
    async fn test_no_timeout_by_default() {
        let pool = test_pool(1);

        let held = pool.acquire().await.unwrap();
        let waiter_pool = pool.clone();
        let waiter = tokio::spawn(async move { waiter_pool.acquire().await.is_ok() });

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(held);
        assert!(waiter.await.unwrap());
    }
}
