//! 연산 컨텍스트
//!
//! 모든 저장소 연산은 호출자가 제공한 [`OperationContext`] 안에서 실행됩니다.
//! 컨텍스트는 선택적인 타임아웃과 취소 신호를 가지며, 둘 중 하나가 먼저 발생하면
//! 진행 중인 데이터베이스 호출 future를 drop하여 중단합니다.
//!
//! ```rust,ignore
//! let (ctx, cancel) = OperationContext::with_timeout(Duration::from_secs(15)).cancellable();
//! let users = storage.find_all(&ctx).await?;
//! // 다른 태스크에서: cancel.cancel();
//! ```

use std::future::pending;
use std::time::Duration;

use tokio::sync::watch;

use crate::core::errors::{AppError, AppResult};

/// 타임아웃과 취소 신호를 가진 실행 컨텍스트
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    timeout: Option<Duration>,
    cancel: Option<watch::Receiver<bool>>,
}

/// [`OperationContext`]를 취소하는 핸들
///
/// 핸들이 drop되어도 컨텍스트는 취소되지 않습니다.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl OperationContext {
    /// 타임아웃도 취소도 없는 컨텍스트
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            cancel: None,
        }
    }

    /// 취소 가능한 컨텍스트와 그 핸들을 반환합니다.
    pub fn cancellable(self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            timeout: self.timeout,
            cancel: Some(receiver),
        };
        (ctx, CancelHandle { sender })
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// 컨텍스트의 제약 아래에서 `future`를 실행합니다.
    ///
    /// # Returns
    ///
    /// * future가 먼저 끝나면 그 결과
    /// * `AppError::Cancelled` - 시작 전 또는 실행 중 취소됨
    /// * `AppError::DeadlineExceeded` - 타임아웃 경과
    pub async fn run<T, F>(&self, operation: &'static str, future: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.is_cancelled() {
            return Err(AppError::Cancelled { operation });
        }

        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => loop {
                    if *rx.borrow_and_update() {
                        break;
                    }
                    if rx.changed().await.is_err() {
                        // 핸들이 사라지면 더 이상 취소될 수 없음
                        pending::<()>().await;
                    }
                },
                None => pending::<()>().await,
            }
        };

        let deadline = async {
            match self.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            result = future => result,
            _ = cancelled => Err(AppError::Cancelled { operation }),
            _ = deadline => Err(AppError::DeadlineExceeded {
                operation,
                timeout: self.timeout.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ErrorKind;

    #[actix_web::test]
    async fn test_completes_within_deadline() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(5));
        let result = ctx.run("noop", async { Ok::<_, AppError>(42) }).await;

        assert_eq!(result.unwrap(), 42);
    }

    #[actix_web::test]
    async fn test_deadline_exceeded() {
        let ctx = OperationContext::with_timeout(Duration::from_millis(10));
        let result = ctx
            .run("slow", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, AppError>(())
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::DeadlineExceeded);
    }

    #[actix_web::test]
    async fn test_cancel_before_start() {
        let (ctx, handle) = OperationContext::background().cancellable();
        handle.cancel();

        let result = ctx.run("find users", async { Ok::<_, AppError>(()) }).await;
        let error = result.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Cancelled);
        assert!(!error.is_not_found());
    }

    #[actix_web::test]
    async fn test_cancel_in_flight() {
        let (ctx, handle) = OperationContext::background().cancellable();

        let canceller = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        };
        let operation = ctx.run("slow", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, AppError>(())
        });

        let (_, result) = tokio::join!(canceller, operation);

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Cancelled);
    }

    #[actix_web::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = OperationContext::background().cancellable();
        drop(handle);

        let result = ctx.run("noop", async { Ok::<_, AppError>("done") }).await;

        assert_eq!(result.unwrap(), "done");
    }
}
