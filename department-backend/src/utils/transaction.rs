// department-backend/src/utils/transaction.rs

//! トランザクション管理の統一化
//!
//! 変更系のサービス操作はすべてここを経由します。
//! クロージャが `Ok` を返せばコミット、`Err` を返せばロールバックします。
//! 途中状態がトランザクションの外から観測されることはありません。

use crate::error::AppError;
use sea_orm::{DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};
use std::fmt;
use std::future::Future;
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// トランザクションの状態
// =============================================================================

/// 変更操作1回あたりの状態遷移
///
/// 成功時: `Started → Validated → Written → Committed`
/// 失敗時: いずれかの段階から `RolledBack`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionPhase {
    Started,
    Validated,
    Written,
    Committed,
    RolledBack,
}

impl fmt::Display for TransactionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            TransactionPhase::Started => "started",
            TransactionPhase::Validated => "validated",
            TransactionPhase::Written => "written",
            TransactionPhase::Committed => "committed",
            TransactionPhase::RolledBack => "rolled_back",
        };
        f.write_str(phase)
    }
}

/// サービス層から状態遷移を記録する
pub fn record_phase(operation: &str, phase: TransactionPhase) {
    debug!(operation = %operation, phase = %phase, "Transaction phase");
}

// =============================================================================
// トランザクション管理トレイト
// =============================================================================

// Future型エイリアス（Boxed Future）
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// トランザクション実行を抽象化するトレイト
pub trait TransactionManager {
    /// 既定の分離レベル（READ COMMITTED）で操作を実行
    fn execute_in_transaction<F, R>(
        &self,
        operation: F,
    ) -> impl Future<Output = Result<R, AppError>> + Send
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>
            + Send
            + 'static,
        R: Send + 'static;

    /// 分離レベルを指定して操作を実行
    fn execute_in_transaction_with<F, R>(
        &self,
        isolation_level: Option<IsolationLevel>,
        operation: F,
    ) -> impl Future<Output = Result<R, AppError>> + Send
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>
            + Send
            + 'static,
        R: Send + 'static;
}

// DatabaseConnection への実装
impl TransactionManager for DatabaseConnection {
    fn execute_in_transaction<F, R>(
        &self,
        operation: F,
    ) -> impl Future<Output = Result<R, AppError>> + Send
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>
            + Send
            + 'static,
        R: Send + 'static,
    {
        self.execute_in_transaction_with(None, operation)
    }

    #[instrument(skip(self, operation), name = "database_transaction")]
    #[allow(clippy::manual_async_fn)]
    fn execute_in_transaction_with<F, R>(
        &self,
        isolation_level: Option<IsolationLevel>,
        operation: F,
    ) -> impl Future<Output = Result<R, AppError>> + Send
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>
            + Send
            + 'static,
        R: Send + 'static,
    {
        async move {
            let transaction_start = std::time::Instant::now();

            let txn = self
                .begin_with_config(isolation_level, None)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to begin transaction");
                    AppError::from(e)
                })?;
            debug!(phase = %TransactionPhase::Started, "Transaction started");

            match operation(&txn).await {
                Ok(value) => {
                    // SERIALIZABLE ではコミット時に競合が検出されることがある
                    txn.commit().await.map_err(|e| {
                        error!(error = %e, "Failed to commit transaction");
                        AppError::from(e)
                    })?;

                    info!(
                        phase = %TransactionPhase::Committed,
                        duration_ms = transaction_start.elapsed().as_millis(),
                        "Transaction completed successfully"
                    );

                    Ok(value)
                }
                Err(app_error) => {
                    warn!(error = %app_error, "Transaction operation failed, rolling back");

                    // 接続断ではロールバック自体が失敗するが、サーバー側で破棄されるため元のエラーを返す
                    if let Err(rollback_error) = txn.rollback().await {
                        error!(
                            original_error = %app_error,
                            rollback_error = %rollback_error,
                            "Failed to rollback transaction"
                        );
                    }

                    warn!(
                        phase = %TransactionPhase::RolledBack,
                        duration_ms = transaction_start.elapsed().as_millis(),
                        "Transaction rolled back"
                    );

                    Err(app_error)
                }
            }
        }
    }
}

// =============================================================================
// 便利なマクロ
// =============================================================================

/// トランザクション内での操作を簡単に記述するマクロ
#[macro_export]
macro_rules! with_transaction {
    ($db:expr, |$txn:ident| $body:expr) => {{
        use $crate::utils::transaction::TransactionManager;

        $db.execute_in_transaction(move |$txn| Box::pin($body))
            .await
    }};
}
