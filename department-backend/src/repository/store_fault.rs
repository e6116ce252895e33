// src/repository/store_fault.rs

//! ストアエラーの分類
//!
//! `DbErr` が内包する SQLSTATE と制約名をリポジトリ層で一度だけ読み取り、
//! サービス層がパターンマッチできる `StoreFault` に変換します。
//! SQLSTATE コードはこのモジュールの外には出しません。

use sea_orm::{sqlx, DbErr, RuntimeErr};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNDEFINED_TABLE: &str = "42P01";
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
// クラス 08: 接続例外, クラス 57P: オペレータ介入（シャットダウン等）
const CONNECTION_EXCEPTION_CLASS: &str = "08";
const OPERATOR_INTERVENTION_CLASS: &str = "57P";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFault {
    UniqueViolation { constraint: Option<String> },
    ForeignKeyViolation { constraint: Option<String> },
    UndefinedTable,
    /// シリアライゼーション失敗またはデッドロック
    SerializationFailure,
    Unavailable,
    Other,
}

impl StoreFault {
    pub fn classify(err: &DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreFault::Unavailable,
            DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => {
                Self::from_sqlx(e)
            }
            _ => StoreFault::Other,
        }
    }

    fn from_sqlx(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                Self::from_sqlstate(db_err.code().as_deref(), db_err.constraint())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreFault::Unavailable,
            _ => StoreFault::Other,
        }
    }

    pub fn from_sqlstate(code: Option<&str>, constraint: Option<&str>) -> Self {
        let constraint = constraint.map(str::to_string);
        match code {
            Some(UNIQUE_VIOLATION) => StoreFault::UniqueViolation { constraint },
            Some(FOREIGN_KEY_VIOLATION) => StoreFault::ForeignKeyViolation { constraint },
            Some(UNDEFINED_TABLE) => StoreFault::UndefinedTable,
            Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => {
                StoreFault::SerializationFailure
            }
            Some(code)
                if code.starts_with(CONNECTION_EXCEPTION_CLASS)
                    || code.starts_with(OPERATOR_INTERVENTION_CLASS) =>
            {
                StoreFault::Unavailable
            }
            _ => StoreFault::Other,
        }
    }

    /// 外部キー違反が指定の制約によるものか
    pub fn is_foreign_key(&self, name: &str) -> bool {
        matches!(self, StoreFault::ForeignKeyViolation { constraint: Some(c) } if c == name)
    }
}
