//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! 呼び出し（invocation）ごとに ULID を割り当てます。
//! - **時刻でソート可能**: ログを生成順に並べられる
//! - **分散生成可能**: ホストが複数あっても調整不要
//!
//! `Id<T>` は PhantomData のマーカー型で種類を区別します。
//! 今のところ種類は invocation だけですが、blob 書き込みの通知や
//! ログに載る ID を他の ID と混同させないために型を分けています。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックスを提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// テスト用: u128 から決定的な Id を作成
    pub fn from_u128(value: u128) -> Self {
        Self::from_ulid(Ulid::from_bytes(value.to_be_bytes()))
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// Function invocation のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Invocation {}

impl IdMarker for Invocation {
    fn prefix() -> &'static str {
        "invocation-"
    }
}

/// Identifier of one function execution (the owner of every binder it prepares).
pub type FunctionInstanceId = Id<Invocation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_prefix() {
        let id = FunctionInstanceId::from_ulid(Ulid::new());
        assert!(id.to_string().starts_with("invocation-"));
    }

    #[test]
    fn from_u128_is_deterministic() {
        let a = FunctionInstanceId::from_u128(42);
        let b = FunctionInstanceId::from_u128(42);
        assert_eq!(a, b);
        assert_ne!(a, FunctionInstanceId::from_u128(43));
    }

    #[test]
    fn ids_can_be_serialized() {
        let id = FunctionInstanceId::from_ulid(Ulid::new());

        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: FunctionInstanceId = serde_json::from_str(&serialized).unwrap();

        assert_eq!(id, deserialized);
    }

    #[test]
    fn phantom_data_does_not_consume_memory() {
        use std::mem::size_of;
        assert_eq!(size_of::<FunctionInstanceId>(), size_of::<Ulid>());
    }
}
