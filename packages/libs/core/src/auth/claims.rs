//! 토큰 Claims
//!
//! Bearer 토큰의 페이로드 구조입니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access Token Claims
///
/// `iat`/`exp`는 unix 초 단위로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (credential identity)
    pub sub: String,

    /// 발급 시각
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// 만료 시각
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl TokenClaims {
    /// `now`를 초 단위로 내림하여 claims 생성
    pub fn new(sub: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        Self {
            sub: sub.into(),
            iat,
            exp: iat.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// `now < exp`일 때만 유효
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.exp
    }

    /// 남은 TTL (초)
    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_as_unix_seconds() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::new("operum", now, Duration::hours(24));

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "operum");
        assert_eq!(json["iat"], 1_700_000_000i64);
        assert_eq!(json["exp"], 1_700_086_400i64);
    }

    #[test]
    fn test_iat_is_truncated_to_seconds() {
        let now = DateTime::from_timestamp(1_700_000_000, 750_000_000).unwrap();
        let claims = TokenClaims::new("operum", now, Duration::seconds(10));
        assert_eq!(claims.iat.timestamp_subsec_nanos(), 0);
        assert_eq!(claims.exp.timestamp(), 1_700_000_010);
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::new("operum", now, Duration::seconds(60));

        assert!(!claims.is_expired_at(now));
        assert!(!claims.is_expired_at(now + Duration::seconds(59)));
        assert!(claims.is_expired_at(now + Duration::seconds(60)));
        assert_eq!(claims.remaining_ttl(now), 60);
        assert_eq!(claims.remaining_ttl(now + Duration::hours(1)), 0);
    }
}
