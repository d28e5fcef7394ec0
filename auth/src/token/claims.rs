use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Payload embedded in every issued token.
///
/// `iat` and `exp` are RFC 7519 NumericDates carried with millisecond
/// precision, so the decoded expiration is exactly `iat` plus the window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Login of the authenticated branch
    pub sub: String,

    /// Issued at
    #[serde(with = "numeric_date")]
    pub iat: DateTime<Utc>,

    /// Expiration time
    #[serde(with = "numeric_date")]
    pub exp: DateTime<Utc>,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Build claims for a login issued at `issued_at` and expiring at `expires_at`.
    pub fn for_login(
        login: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: login.to_string(),
            iat: issued_at,
            exp: expires_at,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// A token is usable strictly before its expiration instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.exp
    }
}

/// Serde adapter between `DateTime<Utc>` and fractional Unix seconds.
mod numeric_date {
    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;
    use serde::de::Error;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = instant.timestamp_millis();
        if millis % 1000 == 0 {
            serializer.serialize_i64(millis / 1000)
        } else {
            serializer.serialize_f64(millis as f64 / 1000.0)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = f64::deserialize(deserializer)?;
        if !seconds.is_finite() {
            return Err(D::Error::custom("NumericDate is not a finite number"));
        }

        let millis = (seconds * 1000.0).round() as i64;
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| D::Error::custom("NumericDate out of range"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    fn instant(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_for_login() {
        let iat = instant(1_700_000_000_000);
        let claims = Claims::for_login("a@b.com", iat, iat + Duration::hours(1));

        assert_eq!(claims.sub, "a@b.com");
        assert_eq!(claims.exp - claims.iat, Duration::hours(1));
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_unique_jti() {
        let iat = instant(1_700_000_000_000);
        let first = Claims::for_login("a@b.com", iat, iat);
        let second = Claims::for_login("a@b.com", iat, iat);
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::for_login("a@b.com", instant(0), instant(1000));

        assert!(!claims.is_expired(instant(999))); // Not expired
        assert!(claims.is_expired(instant(1000))); // Exactly at expiration
        assert!(claims.is_expired(instant(1001))); // Expired
    }

    #[test]
    fn test_numeric_date_keeps_milliseconds() {
        let claims = Claims::for_login(
            "a@b.com",
            instant(1_700_000_000_123),
            instant(1_700_000_003_623),
        );

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["iat"].as_f64(), Some(1_700_000_000.123));

        let decoded: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_numeric_date_whole_seconds_are_integers() {
        let claims = Claims::for_login("a@b.com", instant(1_700_000_000_000), instant(0));

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["iat"].as_i64(), Some(1_700_000_000));
        assert_eq!(json["exp"].as_i64(), Some(0));
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let result = serde_json::from_str::<Claims>(r#"{"iat":1,"exp":2,"jti":"x"}"#);
        assert!(result.is_err());
    }
}
