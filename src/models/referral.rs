use serde::Deserialize;

/// Query identifying a single referral link.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferralPair {
    pub referrer_tg_id: i64,
    pub referred_tg_id: i64,
    /// Overrides the configured admin id when present.
    pub tg_id: Option<i64>,
}

impl ReferralPair {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("referrer_tg_id", self.referrer_tg_id.to_string()),
            ("referred_tg_id", self.referred_tg_id.to_string()),
        ];
        if let Some(tg_id) = self.tg_id {
            query.push(("tg_id", tg_id.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_without_override() {
        let pair = ReferralPair {
            referrer_tg_id: 10,
            referred_tg_id: 20,
            tg_id: None,
        };
        assert_eq!(
            pair.to_query(),
            vec![("referrer_tg_id", "10".to_string()), ("referred_tg_id", "20".to_string())]
        );
    }

    #[test]
    fn query_with_override() {
        let pair: ReferralPair =
            serde_json::from_str(r#"{"referrer_tg_id": 1, "referred_tg_id": 2, "tg_id": 3}"#).unwrap();
        assert_eq!(pair.to_query().last(), Some(&("tg_id", "3".to_string())));
    }
}
