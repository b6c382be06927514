use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // numeric user id
    pub exp: usize,  // expiry (unix)
    pub iat: usize,  // issued at
}

impl Claims {
    /// The subject as a user id, if it is a positive integer.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.trim().parse::<i64>().ok().filter(|id| *id > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::Claims;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn subject_must_be_a_positive_integer() {
        assert_eq!(claims("12345").user_id(), Some(12345));
        assert_eq!(claims("0").user_id(), None);
        assert_eq!(claims("-4").user_id(), None);
        assert_eq!(claims("user@example.com").user_id(), None);
    }
}
