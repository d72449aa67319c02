use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::types::{AuthError, Claims, User};

/// Issues and verifies the HS256 tokens that carry the acting user's
/// identity and role between requests.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Creates a service keyed from `JWT_SECRET`.
    pub fn new() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Generates a short-lived access token carrying the user's id and role.
    pub fn generate_access_token(&self, user: &User) -> Result<String, AuthError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(1))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            exp: expiration,
            iat: Utc::now().timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Generates a long-lived refresh token carrying only the user's id.
    pub fn generate_refresh_token(&self, user_id: &Uuid) -> Result<String, AuthError> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::days(30))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            email: String::new(),
            role: String::new(),
            exp: expiration,
            iat: Utc::now().timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verifies a token and returns its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }

    /// Verifies a token and extracts the actor facts the rest of the system
    /// relies on: the user id and whether the role is administrator.
    pub fn extract_actor_from_token(&self, token: &str) -> Result<(Uuid, bool), AuthError> {
        let claims = self.verify_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            AuthError::Jwt(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidSubject,
            ))
        })?;

        Ok((user_id, claims.role == "admin"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "camper@example.com".to_string(),
            name: "Camper".to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = JwtService::new();
        let user = user("user");

        let token = service.generate_access_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_actor_facts_come_from_the_role_claim() {
        let service = JwtService::new();

        let admin = user("admin");
        let token = service.generate_access_token(&admin).unwrap();
        let (id, is_admin) = service.extract_actor_from_token(&token).unwrap();
        assert_eq!(id, admin.id);
        assert!(is_admin);

        let regular = user("user");
        let token = service.generate_access_token(&regular).unwrap();
        let (_, is_admin) = service.extract_actor_from_token(&token).unwrap();
        assert!(!is_admin);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = JwtService::new();
        assert!(service.verify_token("not-a-token").is_err());
    }
}
