use crate::auth::{AuthService, Claims};
use crate::error::{AppError, AppResult};

/// Extract JWT claims from the Authorization header
pub(crate) fn extract_claims(
    headers: &axum::http::HeaderMap,
    auth_service: &AuthService,
) -> AppResult<Claims> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Authorization header must start with 'Bearer '".to_string())
    })?;

    auth_service.validate_token(token)
}

/// Parse the numeric user id out of validated claims
pub(crate) fn user_id_from_claims(claims: &Claims) -> AppResult<i64> {
    claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::Unauthorized("Malformed token subject".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn service() -> AuthService {
        AuthService::new("a_test_secret_long_enough_for_hs256".to_string(), 1)
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(extract_claims(&headers, &service()).is_err());
    }

    #[test]
    fn test_non_bearer_header_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Basic dXNlcjpwYXNz".parse().unwrap(),
        );
        assert!(extract_claims(&headers, &service()).is_err());
    }

    #[test]
    fn test_valid_bearer_token_round_trip() {
        let service = service();
        let token = service.generate_token("42", "alice").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );

        let claims = extract_claims(&headers, &service).unwrap();
        assert_eq!(user_id_from_claims(&claims).unwrap(), 42);
    }
}
