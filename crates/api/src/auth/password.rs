use crate::error::AppError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct PasswordService;

impl PasswordService {
    pub fn validate_password_strength(password: &str) -> Result<(), String> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ));
        }
        if password.trim().is_empty() {
            return Err("Password must not be blank".to_string());
        }
        Ok(())
    }

    pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
        bcrypt::hash(password, cost).map_err(|e| AppError::Internal(e.to_string()))
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash).map_err(|e| AppError::Internal(e.to_string()))
    }
}
