use validator::{Validate, ValidationError};

use crate::models::language::{is_interview_locale, is_transcription_locale};

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("cannot be empty".into());
        return Err(err);
    }
    Ok(())
}

pub fn interview_locale(value: &str) -> Result<(), ValidationError> {
    if !is_interview_locale(value) {
        let mut err = ValidationError::new("unsupported_language");
        err.message = Some(format!("Language must be one of en, tc, sc (got {})", value).into());
        return Err(err);
    }
    Ok(())
}

pub fn transcription_locale(value: &str) -> Result<(), ValidationError> {
    if !is_transcription_locale(value) {
        let mut err = ValidationError::new("unsupported_language");
        err.message = Some(format!("Unsupported transcription language: {}", value).into());
        return Err(err);
    }
    Ok(())
}
