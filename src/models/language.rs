//! Language code sets accepted at the different edges of the service.
//!
//! The question bank, the interview UI and the speech API each speak their
//! own dialect of language codes. They are kept as separate sets on purpose:
//! `tc`/`sc` are UI locales with no question bank behind them, and the speech
//! API wants full locale tags.

/// Language whose feedback templates back-fill every other language.
pub const BASE_LANGUAGE: &str = "en";

/// Languages a question may be uploaded under. New bank partitions can only be
/// created for one of these.
pub const QUESTION_LANGUAGES: &[&str] = &["en", "es", "fr", "de", "zh", "ja", "ko"];

/// Locales of the interview front end (English, Traditional and Simplified Chinese).
pub const INTERVIEW_LOCALES: &[&str] = &["en", "tc", "sc"];

pub const TRANSCRIPTION_LOCALES: &[&str] = &[
    "en-US",
    "en-GB",
    "es-ES",
    "fr-FR",
    "de-DE",
    "ja-JP",
    "ko-KR",
    "cmn-Hans-CN",
    "cmn-Hant-TW",
    "yue-Hant-HK",
];

pub fn is_question_language(code: &str) -> bool {
    QUESTION_LANGUAGES.contains(&code)
}

pub fn is_interview_locale(code: &str) -> bool {
    INTERVIEW_LOCALES.contains(&code)
}

pub fn is_transcription_locale(code: &str) -> bool {
    TRANSCRIPTION_LOCALES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_stay_independent() {
        assert!(is_interview_locale("tc"));
        assert!(!is_question_language("tc"));
        assert!(is_question_language("ko"));
        assert!(!is_interview_locale("ko"));
        assert!(is_transcription_locale("yue-Hant-HK"));
        assert!(!is_transcription_locale("en"));
    }
}
