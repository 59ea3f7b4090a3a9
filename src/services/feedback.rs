use crate::models::language::BASE_LANGUAGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    Excellent,
    Good,
    Review,
    /// Lead-in for the missed points appended to an excellent answer.
    Consider,
}

type TierTexts = &'static [(FeedbackTier, &'static str)];

const FEEDBACK_TEXTS: &[(&str, TierTexts)] = &[
    (
        "en",
        &[
            (
                FeedbackTier::Excellent,
                "Excellent answer! You demonstrated strong understanding of the concepts.",
            ),
            (
                FeedbackTier::Good,
                "Good answer showing basic understanding. To improve, elaborate on",
            ),
            (FeedbackTier::Review, "Review these key concepts"),
            (FeedbackTier::Consider, "Consider mentioning"),
        ],
    ),
    (
        "es",
        &[
            (
                FeedbackTier::Excellent,
                "¡Excelente respuesta! Demostraste una sólida comprensión de los conceptos.",
            ),
            (
                FeedbackTier::Good,
                "Buena respuesta que muestra comprensión básica. Para mejorar, elabora sobre",
            ),
            (FeedbackTier::Review, "Revisa estos conceptos clave"),
            (FeedbackTier::Consider, "Considera mencionar"),
        ],
    ),
];

fn lookup(table: &[(&str, TierTexts)], language: &str, tier: FeedbackTier) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == language)
        .and_then(|(_, texts)| texts.iter().find(|(t, _)| *t == tier))
        .map(|(_, text)| *text)
}

fn text_from(table: &[(&str, TierTexts)], tier: FeedbackTier, language: &str) -> &'static str {
    lookup(table, language, tier)
        .or_else(|| lookup(table, BASE_LANGUAGE, tier))
        .unwrap_or_default()
}

/// Template for `tier` in `language`, falling back to English per tier.
pub fn feedback_text(tier: FeedbackTier, language: &str) -> &'static str {
    text_from(FEEDBACK_TEXTS, tier, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_language_uses_its_own_text() {
        assert_eq!(
            feedback_text(FeedbackTier::Review, "es"),
            "Revisa estos conceptos clave"
        );
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(
            feedback_text(FeedbackTier::Consider, "ko"),
            "Consider mentioning"
        );
    }

    #[test]
    fn missing_tier_falls_back_per_tier() {
        const PARTIAL: &[(&str, TierTexts)] = &[
            ("en", &[(FeedbackTier::Good, "Good"), (FeedbackTier::Review, "Review")]),
            ("fr", &[(FeedbackTier::Review, "Revoyez")]),
        ];
        assert_eq!(text_from(PARTIAL, FeedbackTier::Review, "fr"), "Revoyez");
        assert_eq!(text_from(PARTIAL, FeedbackTier::Good, "fr"), "Good");
    }
}
