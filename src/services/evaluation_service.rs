use uuid::Uuid;

use crate::database::bank::QuestionBank;
use crate::error::{Error, Result};
use crate::models::question::{Difficulty, EvaluationResult, QuestionRecord};
use crate::services::feedback::{feedback_text, FeedbackTier};

const EXCELLENT_THRESHOLD: f64 = 80.0;
const GOOD_THRESHOLD: f64 = 60.0;

#[derive(Clone)]
pub struct EvaluationService {
    bank: QuestionBank,
}

impl EvaluationService {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    /// Scores `answer` against the question whose trimmed text equals
    /// `question` in the given language and difficulty.
    pub fn evaluate(
        &self,
        question: &str,
        answer: &str,
        difficulty: &str,
        language: &str,
    ) -> Result<EvaluationResult> {
        let difficulty: Difficulty = difficulty.parse()?;
        let record = self.bank.find_by_text(language, difficulty, question)?;
        score_answer(&record, answer, language)
    }

    pub fn evaluate_by_id(
        &self,
        question_id: Uuid,
        answer: &str,
        difficulty: &str,
        language: &str,
    ) -> Result<EvaluationResult> {
        let difficulty: Difficulty = difficulty.parse()?;
        let record = self.bank.find_by_id(language, difficulty, question_id)?;
        score_answer(&record, answer, language)
    }
}

/// A key point counts as covered when some term `t` of it has every term of
/// the key point (`t` included) occurring as a substring of the answer.
/// The existential is kept as written: a key point without terms is never
/// covered.
fn is_covered(key_point: &str, answer_lower: &str) -> bool {
    let lowered = key_point.to_lowercase();
    let terms: Vec<&str> = lowered.split_whitespace().collect();
    terms
        .iter()
        .any(|_| terms.iter().all(|term| answer_lower.contains(term)))
}

pub fn score_answer(
    record: &QuestionRecord,
    answer: &str,
    language: &str,
) -> Result<EvaluationResult> {
    if record.key_points.is_empty() {
        return Err(Error::DegenerateQuestion(record.question.clone()));
    }

    let answer_lower = answer.to_lowercase();
    let (covered_points, missed_points): (Vec<String>, Vec<String>) = record
        .key_points
        .iter()
        .cloned()
        .partition(|point| is_covered(point, &answer_lower));

    let score = 100.0 * covered_points.len() as f64 / record.key_points.len() as f64;
    let feedback = compose_feedback(score, &missed_points, language);

    Ok(EvaluationResult {
        question_id: record.id,
        covered_points,
        missed_points,
        score,
        feedback,
    })
}

fn compose_feedback(score: f64, missed: &[String], language: &str) -> String {
    let missed_list = missed.join(", ");
    if score >= EXCELLENT_THRESHOLD {
        let mut feedback = feedback_text(FeedbackTier::Excellent, language).to_string();
        if !missed.is_empty() {
            feedback.push(' ');
            feedback.push_str(feedback_text(FeedbackTier::Consider, language));
            feedback.push_str(": ");
            feedback.push_str(&missed_list);
        }
        feedback
    } else if score >= GOOD_THRESHOLD {
        format!("{}: {}", feedback_text(FeedbackTier::Good, language), missed_list)
    } else {
        format!("{}: {}", feedback_text(FeedbackTier::Review, language), missed_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::NewQuestion;

    const QUESTION: &str = "What is Prefect?";

    fn service() -> EvaluationService {
        let bank = QuestionBank::new();
        bank.insert(vec![NewQuestion {
            language: "en".into(),
            difficulty: "basics".into(),
            question: QUESTION.into(),
            key_points: vec![
                "Modern workflow orchestration tool".into(),
                "Python-native framework".into(),
                "Dynamic DAG creation".into(),
            ],
        }])
        .unwrap();
        EvaluationService::new(bank)
    }

    #[test]
    fn all_points_covered_scores_full_marks() {
        let answer = "It is a MODERN WORKFLOW ORCHESTRATION TOOL, a python-native framework \
                      with dynamic dag creation.";
        let result = service().evaluate(QUESTION, answer, "basics", "en").unwrap();
        assert_eq!(result.score, 100.0);
        assert!(result.missed_points.is_empty());
        assert_eq!(
            result.feedback,
            "Excellent answer! You demonstrated strong understanding of the concepts."
        );
    }

    #[test]
    fn nothing_covered_lists_every_point_in_order() {
        let result = service()
            .evaluate(QUESTION, "no idea", "basics", "en")
            .unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.covered_points.is_empty());
        assert_eq!(
            result.missed_points,
            vec![
                "Modern workflow orchestration tool",
                "Python-native framework",
                "Dynamic DAG creation"
            ]
        );
        assert_eq!(
            result.feedback,
            "Review these key concepts: Modern workflow orchestration tool, \
             Python-native framework, Dynamic DAG creation"
        );
    }

    #[test]
    fn two_of_three_is_good_tier() {
        let answer = "A modern workflow orchestration tool and a python-native framework.";
        let result = service().evaluate(QUESTION, answer, "basics", "en").unwrap();
        assert!((result.score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            result.feedback,
            "Good answer showing basic understanding. To improve, elaborate on: Dynamic DAG creation"
        );
    }

    #[test]
    fn terms_may_appear_anywhere_in_the_answer() {
        let answer = "creation of a DAG can be dynamic";
        let result = service().evaluate(QUESTION, answer, "basics", "en").unwrap();
        assert_eq!(result.covered_points, vec!["Dynamic DAG creation"]);
    }

    #[test]
    fn feedback_is_localized_with_fallback() {
        let svc = service();
        let record = svc
            .bank
            .find_by_text("en", Difficulty::Basics, QUESTION)
            .unwrap();
        let es = score_answer(&record, "nada", "es").unwrap();
        assert!(es.feedback.starts_with("Revisa estos conceptos clave: "));
        let ja = score_answer(&record, "nothing", "ja").unwrap();
        assert!(ja.feedback.starts_with("Review these key concepts: "));
    }

    #[test]
    fn excellent_with_misses_appends_consider_clause() {
        let record = QuestionRecord {
            id: Uuid::new_v4(),
            question: "Q".into(),
            key_points: vec!["a".into(), "b".into(), "c".into(), "d".into(), "zzz".into()],
            created_at: chrono::Utc::now(),
        };
        let result = score_answer(&record, "a b c d", "en").unwrap();
        assert_eq!(result.score, 80.0);
        assert!(result
            .feedback
            .ends_with("concepts. Consider mentioning: zzz"));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let svc = service();
        let answer = "python-native framework";
        let first = svc.evaluate(QUESTION, answer, "basics", "en").unwrap();
        let second = svc.evaluate(QUESTION, answer, "basics", "en").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn lookup_failures() {
        let svc = service();
        assert!(matches!(
            svc.evaluate(&format!("  {}  ", QUESTION), "x", "basics", "en"),
            Ok(_)
        ));
        assert!(matches!(
            svc.evaluate(QUESTION, "x", "advanced", "en"),
            Err(Error::QuestionNotFound { .. })
        ));
        assert!(matches!(
            svc.evaluate(QUESTION, "x", "basics", "fr"),
            Err(Error::UnsupportedLanguage(_))
        ));
        assert!(matches!(
            svc.evaluate_by_id(Uuid::new_v4(), "x", "basics", "en"),
            Err(Error::QuestionNotFound { .. })
        ));
    }

    #[test]
    fn zero_key_points_is_degenerate() {
        let record = QuestionRecord {
            id: Uuid::new_v4(),
            question: "Empty".into(),
            key_points: vec![],
            created_at: chrono::Utc::now(),
        };
        assert!(matches!(
            score_answer(&record, "anything", "en"),
            Err(Error::DegenerateQuestion(_))
        ));
    }

    #[test]
    fn blank_key_point_is_never_covered() {
        assert!(!is_covered("   ", "anything at all"));
        assert!(is_covered("Task Retries", "we configure task retries"));
    }
}
