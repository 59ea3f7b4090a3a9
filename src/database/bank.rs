use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use rand::seq::SliceRandom;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::language::is_question_language;
use crate::models::question::{Difficulty, NewQuestion, QuestionRecord};

/// The three partitions of one language. A language entry always carries all
/// of them, so a missing partition cannot be observed.
#[derive(Debug, Clone, Default)]
struct LanguageQuestions {
    basics: Vec<QuestionRecord>,
    intermediate: Vec<QuestionRecord>,
    advanced: Vec<QuestionRecord>,
}

impl LanguageQuestions {
    fn partition(&self, difficulty: Difficulty) -> &[QuestionRecord] {
        match difficulty {
            Difficulty::Basics => &self.basics,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Advanced => &self.advanced,
        }
    }

    fn partition_mut(&mut self, difficulty: Difficulty) -> &mut Vec<QuestionRecord> {
        match difficulty {
            Difficulty::Basics => &mut self.basics,
            Difficulty::Intermediate => &mut self.intermediate,
            Difficulty::Advanced => &mut self.advanced,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LanguageSummary {
    pub language: String,
    pub basics: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

struct ValidQuestion {
    language: String,
    difficulty: Difficulty,
    question: String,
    key_points: Vec<String>,
}

/// In-memory question bank shared by every request handler.
///
/// Readers (`sample`, the lookups, `languages`) hold the read lock; `insert`
/// takes the write lock once for a whole batch.
#[derive(Clone, Default)]
pub struct QuestionBank {
    inner: Arc<RwLock<HashMap<String, LanguageQuestions>>>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, LanguageQuestions>>> {
        self.inner
            .read()
            .map_err(|_| Error::Internal("question bank lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, LanguageQuestions>>> {
        self.inner
            .write()
            .map_err(|_| Error::Internal("question bank lock poisoned".to_string()))
    }

    /// Makes `language` present with three empty partitions. Existing
    /// questions are left alone.
    pub fn register_language(&self, language: &str) -> Result<()> {
        let mut guard = self.write()?;
        guard.entry(language.to_string()).or_default();
        Ok(())
    }

    pub fn sample(
        &self,
        language: &str,
        difficulty: &str,
        count: usize,
    ) -> Result<Vec<QuestionRecord>> {
        let guard = self.read()?;
        let questions = guard
            .get(language)
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))?;
        let difficulty: Difficulty = difficulty.parse()?;

        let partition = questions.partition(difficulty);
        if partition.is_empty() {
            return Err(Error::NoQuestionsAvailable {
                language: language.to_string(),
                difficulty: difficulty.to_string(),
            });
        }

        let mut rng = rand::thread_rng();
        Ok(partition
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect())
    }

    /// Validates the whole batch, then appends it in order under one write
    /// lock. Nothing is stored if any record is rejected.
    pub fn insert(&self, batch: Vec<NewQuestion>) -> Result<Vec<QuestionRecord>> {
        if batch.is_empty() {
            return Err(Error::InvalidQuestionRecord(
                "At least one question is required".to_string(),
            ));
        }

        let valid = batch
            .into_iter()
            .enumerate()
            .map(|(idx, q)| validate_new_question(idx, q))
            .collect::<Result<Vec<_>>>()?;

        let mut guard = self.write()?;
        let mut stored = Vec::with_capacity(valid.len());
        for q in valid {
            let record = QuestionRecord {
                id: Uuid::new_v4(),
                question: q.question,
                key_points: q.key_points,
                created_at: Utc::now(),
            };
            guard
                .entry(q.language)
                .or_default()
                .partition_mut(q.difficulty)
                .push(record.clone());
            stored.push(record);
        }
        tracing::info!(count = stored.len(), "questions added to bank");
        Ok(stored)
    }

    /// Exact match on trimmed question text within one partition.
    pub fn find_by_text(
        &self,
        language: &str,
        difficulty: Difficulty,
        question: &str,
    ) -> Result<QuestionRecord> {
        let wanted = question.trim();
        self.find(language, difficulty, |q| q.question.trim() == wanted)
    }

    pub fn find_by_id(
        &self,
        language: &str,
        difficulty: Difficulty,
        id: Uuid,
    ) -> Result<QuestionRecord> {
        self.find(language, difficulty, |q| q.id == id)
    }

    fn find<F>(&self, language: &str, difficulty: Difficulty, pred: F) -> Result<QuestionRecord>
    where
        F: Fn(&QuestionRecord) -> bool,
    {
        let guard = self.read()?;
        let questions = guard
            .get(language)
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))?;
        questions
            .partition(difficulty)
            .iter()
            .find(|&q| pred(q))
            .cloned()
            .ok_or_else(|| Error::QuestionNotFound {
                language: language.to_string(),
                difficulty: difficulty.to_string(),
            })
    }

    pub fn languages(&self) -> Result<Vec<LanguageSummary>> {
        let guard = self.read()?;
        let mut summaries: Vec<LanguageSummary> = guard
            .iter()
            .map(|(language, questions)| LanguageSummary {
                language: language.clone(),
                basics: questions.basics.len(),
                intermediate: questions.intermediate.len(),
                advanced: questions.advanced.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.language.cmp(&b.language));
        Ok(summaries)
    }
}

fn validate_new_question(idx: usize, q: NewQuestion) -> Result<ValidQuestion> {
    let position = idx + 1;
    if !is_question_language(&q.language) {
        return Err(Error::UnsupportedLanguage(q.language));
    }
    let difficulty: Difficulty = q.difficulty.parse()?;

    let question = q.question.trim().to_string();
    if question.is_empty() {
        return Err(Error::InvalidQuestionRecord(format!(
            "question #{} cannot be empty",
            position
        )));
    }

    let key_points: Vec<String> = q
        .key_points
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if key_points.is_empty() {
        return Err(Error::InvalidQuestionRecord(format!(
            "key points of question #{} cannot be empty",
            position
        )));
    }

    Ok(ValidQuestion {
        language: q.language,
        difficulty,
        question,
        key_points,
    })
}
