use crate::database::bank::QuestionBank;
use crate::error::Result;
use crate::models::language::QUESTION_LANGUAGES;
use crate::models::question::NewQuestion;

const SEED_LANGUAGE: &str = "en";

const SEED: &[(&str, &str, &[&str])] = &[
    (
        "basics",
        "What is a Prefect Flow?",
        &[
            "A Flow is a container for workflow logic",
            "Flows are Python functions decorated with @flow",
            "Flows can contain tasks and other flows",
        ],
    ),
    (
        "basics",
        "What is Prefect and how does it differ from other workflow management tools?",
        &[
            "Modern workflow orchestration tool",
            "Python-native framework",
            "Dynamic DAG creation",
            "Hybrid execution model",
            "Built-in failure handling",
        ],
    ),
    (
        "basics",
        "Explain the concept of Tasks and Flows in Prefect.",
        &[
            "Tasks are individual units of work",
            "Flows are collections of tasks with dependencies",
            "Decorators @task and @flow",
            "State handling",
            "Task retries and caching",
        ],
    ),
    (
        "basics",
        "How does Prefect handle task dependencies?",
        &[
            "Automatic dependency inference",
            "Explicit dependencies using upstream/downstream",
            "Task results as inputs",
            "Parallel execution",
            "Dynamic task generation",
        ],
    ),
    (
        "intermediate",
        "Explain Prefect's execution model and deployment options.",
        &[
            "Local vs distributed execution",
            "Prefect agents and work queues",
            "Docker containers",
            "Kubernetes integration",
            "Infrastructure blocks",
        ],
    ),
    (
        "intermediate",
        "How do you handle errors and retries in Prefect?",
        &[
            "Retry policies",
            "Task state handlers",
            "Flow-level error handling",
            "Custom retry logic",
            "State change notifications",
        ],
    ),
    (
        "advanced",
        "Describe Prefect's storage options and how to configure them.",
        &[
            "Local storage",
            "S3/GCS/Azure storage blocks",
            "Result persistence",
            "Flow storage configuration",
            "Remote storage best practices",
        ],
    ),
    (
        "advanced",
        "How would you implement a complex ETL pipeline using Prefect?",
        &[
            "Subflow composition",
            "Parallel task execution",
            "Data validation tasks",
            "Error handling strategies",
            "Monitoring and logging",
        ],
    ),
];

/// Builds the bank the service starts with: English fully populated, every
/// other upload language present with empty partitions.
pub fn seed_bank() -> Result<QuestionBank> {
    let bank = QuestionBank::new();
    for language in QUESTION_LANGUAGES {
        bank.register_language(language)?;
    }

    let batch = SEED
        .iter()
        .map(|(difficulty, question, key_points)| NewQuestion {
            language: SEED_LANGUAGE.to_string(),
            difficulty: difficulty.to_string(),
            question: question.to_string(),
            key_points: key_points.iter().map(|p| p.to_string()).collect(),
        })
        .collect();
    bank.insert(batch)?;
    Ok(bank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn seed_populates_english_only() {
        let bank = seed_bank().unwrap();
        let langs = bank.languages().unwrap();
        assert_eq!(langs.len(), QUESTION_LANGUAGES.len());
        for summary in langs {
            if summary.language == "en" {
                assert_eq!(
                    (summary.basics, summary.intermediate, summary.advanced),
                    (4, 2, 2)
                );
            } else {
                assert_eq!(summary.basics + summary.intermediate + summary.advanced, 0);
            }
        }
        assert!(matches!(
            bank.sample("es", "basics", 3),
            Err(Error::NoQuestionsAvailable { .. })
        ));
    }
}
