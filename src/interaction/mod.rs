pub mod gateway;
mod state;
mod validate;

use tracing::{info, warn};

use crate::error::InteractionError;
use crate::prompt;
use crate::store::{Preference, PreferenceStore};

pub use gateway::GenerationGateway;
pub use state::{DisplayStatus, InteractionState};

use state::StateMachine;
use validate::validate;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;
pub const MIN_QUESTIONS: u8 = 1;
pub const MAX_QUESTIONS: u8 = 10;

/// Raw field values as collected by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub topic: String,
    pub level: Option<u8>,
    pub n_questions: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestions {
    pub heading: String,
    pub body: String,
}

impl GeneratedQuestions {
    fn new(topic: &str, level: u8, body: String) -> Self {
        Self {
            heading: format!("Questions for {topic} for level {level}."),
            body,
        }
    }
}

#[derive(Debug)]
pub struct SubmissionOutcome {
    /// Present whenever generation succeeded, even if saving failed afterwards.
    pub questions: Option<GeneratedQuestions>,
    /// Success banner text, or the error to show instead.
    pub status: Result<String, InteractionError>,
    pub state: InteractionState,
}

pub struct InteractionController<'a> {
    gateway: &'a dyn GenerationGateway,
    store: &'a dyn PreferenceStore,
}

impl<'a> InteractionController<'a> {
    pub fn new(gateway: &'a dyn GenerationGateway, store: &'a dyn PreferenceStore) -> Self {
        Self { gateway, store }
    }

    /// Last preference saved under `name`. Lookup failures only cost the hint.
    pub fn prior_preference(&self, name: &str) -> Option<Preference> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        match self.store.lookup(name) {
            Ok(preference) => preference,
            Err(err) => {
                warn!(name, error = %err, "could not load prior preference");
                None
            }
        }
    }

    pub async fn submit(&self, input: &FormInput) -> SubmissionOutcome {
        let mut machine = StateMachine::new();

        machine.enter(InteractionState::Validating);
        let submission = match validate(input) {
            Ok(submission) => submission,
            Err(err) => {
                info!(
                    missing = ?err.missing,
                    out_of_range = ?err.out_of_range,
                    "form rejected"
                );
                return SubmissionOutcome {
                    questions: None,
                    status: Err(err.into()),
                    state: machine.finish(DisplayStatus::Error),
                };
            }
        };

        machine.enter(InteractionState::Generating);
        let request = prompt::build(submission.topic, submission.level, submission.n_questions);
        let body = match self.gateway.generate(&request).await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "question generation failed");
                return SubmissionOutcome {
                    questions: None,
                    status: Err(err.into()),
                    state: machine.finish(DisplayStatus::Error),
                };
            }
        };
        let questions = GeneratedQuestions::new(submission.topic, submission.level, body);

        machine.enter(InteractionState::Persisting);
        let status = self
            .store
            .save(submission.name, submission.topic, submission.level)
            .map(|()| {
                success_message(submission.name, submission.topic, submission.level)
            })
            .map_err(|err| {
                warn!(error = %err, "failed to save preference");
                InteractionError::from(err)
            });

        let display = if status.is_ok() {
            DisplayStatus::Success
        } else {
            DisplayStatus::Error
        };
        SubmissionOutcome {
            questions: Some(questions),
            status,
            state: machine.finish(display),
        }
    }
}

fn success_message(name: &str, topic: &str, level: u8) -> String {
    format!(
        "Try to answer the questions above, if you can great otherwise please go through the \
         topics. Best of luck {name}\n(topic: {topic}, level: {level})!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, StorageError};
    use crate::store::{PreferenceRecord, SqlitePreferenceStore};
    use std::future::Future;
    use std::path::PathBuf;
    use std::pin::Pin;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FakeGateway {
        reply: Option<String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeGateway {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl GenerationGateway for FakeGateway {
        fn generate<'a>(
            &'a self,
            request: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
            self.requests.lock().unwrap().push(request.to_string());
            let reply = self
                .reply
                .clone()
                .ok_or(GenerationError::EmptyResponse { provider: "fake" });
            Box::pin(async move { reply })
        }
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn save(&self, _name: &str, _topic: &str, _level: u8) -> Result<(), StorageError> {
            Err(StorageError::Directory {
                path: PathBuf::from("/var/lib/question-generator"),
                source: std::io::Error::other("disk full"),
            })
        }

        fn lookup(&self, _name: &str) -> Result<Option<Preference>, StorageError> {
            Err(StorageError::InvalidLevel("unreadable".to_string()))
        }

        fn list_all(&self) -> Result<Vec<PreferenceRecord>, StorageError> {
            Ok(Vec::new())
        }
    }

    fn temp_store() -> (TempDir, SqlitePreferenceStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqlitePreferenceStore::open(dir.path().join("users.db")).unwrap();
        (dir, store)
    }

    fn form(name: &str, topic: &str, level: Option<u8>, n_questions: u8) -> FormInput {
        FormInput {
            name: name.to_string(),
            topic: topic.to_string(),
            level,
            n_questions,
        }
    }

    #[tokio::test]
    async fn successful_submission_displays_and_saves() {
        let (_dir, store) = temp_store();
        let gateway = FakeGateway::replying("Q1...Q2...Q3...");
        let controller = InteractionController::new(&gateway, &store);

        let outcome = controller
            .submit(&form("Alice", "Graph Theory", Some(5), 3))
            .await;

        let questions = outcome.questions.clone().unwrap();
        assert_eq!(questions.heading, "Questions for Graph Theory for level 5.");
        assert_eq!(questions.body, "Q1...Q2...Q3...");
        assert!(outcome.status.is_ok());
        assert!(outcome.status.as_ref().unwrap().contains("Best of luck Alice"));
        assert_eq!(
            outcome.state,
            InteractionState::Displaying(DisplayStatus::Success)
        );

        assert_eq!(
            store.list_all().unwrap(),
            vec![PreferenceRecord {
                name: "Alice".to_string(),
                topic: "Graph Theory".to_string(),
                level: 5,
            }]
        );
        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains("Graph Theory"));
        assert!(requests[0].contains("give me 3 questions"));
    }

    #[tokio::test]
    async fn missing_name_touches_nothing() {
        let (_dir, store) = temp_store();
        let gateway = FakeGateway::replying("unused");
        let controller = InteractionController::new(&gateway, &store);

        let outcome = controller.submit(&form("", "SQL", Some(4), 2)).await;

        assert!(outcome.questions.is_none());
        let err = outcome.status.unwrap_err();
        assert!(matches!(err, InteractionError::Validation(_)));
        assert_eq!(err.to_string(), "Please fill in all fields.");
        assert_eq!(
            outcome.state,
            InteractionState::Displaying(DisplayStatus::Error)
        );
        assert!(gateway.requests().is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_topic_or_unset_level_never_generates() {
        let (_dir, store) = temp_store();
        let gateway = FakeGateway::replying("unused");
        let controller = InteractionController::new(&gateway, &store);

        let no_topic = controller.submit(&form("Alice", "", Some(4), 2)).await;
        let no_level = controller.submit(&form("Alice", "SQL", None, 2)).await;

        assert!(!no_topic.status.is_ok());
        assert!(!no_level.status.is_ok());
        assert!(gateway.requests().is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_numbers_never_generate_or_save() {
        let (_dir, store) = temp_store();
        let gateway = FakeGateway::replying("unused");
        let controller = InteractionController::new(&gateway, &store);

        let outcome = controller.submit(&form("Alice", "SQL", Some(42), 0)).await;
        store.save("Bob", "Rust", 2).unwrap();

        let err = outcome.status.unwrap_err();
        assert!(matches!(err, InteractionError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Level and number of questions must be between 1 and 10."
        );
        assert!(gateway.requests().is_empty());
        assert_eq!(store.lookup("Alice").unwrap(), None);
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn generation_failure_skips_save() {
        let (_dir, store) = temp_store();
        let gateway = FakeGateway::failing();
        let controller = InteractionController::new(&gateway, &store);

        let outcome = controller
            .submit(&form("Alice", "Graph Theory", Some(5), 3))
            .await;

        assert!(outcome.questions.is_none());
        let err = outcome.status.unwrap_err();
        assert!(matches!(err, InteractionError::Generation(_)));
        assert!(err.to_string().starts_with("An error occurred:"));
        assert_eq!(gateway.requests().len(), 1);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_failure_keeps_questions_visible() {
        let gateway = FakeGateway::replying("Q1. What is normalization?");
        let controller = InteractionController::new(&gateway, &BrokenStore);

        let outcome = controller.submit(&form("Alice", "SQL", Some(4), 1)).await;

        assert_eq!(
            outcome.questions.as_ref().map(|q| q.body.as_str()),
            Some("Q1. What is normalization?")
        );
        assert!(matches!(outcome.status, Err(InteractionError::Storage(_))));
        assert_eq!(
            outcome.state,
            InteractionState::Displaying(DisplayStatus::Error)
        );
    }

    #[tokio::test]
    async fn resubmission_updates_prior_preference() {
        let (_dir, store) = temp_store();
        let gateway = FakeGateway::replying("Q1.");
        let controller = InteractionController::new(&gateway, &store);

        assert_eq!(controller.prior_preference("Alice"), None);
        controller
            .submit(&form("Alice", "Graph Theory", Some(5), 3))
            .await;
        controller.submit(&form(" Alice ", "SQL", Some(7), 2)).await;

        assert_eq!(
            controller.prior_preference("Alice"),
            Some(Preference {
                topic: "SQL".to_string(),
                level: 7,
            })
        );
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn lookup_failure_degrades_to_no_hint() {
        let gateway = FakeGateway::replying("unused");
        let controller = InteractionController::new(&gateway, &BrokenStore);
        assert_eq!(controller.prior_preference("Alice"), None);
        assert_eq!(controller.prior_preference("   "), None);
    }
}
