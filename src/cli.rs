use clap::Parser;
use std::path::PathBuf;

use crate::interaction::FormInput;

#[derive(Debug, Parser)]
#[command(
    name = "question-generator",
    version,
    about = "Generate self-test questions for a topic and remember what each learner studied"
)]
pub struct Cli {
    /// Model name or provider:model (e.g. gemini:gemini-2.0-flash)
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// API key (overrides environment variable)
    #[arg(short = 'k', long = "key")]
    pub key: Option<String>,

    /// Preference database file (default: ~/.question-generator/users.db)
    #[arg(long = "db")]
    pub db: Option<PathBuf>,

    /// Give up on the generation service after this many seconds
    #[arg(long = "timeout-secs", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Print every saved preference and exit
    #[arg(long = "list-preferences")]
    pub list_preferences: bool,

    /// Learner name; with --topic/--level submits once without prompting
    #[arg(long = "name")]
    pub name: Option<String>,

    /// Topic to be tested on
    #[arg(long = "topic")]
    pub topic: Option<String>,

    /// Difficulty level from 1 to 10
    #[arg(long = "level", value_parser = clap::value_parser!(u8).range(1..=10))]
    pub level: Option<u8>,

    /// Number of questions from 1 to 10
    #[arg(long = "questions", default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub questions: u8,
}

impl Cli {
    /// Form values given on the command line, if any field was given at all.
    pub fn once_input(&self) -> Option<FormInput> {
        if self.name.is_none() && self.topic.is_none() && self.level.is_none() {
            return None;
        }
        Some(FormInput {
            name: self.name.clone().unwrap_or_default(),
            topic: self.topic.clone().unwrap_or_default(),
            level: self.level,
            n_questions: self.questions,
        })
    }
}
