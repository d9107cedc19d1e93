use anyhow::Result;
use std::io::{self, IsTerminal};
use std::ops::RangeInclusive;

use crate::interaction::{
    FormInput, InteractionController, MAX_LEVEL, MAX_QUESTIONS, MIN_LEVEL, MIN_QUESTIONS,
};
use crate::output;
use crate::prompter::{EditorPrompter, FieldPrompter, StdioPrompter};

const TITLE: &str = "Personalized Learning Assistant";
const INTRO: &str = "Enter your name, a topic and how many questions you need to test your \
                     understanding of that topic. Type exit to finish.";

pub async fn run_interactive(controller: &InteractionController<'_>) -> Result<()> {
    println!("{TITLE}");
    println!("{INTRO}");
    println!();

    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        let mut prompter = EditorPrompter::new()?;
        run_loop(&mut prompter, controller).await
    } else {
        let mut prompter = StdioPrompter::new();
        run_loop(&mut prompter, controller).await
    }
}

async fn run_loop(
    prompter: &mut dyn FieldPrompter,
    controller: &InteractionController<'_>,
) -> Result<()> {
    while let Some(input) = collect_form(prompter, controller)? {
        let outcome = controller.submit(&input).await;
        output::print_outcome(&outcome)?;
        println!();
    }
    println!("Good Bye!");
    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    matches!(input, "exit" | "quit")
}

/// Walks the user through one form. `None` once they close input or type an
/// exit command at the name prompt.
fn collect_form(
    prompter: &mut dyn FieldPrompter,
    controller: &InteractionController<'_>,
) -> Result<Option<FormInput>> {
    let Some(name) = prompter.read_field("Enter the name: ", "")? else {
        return Ok(None);
    };
    if is_exit_command(&name) {
        return Ok(None);
    }

    let prior = controller.prior_preference(&name);
    if let Some(preference) = &prior {
        prompter.notify(&output::preference_hint(name.trim(), preference));
    }

    let topic_initial = prior.as_ref().map(|p| p.topic.clone()).unwrap_or_default();
    let Some(topic) = prompter.read_field("Enter the topic: ", &topic_initial)? else {
        return Ok(None);
    };

    let level_initial = prior
        .as_ref()
        .map(|p| p.level.to_string())
        .unwrap_or_default();
    let Some(level) = read_bounded(
        prompter,
        "Level of difficulty from 1 to 10: ",
        &level_initial,
        MIN_LEVEL..=MAX_LEVEL,
    )?
    else {
        return Ok(None);
    };

    let Some(n_questions) = read_bounded(
        prompter,
        "Number of questions from 1 to 10: ",
        &MIN_QUESTIONS.to_string(),
        MIN_QUESTIONS..=MAX_QUESTIONS,
    )?
    else {
        return Ok(None);
    };

    Ok(Some(FormInput {
        name,
        topic,
        level,
        n_questions: n_questions.unwrap_or(MIN_QUESTIONS),
    }))
}

/// Outer `None`: input closed. Inner `None`: field left empty.
fn read_bounded(
    prompter: &mut dyn FieldPrompter,
    label: &str,
    initial: &str,
    range: RangeInclusive<u8>,
) -> Result<Option<Option<u8>>> {
    loop {
        let Some(raw) = prompter.read_field(label, initial)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(Some(None));
        }
        match parse_bounded(&raw, &range) {
            Some(value) => return Ok(Some(Some(value))),
            None => prompter.notify(&format!(
                "please enter a whole number from {} to {}",
                range.start(),
                range.end()
            )),
        }
    }
}

fn parse_bounded(raw: &str, range: &RangeInclusive<u8>) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|value| range.contains(value))
}
