//! Interactive project questionnaire.
//!
//! Collects the project profile before planning: name, type, description,
//! and a technology checklist. Input validation loops until the answer is
//! usable; the profile itself deduplicates technology selections.

use bootsmith_domain::ProjectProfile;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Errors raised while collecting the profile
#[derive(Error, Debug)]
pub enum QuestionnaireError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Input closed")]
    InputClosed,
}

/// Project types the questionnaire offers.
const PROJECT_TYPES: &[&str] = &["node", "web", "native"];

/// Technology checklist per project type.
fn technology_choices(project_type: &str) -> &'static [&'static str] {
    match project_type {
        "web" => &[
            "typescript",
            "eslint",
            "prettier",
            "react",
            "vite",
            "jest",
        ],
        "native" => &["typescript", "eslint", "prettier", "electron", "jest"],
        _ => &[
            "typescript",
            "eslint",
            "prettier",
            "express",
            "jest",
            "nodemon",
            "dotenv",
        ],
    }
}

/// Terminal questionnaire producing a [`ProjectProfile`].
pub struct Questionnaire;

impl Questionnaire {
    /// Run the questionnaire against stdin.
    pub fn run() -> Result<ProjectProfile, QuestionnaireError> {
        Self::run_with(&mut io::stdin().lock())
    }

    /// Run against any line source. Split out for tests.
    pub fn run_with<R: BufRead>(input: &mut R) -> Result<ProjectProfile, QuestionnaireError> {
        let name = Self::ask_text(input, "What is the name of your project?")?;
        let project_type = Self::ask_choice(input, "What type of project is it?", PROJECT_TYPES)?;
        let description = Self::ask_text(input, "Describe your project in one sentence:")?;
        let technologies = Self::ask_checklist(
            input,
            "Which technologies should be set up?",
            technology_choices(&project_type),
        )?;

        Ok(ProjectProfile::new(name, project_type, description, technologies))
    }

    fn ask_text<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, QuestionnaireError> {
        loop {
            println!("{} {}", "?".cyan().bold(), prompt.bold());
            let answer = Self::read_line(input)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            println!("  {}", "Please enter a value.".red());
        }
    }

    fn ask_choice<R: BufRead>(
        input: &mut R,
        prompt: &str,
        options: &[&str],
    ) -> Result<String, QuestionnaireError> {
        loop {
            println!("{} {}", "?".cyan().bold(), prompt.bold());
            for (i, option) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            let answer = Self::read_line(input)?;
            if let Ok(n) = answer.parse::<usize>()
                && (1..=options.len()).contains(&n)
            {
                return Ok(options[n - 1].to_string());
            }
            println!(
                "  {}",
                format!("Enter a number between 1 and {}.", options.len()).red()
            );
        }
    }

    /// Comma-separated selection, e.g. `1,3,4`. At least one entry is
    /// required; planning with zero technologies has nothing to do.
    fn ask_checklist<R: BufRead>(
        input: &mut R,
        prompt: &str,
        options: &[&str],
    ) -> Result<Vec<String>, QuestionnaireError> {
        loop {
            println!(
                "{} {} {}",
                "?".cyan().bold(),
                prompt.bold(),
                "(comma-separated numbers)".dimmed()
            );
            for (i, option) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, option);
            }
            let answer = Self::read_line(input)?;

            let picks: Option<Vec<usize>> = answer
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|n| (1..=options.len()).contains(n))
                })
                .collect();

            if let Some(picks) = picks
                && !picks.is_empty()
            {
                return Ok(picks.into_iter().map(|n| options[n - 1].to_string()).collect());
            }
            println!("  {}", "Pick at least one valid number.".red());
        }
    }

    fn read_line<R: BufRead>(input: &mut R) -> Result<String, QuestionnaireError> {
        print!("{} ", ">".cyan());
        io::stdout()
            .flush()
            .map_err(|e| QuestionnaireError::IoError(e.to_string()))?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| QuestionnaireError::IoError(e.to_string()))?;
        if bytes == 0 {
            return Err(QuestionnaireError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}
