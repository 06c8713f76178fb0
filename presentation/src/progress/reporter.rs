//! Progress reporting for bootstrap execution

use bootsmith_application::ports::progress::BootstrapProgress;
use bootsmith_application::use_cases::execute_step::StepOutcome;
use colored::Colorize;
use bootsmith_domain::Step;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports bootstrap progress with a step bar and per-tool lines.
pub struct ProgressReporter {
    multi: MultiProgress,
    step_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            step_bar: Mutex::new(None),
        }
    }

    fn step_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn println(&self, line: String) {
        // Routed through MultiProgress so lines don't tear the bar.
        let _ = self.multi.println(line);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapProgress for ProgressReporter {
    fn on_planning_started(&self) {
        self.println(format!("{} Planning setup steps...", "->".cyan()));
    }

    fn on_steps_planned(&self, steps: &[Step]) {
        self.println(format!(
            "{} {}",
            "Planned".green().bold(),
            format!("{} step(s):", steps.len()).bold()
        ));
        for (i, step) in steps.iter().enumerate() {
            self.println(format!("  {}. {}", i + 1, step));
        }

        let pb = self.multi.add(ProgressBar::new(steps.len() as u64));
        pb.set_style(Self::step_style());
        pb.set_prefix("Bootstrap");
        *self.step_bar.lock().unwrap() = Some(pb);
    }

    fn on_step_started(&self, index: usize, total: usize, step: &Step) {
        if let Some(pb) = self.step_bar.lock().unwrap().as_ref() {
            pb.set_message(format!("{}", step));
        }
        self.println(format!(
            "{} {}",
            format!("[{}/{}]", index, total).cyan().bold(),
            step.as_str().bold()
        ));
    }

    fn on_tool_dispatched(&self, tool_name: &str, success: bool) {
        let mark = if success {
            "v".green()
        } else {
            "x".red()
        };
        self.println(format!("  {} {}", mark, tool_name));
    }

    fn on_tool_skipped(&self, tool_name: &str, reason: &str) {
        self.println(format!(
            "  {} {} ({})",
            "-".yellow(),
            tool_name,
            reason.dimmed()
        ));
    }

    fn on_step_finished(&self, _index: usize, _step: &Step, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Completed { turns } => {
                self.println(format!(
                    "  {} completed in {} turn(s)",
                    "done".green(),
                    turns
                ));
            }
            StepOutcome::Abandoned { turns } => {
                self.println(format!(
                    "  {} abandoned after {} turn(s)",
                    "warn".red().bold(),
                    turns
                ));
            }
        }

        if let Some(pb) = self.step_bar.lock().unwrap().as_ref() {
            pb.inc(1);
            if pb.position() >= pb.length().unwrap_or(0) {
                pb.finish_with_message("complete".to_string());
            }
        }
    }
}
