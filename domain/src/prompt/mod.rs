//! Prompt templates for planning and step execution.

/// Templates for the two model interactions: the one-shot step planning
/// request and the per-step execution conversation.
pub struct BootstrapPrompt;

impl BootstrapPrompt {
    /// System message for step execution, parameterized by project type.
    pub fn execution_system(project_type: &str) -> String {
        format!(
            "You are a professional programmer setting up a new {} project. \
             Configure the project and install the necessary dependencies. \
             Assume the package manifest has already been initialized, and \
             describe work rather than shell commands: \"Initialize \
             typescript config\" instead of \"run tsc --init\". Do not make \
             assumptions about values to plug into tools; ask for \
             clarification when a request is ambiguous.",
            project_type
        )
    }

    /// System message with retrieved guidance appended.
    ///
    /// Snippets are joined by newline; an empty slice yields the plain
    /// system message.
    pub fn execution_system_with_guidance(project_type: &str, guidance: &[String]) -> String {
        let base = Self::execution_system(project_type);
        if guidance.is_empty() {
            base
        } else {
            format!("{}\nAdditional instructions: {}", base, guidance.join("\n"))
        }
    }

    /// User message for executing one step.
    pub fn execution_user(step: &str, technologies_display: &str) -> String {
        format!(
            "This is the list of technologies that are going to be used: {}.\n\
             The step you are on is: {}.\n\
             Assume that you are in the root directory of the project",
            technologies_display, step
        )
    }

    /// The one-shot planning request: asks for a JSON array of steps
    /// covering every selected technology.
    pub fn steps_request(technologies_display: &str) -> String {
        format!(
            "Please return an array (not an object) of steps to complete the \
             setup of each of these technologies: {}\n\
             For example, \"create config file for eslint\" or \"create a \
             directory called 'src'\" or \"create a file named \
             'src/example.ts'\".\n\
             You will need to return only valid JSON and nothing else.",
            technologies_display
        )
    }

    /// Query sent to the instruction store for a step.
    pub fn guidance_query(step: &str) -> String {
        format!("How do I {}", step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_mentions_project_type() {
        let prompt = BootstrapPrompt::execution_system("node");
        assert!(prompt.contains("node project"));
    }

    #[test]
    fn test_guidance_appended_when_present() {
        let with = BootstrapPrompt::execution_system_with_guidance(
            "node",
            &["Use eslint".to_string(), "Use prettier".to_string()],
        );
        assert!(with.contains("Additional instructions: Use eslint\nUse prettier"));

        let without = BootstrapPrompt::execution_system_with_guidance("node", &[]);
        assert_eq!(without, BootstrapPrompt::execution_system("node"));
    }

    #[test]
    fn test_execution_user_mentions_step_and_techs() {
        let prompt = BootstrapPrompt::execution_user("create tsconfig.json", "typescript, eslint");
        assert!(prompt.contains("create tsconfig.json"));
        assert!(prompt.contains("typescript, eslint"));
    }

    #[test]
    fn test_guidance_query_prefix() {
        assert_eq!(
            BootstrapPrompt::guidance_query("set up eslint"),
            "How do I set up eslint"
        );
    }
}
