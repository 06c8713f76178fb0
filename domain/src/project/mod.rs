//! Project profile collected from the user.

use serde::{Deserialize, Serialize};

/// What the user told us about the project to bootstrap.
///
/// `technologies` is an ordered, de-duplicated selection; the order only
/// matters for display, never for execution semantics. The profile is
/// immutable once collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub name: String,
    /// Project category (e.g., "node", "web", "native").
    pub project_type: String,
    pub description: String,
    pub technologies: Vec<String>,
}

impl ProjectProfile {
    pub fn new(
        name: impl Into<String>,
        project_type: impl Into<String>,
        description: impl Into<String>,
        technologies: Vec<String>,
    ) -> Self {
        let mut seen = std::collections::HashSet::new();
        let technologies = technologies
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();
        Self {
            name: name.into(),
            project_type: project_type.into(),
            description: description.into(),
            technologies,
        }
    }

    /// Technologies joined for display and prompting.
    pub fn technologies_display(&self) -> String {
        self.technologies.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_preserving_first_occurrence() {
        let profile = ProjectProfile::new(
            "demo",
            "node",
            "",
            vec![
                "typescript".to_string(),
                "eslint".to_string(),
                "typescript".to_string(),
            ],
        );

        assert_eq!(profile.technologies, vec!["typescript", "eslint"]);
        assert_eq!(profile.technologies_display(), "typescript, eslint");
    }
}
