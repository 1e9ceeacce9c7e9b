//! The fixed agent roster

use super::agent::AgentSpec;
use super::prompts::{
    CHEMISTRY_INSTRUCTION, MATHS_INSTRUCTION, NEWS_INSTRUCTION, PHYSICS_INSTRUCTION,
    ROOT_INSTRUCTION,
};

/// Name of the root agent
pub const ROOT_AGENT_NAME: &str = "multiagent";

/// Specialist names, in roster order
pub const SPECIALIST_NAMES: [&str; 4] = [
    "maths_agent",
    "physics_agent",
    "chemistry_agent",
    "news_analyst",
];

/// Specs for every specialist, in roster order
#[must_use]
pub fn specialist_specs() -> Vec<AgentSpec> {
    vec![
        AgentSpec::new(
            "maths_agent",
            "A specialized mathematics tutor for solving equations, calculations, and mathematical concepts.",
            MATHS_INSTRUCTION,
        )
        .with_tool("calculator"),
        AgentSpec::new(
            "physics_agent",
            "A specialized physics tutor for concepts, problems, and physical constants.",
            PHYSICS_INSTRUCTION,
        )
        .with_tool("lookup_physics_constant"),
        AgentSpec::new(
            "chemistry_agent",
            "A specialized chemistry tutor for elements, compounds, reactions, and chemical concepts.",
            CHEMISTRY_INSTRUCTION,
        )
        .with_tool("elements_lookup"),
        AgentSpec::new(
            "news_analyst",
            "A specialized AI news analyst for current developments and research in artificial intelligence.",
            NEWS_INSTRUCTION,
        )
        .with_tool("web_search"),
    ]
}

/// Spec for the root agent; its tools are the specialists
#[must_use]
pub fn root_spec() -> AgentSpec {
    SPECIALIST_NAMES.iter().fold(
        AgentSpec::new(
            ROOT_AGENT_NAME,
            "An intelligent tutoring orchestrator that routes queries to specialist agents.",
            ROOT_INSTRUCTION,
        ),
        |spec, name| spec.with_tool(*name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_names_match() {
        let names: Vec<String> = specialist_specs().into_iter().map(|s| s.name).collect();
        assert_eq!(names, SPECIALIST_NAMES.map(String::from).to_vec());
    }

    #[test]
    fn test_each_specialist_has_one_tool() {
        for spec in specialist_specs() {
            assert_eq!(spec.tools.len(), 1, "{}", spec.name);
        }
    }

    #[test]
    fn test_root_delegates_to_every_specialist() {
        let root = root_spec();
        assert_eq!(root.name, "multiagent");
        assert_eq!(root.tools, SPECIALIST_NAMES.map(String::from).to_vec());
        assert!(root.instruction.contains("speed of light"));
    }
}
