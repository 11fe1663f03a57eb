//! Prompt text producers, one per pipeline role.
//!
//! The orchestrators treat these as opaque string-producing functions: each
//! takes the structured inputs of its stage and returns the prompt text sent
//! to the completion client.

/// Static prompt builders for the brainstorming pipeline
pub struct PromptTemplate;

impl PromptTemplate {
    pub fn creative(objective: &str, context: &str, constraints: &str, history: &str) -> String {
        let mut prompt = format!(
            "You are a creative brainstorming expert.\n\n\
             Objective: {objective}\n\
             Context: {context}\n\
             Constraints: {constraints}\n"
        );
        if !history.is_empty() {
            prompt.push_str(&format!(
                "\nIdeas already proposed in earlier cycles (do not repeat them):\n{history}\n"
            ));
        }
        prompt.push_str("\nPropose one bold, concrete, novel idea that satisfies the objective.");
        prompt
    }

    pub fn critique(creation: &str) -> String {
        format!(
            "You are a rigorous critic. Identify the weaknesses, risks, and blind \
             spots of the following idea:\n\n{creation}"
        )
    }

    pub fn defense(creation: &str, critique: &str) -> String {
        format!(
            "You proposed this idea:\n\n{creation}\n\n\
             It received this critique:\n\n{critique}\n\n\
             Defend the idea point by point, conceding only what is truly indefensible."
        )
    }

    pub fn rebuttal(defense: &str, creation: &str) -> String {
        format!(
            "The idea under debate:\n\n{creation}\n\n\
             Its author's defense:\n\n{defense}\n\n\
             As the critic, respond to the defense: which counter-arguments hold, \
             which concerns remain open?"
        )
    }

    pub fn revision(creation: &str, critique: &str) -> String {
        format!(
            "Original idea:\n\n{creation}\n\n\
             Critique received:\n\n{critique}\n\n\
             Rewrite the idea as an improved version that integrates the valid \
             points of the critique. Return only the revised idea."
        )
    }

    pub fn score(revision: &str) -> String {
        format!(
            "Evaluate the following idea. Respond with ONLY a JSON object of \
             integer scores from 1 to 10 with exactly these keys: impact, \
             feasibility, originality, clarity.\n\nIdea:\n{revision}"
        )
    }

    pub fn synthesis(ideas: &[String], count: usize) -> String {
        let listed = ideas
            .iter()
            .enumerate()
            .map(|(i, idea)| format!("Idea {}:\n{}", i + 1, idea))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "Here are the refined ideas from a brainstorming session:\n\n{listed}\n\n\
             Select the {count} strongest ideas and present them as a numbered \
             list, one idea per line, best first."
        )
    }

    pub fn plan(idea: &str) -> String {
        format!(
            "Produce a detailed, actionable implementation plan for this idea:\n\n{idea}"
        )
    }

    pub fn plan_critique(plan: &str) -> String {
        format!(
            "You are a rigorous reviewer. Identify the gaps, risks, and unrealistic \
             assumptions in this implementation plan:\n\n{plan}"
        )
    }

    pub fn plan_defense(plan: &str, critique: &str) -> String {
        format!(
            "This implementation plan:\n\n{plan}\n\n\
             received this critique:\n\n{critique}\n\n\
             Defend the plan's choices, conceding only what is truly indefensible."
        )
    }

    pub fn plan_revision(plan: &str, critique: &str) -> String {
        format!(
            "Original plan:\n\n{plan}\n\n\
             Critique received:\n\n{critique}\n\n\
             Rewrite the plan as a final version that addresses the valid critique \
             points. Return only the revised plan."
        )
    }
}
