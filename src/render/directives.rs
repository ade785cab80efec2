//! The global directives block injected into every instruction.

/// Rules applied to every instruction, parameterized by language.
pub fn global_directives(language: &str) -> String {
    format!(
        "**Global Rules**:\n\
         **RULE1:** You MUST use \"{}\" as your preferred language for following \
         conversation and documentation. However, use English for code (including \
         comments) and web search queries.",
        language
    )
}
