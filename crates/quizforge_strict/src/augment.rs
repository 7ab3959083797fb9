//! System-instruction augmentation.
//!
//! Clause order is fixed: schema format, enumeration guidance, placeholder
//! guidance, array guidance. Feedback from a failed attempt is appended by
//! the client after these.

use quizforge_core::OutputSchema;

/// Builds the output-format instruction appended to the caller's system
/// instruction on every attempt.
pub(crate) fn format_instruction(schema: &OutputSchema, prompt_count: usize) -> String {
    let mut out = format!(
        "\nYou are to output the following in JSON format: {}. \nDo not put quotation marks or escape character \\ in the output fields.",
        schema.render()
    );

    if schema.contains_enumeration() {
        out.push_str("\nIf output field is a list, classify output into the best element of the list.");
    }

    if schema.contains_placeholder() {
        out.push_str(
            "\nAny text enclosed by < and > indicates you must generate content to replace it. Example input: Go to <location>, Example output: Go to the garden\nAny output key containing < and > indicates you must generate the key name to replace it. Example input: {'<location>': 'description of location'}, Example output: {school: a place for education}",
        );
    }

    if prompt_count > 1 {
        out.push_str("\nGenerate a list of JSON objects, one for each user query.");
    }

    out
}
