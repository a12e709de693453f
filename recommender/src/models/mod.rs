mod recommendation;

pub use recommendation::*;

use validator::ValidationErrors;

/// Flatten validator errors into a single stable, human-readable message.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: failed `{}` check", error.code),
            })
        })
        .collect();

    messages.sort();

    if messages.is_empty() {
        "Request failed validation".to_string()
    } else {
        messages.join("; ")
    }
}
