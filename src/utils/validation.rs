use validator::{Validate, ValidationErrors};

pub fn validate<T: Validate>(val: &T) -> Result<(), String> {
    val.validate().map_err(|errors| describe(&errors))
}

/// Flattens field errors into `field: message` pairs for logs and error messages.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}
