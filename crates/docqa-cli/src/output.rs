use docqa_core::ActionError;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a slice's `last_error` and fail the command.
pub fn fail<T>(error: &ActionError, format: OutputFormat) -> anyhow::Result<T> {
    output(error, format)?;
    anyhow::bail!("{error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_single_line() {
        let rendered = render(&serde_json::json!({"a": 1, "b": [1, 2]}), OutputFormat::Raw).unwrap();
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn errors_render_with_their_kind() {
        let rendered = render(&ActionError::rejected(401, "invalid credentials"), OutputFormat::Raw)
            .unwrap();
        assert!(rendered.contains(r#""kind":"rejected""#));
        assert!(rendered.contains("invalid credentials"));
    }
}
