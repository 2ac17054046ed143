use serde::Deserialize;

/// User settings for generated statements.
///
/// Every field falls back to its default, so partial JSON (for instance LSP
/// `initializationOptions`) is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Function called by the generated statement.
    pub log_function: String,
    pub line_terminator: String,
    /// One level of indentation, used by the reformatter.
    pub indent_unit: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_function: "console.log".to_owned(),
            line_terminator: "\n".to_owned(),
            indent_unit: "    ".to_owned(),
        }
    }
}

impl Config {
    /// Returns the statement logging `label`, terminated by a line terminator.
    pub fn statement(&self, label: &str) -> String {
        format!("{}({label});{}", self.log_function, self.line_terminator)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_value(serde_json::json!({ "logFunction": "debug" })).unwrap();

        assert_eq!(
            config,
            Config { log_function: "debug".to_owned(), ..Config::default() }
        );
    }

    #[test]
    fn statement() {
        let config = Config::default();
        assert_eq!(config.statement("'x', x"), "console.log('x', x);\n");
    }
}
