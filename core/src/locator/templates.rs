use super::Scope;

pub const GLOBAL_CONFIG_TEMPLATE: &str = r#"{
  "permissions": {
    "allow": [],
    "deny": []
  },
  "env": {}
}"#;

pub const PROJECT_CONFIG_TEMPLATE: &str = r#"# Claude Project Configuration

Add your project-specific instructions for Claude here.

## Project Overview
- Describe your project
- Tech stack
- Important conventions

## Code Style
- Formatting preferences
- Naming conventions
- Testing approach

## AI Instructions
- How Claude should help with this project
- What to avoid
- Preferred patterns
"#;

pub fn config_template(scope: Scope) -> &'static str {
    match scope {
        Scope::Global => GLOBAL_CONFIG_TEMPLATE,
        Scope::Project => PROJECT_CONFIG_TEMPLATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_template_is_settings_json() {
        let value: serde_json::Value = serde_json::from_str(config_template(Scope::Global)).unwrap();
        assert_eq!(value["permissions"]["allow"], serde_json::json!([]));
        assert_eq!(value["permissions"]["deny"], serde_json::json!([]));
        assert_eq!(value["env"], serde_json::json!({}));
    }

    #[test]
    fn project_template_has_sections() {
        let template = config_template(Scope::Project);
        for heading in ["## Project Overview", "## Code Style", "## AI Instructions"] {
            assert!(template.contains(heading), "missing {heading}");
        }
    }
}
