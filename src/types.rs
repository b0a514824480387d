use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mail::MailConfig;
use crate::notion::NotionConfig;
use crate::roster::TeamMember;

/// Workflow selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowId {
    /// Create today's memo page if it does not exist yet
    Create,
    /// Email today's memo to the roster
    Send,
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowId::Create => write!(f, "create"),
            WorkflowId::Send => write!(f, "send"),
        }
    }
}

/// Configuration loaded from ~/.daily-memo/config.json plus environment overrides.
///
/// Secrets (`notion.token`, `mail.password`) are normally left out of the file
/// and supplied through NOTION_TOKEN / EMAIL_PASSWORD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default, alias = "team")]
    pub roster: Vec<TeamMember>,
}

impl Config {
    /// Check the settings `workflow` needs before anything is contacted.
    ///
    /// Both workflows need Notion; only `send` needs mail settings and a roster.
    pub fn validate(&self, workflow: WorkflowId) -> Result<(), ConfigError> {
        let mut required = vec![
            ("NOTION_TOKEN", &self.notion.token),
            ("NOTION_DATABASE_ID", &self.notion.database_id),
        ];
        if workflow == WorkflowId::Create {
            return check_present(&required);
        }

        required.push(("EMAIL_HOST", &self.mail.host));
        required.push(("EMAIL_FROM", &self.mail.from));
        check_present(&required)?;

        if self.roster.is_empty() {
            return Err(ConfigError::Missing("roster"));
        }
        if let Some(member) = self.roster.iter().find(|m| !m.email.contains('@')) {
            return Err(ConfigError::Invalid {
                key: "roster.email",
                value: member.email.clone(),
            });
        }

        Ok(())
    }
}

fn check_present(required: &[(&'static str, &String)]) -> Result<(), ConfigError> {
    match required.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((key, _)) => Err(ConfigError::Missing(*key)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Config {
        let mut config = Config::default();
        config.notion.token = "secret_abc".to_string();
        config.notion.database_id = "db-123".to_string();
        config.mail.host = "smtp.example.com".to_string();
        config.mail.from = "memo@example.com".to_string();
        config.roster = vec![TeamMember::new("Brook", "brook@example.com", "PST")];
        config
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete().validate(WorkflowId::Create).is_ok());
        assert!(complete().validate(WorkflowId::Send).is_ok());
    }

    #[test]
    fn test_validate_missing_token() {
        let mut config = complete();
        config.notion.token.clear();
        assert!(matches!(
            config.validate(WorkflowId::Create),
            Err(ConfigError::Missing("NOTION_TOKEN"))
        ));
    }

    #[test]
    fn test_validate_empty_roster() {
        let mut config = complete();
        config.roster.clear();
        assert!(matches!(
            config.validate(WorkflowId::Send),
            Err(ConfigError::Missing("roster"))
        ));
    }

    #[test]
    fn test_validate_bad_recipient() {
        let mut config = complete();
        config.roster.push(TeamMember::new("Nobody", "nobody", "UTC"));
        assert!(matches!(
            config.validate(WorkflowId::Send),
            Err(ConfigError::Invalid { key: "roster.email", .. })
        ));
    }

    #[test]
    fn test_create_does_not_need_mail_settings() {
        let mut config = complete();
        config.mail = MailConfig::default();
        config.roster.clear();

        assert!(config.validate(WorkflowId::Create).is_ok());
        assert!(matches!(
            config.validate(WorkflowId::Send),
            Err(ConfigError::Missing("EMAIL_HOST"))
        ));
    }

    #[test]
    fn test_workflow_id_display() {
        assert_eq!(WorkflowId::Create.to_string(), "create");
        assert_eq!(WorkflowId::Send.to_string(), "send");
    }

    #[test]
    fn test_defaults_from_minimal_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "notion": { "databaseId": "db-123" },
                "mail": { "host": "smtp.example.com", "from": "memo@example.com" },
                "team": [{ "name": "Gus", "email": "gus@example.com", "utcOffset": "UTC-5" }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.notion.api_base, "https://api.notion.com");
        assert_eq!(config.notion.notion_version, "2022-06-28");
        assert_eq!(config.mail.port, 587);
        assert_eq!(config.roster[0].utc_offset, "UTC-5");
    }
}
