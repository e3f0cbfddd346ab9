//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{Analysis, Family, Organization, Repository, ResourceId, Role, Severity, User};

const SEVERITY_NAMES: [&str; 5] = ["Info", "Low", "Medium", "High", "Critical"];

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // User Fixtures
    // =========================================================================

    /// Create a minimal user with only an ID and username.
    pub fn minimal_user(id: i64, username: &str) -> User {
        User {
            id: Some(ResourceId::Text(id.to_string())),
            status: Some("0".to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }
    }

    /// Create the security manager account most scans run under.
    pub fn security_manager() -> User {
        User {
            firstname: Some("Security".to_string()),
            lastname: Some("Manager".to_string()),
            email: Some("secman@example.com".to_string()),
            created_time: Some("1432921843".to_string()),
            modified_time: Some("1453473716".to_string()),
            last_login: Some("1454350174".to_string()),
            last_login_ip: Some("172.20.0.10".to_string()),
            must_change_password: Some("false".to_string()),
            locked: Some("false".to_string()),
            failed_logins: Some("0".to_string()),
            auth_type: Some("tns".to_string()),
            organization: Some(Organization {
                id: Some(ResourceId::Text("1".to_string())),
                name: Some("Example Org".to_string()),
                description: Some(String::new()),
            }),
            role: Some(Role {
                id: Some(ResourceId::Text("2".to_string())),
                name: Some("Security Manager".to_string()),
                description: Some("Manages scans and results".to_string()),
            }),
            uuid: Some("3c2f7d3e-0000-4000-8000-000000000002".to_string()),
            ..Self::minimal_user(2, "secman")
        }
    }

    // =========================================================================
    // Repository Fixtures
    // =========================================================================

    /// Create an IPv4 repository.
    pub fn repository(id: i64, name: &str, repository_type: &str) -> Repository {
        Repository {
            id: Some(ResourceId::Text(id.to_string())),
            name: Some(name.to_string()),
            description: Some(String::new()),
            data_format: Some("IPv4".to_string()),
            repository_type: Some(repository_type.to_string()),
            uuid: Some(format!("9f5e0e4c-0000-4000-8000-{id:012}")),
        }
    }

    // =========================================================================
    // Analysis Fixtures
    // =========================================================================

    /// Create a vulnerability row. `severity` is 0 (info) through 4 (critical).
    pub fn vulnerability(plugin_id: &str, name: &str, ip: &str, severity: usize) -> Analysis {
        let severity = severity.min(SEVERITY_NAMES.len() - 1);
        Analysis {
            plugin_id: Some(plugin_id.to_string()),
            severity: Some(Severity {
                id: Some(ResourceId::Text(severity.to_string())),
                name: Some(SEVERITY_NAMES[severity].to_string()),
                description: None,
            }),
            vpr_score: Some(String::new()),
            ip: Some(ip.to_string()),
            port: Some("0".to_string()),
            protocol: Some("TCP".to_string()),
            name: Some(name.to_string()),
            family: Some(Family {
                id: Some(ResourceId::Text("41".to_string())),
                name: Some("Settings".to_string()),
                family_type: Some("active".to_string()),
            }),
            repository: Some(Self::repository(1, "Main", "Local")),
            plugin_info: Some(format!("{plugin_id} (0/6) {name}")),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub current_user: User,
    pub repositories: Vec<Repository>,
    pub vulnerabilities: Vec<Analysis>,
}

impl DefaultScenario {
    fn new() -> Self {
        let repositories = vec![
            Fixtures::repository(1, "Main", "Local"),
            Fixtures::repository(2, "DMZ", "Local"),
            Fixtures::repository(3, "Branch Office", "Remote"),
        ];

        let hosts = ["10.0.0.1", "10.0.0.2", "10.0.0.3"];
        let mut vulnerabilities: Vec<Analysis> = hosts
            .iter()
            .map(|ip| Fixtures::vulnerability("19506", "Nessus Scan Information", ip, 0))
            .collect();
        vulnerabilities.push(Fixtures::vulnerability(
            "14272",
            "Netstat Portscanner (SSH)",
            "10.0.0.1",
            0,
        ));
        vulnerabilities.push(Fixtures::vulnerability(
            "11219",
            "Nessus SYN scanner",
            "10.0.0.2",
            0,
        ));
        vulnerabilities.push(Fixtures::vulnerability(
            "156032",
            "Apache Log4j Unsupported Version Detection",
            "10.0.0.3",
            4,
        ));

        Self {
            current_user: Fixtures::security_manager(),
            repositories,
            vulnerabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_manager() {
        let user = Fixtures::security_manager();
        assert_eq!(user.username.as_deref(), Some("secman"));
        assert_eq!(user.display_name().as_deref(), Some("Security Manager"));
        assert!(!user.is_locked());
    }

    #[test]
    fn test_vulnerability_severity() {
        let vuln = Fixtures::vulnerability("156032", "Log4j", "10.0.0.3", 4);
        assert_eq!(vuln.severity_name(), Some("Critical"));

        let clamped = Fixtures::vulnerability("1", "x", "10.0.0.1", 99);
        assert_eq!(clamped.severity_name(), Some("Critical"));
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.repositories.len(), 3);
        assert_eq!(scenario.vulnerabilities.len(), 6);
        assert!(scenario.current_user.id.is_some());
    }
}
