//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Analysis, Repository, User};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Trait for human-readable key-value output.
///
/// Implemented by model types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let header = format!("User: {}", self.username.as_deref().unwrap_or("-"));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref id) = self.id {
            lines.push(format!("ID:             {}", id));
        }

        if let Some(name) = self.display_name() {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(email) = self.email.as_ref().filter(|e| !e.is_empty()) {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(role) = self.role.as_ref().and_then(|r| r.name.as_ref()) {
            lines.push(format!("Role:           {}", role));
        }

        let organization = self
            .organization
            .as_ref()
            .and_then(|o| o.name.as_ref())
            .or(self.org_name.as_ref());
        if let Some(organization) = organization {
            lines.push(format!("Organization:   {}", organization));
        }

        if let Some(last_login) = self.last_login_at() {
            let from = self
                .last_login_ip
                .as_deref()
                .map(|ip| format!(" from {ip}"))
                .unwrap_or_default();
            lines.push(format!(
                "Last Login:     {}{}",
                last_login.format(TIME_FORMAT),
                from
            ));
        }

        if self.is_locked() {
            lines.push("Status:         locked".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Repository {
    fn pretty_print(&self) -> String {
        let header = format!("Repository: {}", self.name.as_deref().unwrap_or("-"));
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref id) = self.id {
            lines.push(format!("ID:             {}", id));
        }

        if let Some(ref repository_type) = self.repository_type {
            lines.push(format!("Type:           {}", repository_type));
        }

        if let Some(ref data_format) = self.data_format {
            lines.push(format!("Data Format:    {}", data_format));
        }

        if let Some(description) = self.description.as_ref().filter(|d| !d.is_empty()) {
            lines.push(format!("Description:    {}", description));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Analysis {
    fn pretty_print(&self) -> String {
        let header = format!(
            "Plugin {}: {}",
            self.plugin_id.as_deref().unwrap_or("-"),
            self.name.as_deref().unwrap_or("-")
        );
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(severity) = self.severity_name() {
            lines.push(format!("Severity:       {}", severity));
        }

        if let Some(score) = self.vpr_score.as_ref().filter(|s| !s.is_empty()) {
            lines.push(format!("VPR:            {}", score));
        }

        if let Some(ref ip) = self.ip {
            let host = match self.dns_name.as_deref().filter(|d| !d.is_empty()) {
                Some(dns) => format!("{ip} ({dns})"),
                None => ip.clone(),
            };
            lines.push(format!("Host:           {}", host));
        }

        if let (Some(port), Some(protocol)) = (&self.port, &self.protocol) {
            lines.push(format!("Port:           {}/{}", port, protocol));
        }

        if let Some(family) = self.family.as_ref().and_then(|f| f.name.as_ref()) {
            lines.push(format!("Family:         {}", family));
        }

        if let Some(repository) = self.repository.as_ref().and_then(|r| r.name.as_ref()) {
            lines.push(format!("Repository:     {}", repository));
        }

        lines.join("\n")
    }
}
