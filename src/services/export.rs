//! Export service implementation
//!
//! Builds a CSV snapshot of the user registry for operators.

use chrono::Utc;
use crate::database::UserRepository;
use crate::models::User;
use crate::utils::errors::Result;
use crate::utils::helpers::{csv_escape, format_timestamp};

#[derive(Debug, Clone)]
pub struct ExportService {
    users: UserRepository,
}

impl ExportService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Produce a CSV document of all known users
    pub async fn users_csv(&self) -> Result<ExportedDocument> {
        let users = self.users.list_all().await?;
        let body = render_users_csv(&users);

        Ok(ExportedDocument {
            filename: format!("chatwarden_users_{}.csv", Utc::now().timestamp()),
            bytes: body.into_bytes(),
            rows: users.len(),
        })
    }
}

/// An in-memory export ready to be sent as a document
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

fn render_users_csv(users: &[User]) -> String {
    let mut out = String::from("User ID,Username,Name,Language,Joined,Status\n");
    for user in users {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            user.user_id,
            csv_escape(user.username.as_deref().unwrap_or("")),
            csv_escape(&user.full_name),
            csv_escape(user.language.as_deref().unwrap_or("")),
            format_timestamp(user.joined_at),
            user.status
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    #[test]
    fn test_render_csv() {
        let users = vec![User {
            user_id: 1,
            username: Some("alice".to_string()),
            full_name: "Alice, the First".to_string(),
            language: Some("en".to_string()),
            joined_at: Utc::now(),
            status: UserStatus::Approved,
        }];

        let csv = render_users_csv(&users);
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "User ID,Username,Name,Language,Joined,Status");

        let row = lines.next().unwrap();
        assert!(row.starts_with("1,alice,\"Alice, the First\",en,"));
        assert!(row.ends_with("approved"));
    }

    #[test]
    fn test_render_csv_empty() {
        let csv = render_users_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }
}
