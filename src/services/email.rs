use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use tokio::fs;

const MAX_SUBJECT_CHARS: usize = 50;

/// Errors that can occur when writing email stubs
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("I/O error writing email stub: {0}")]
    Io(#[from] std::io::Error),
}

/// Email content recorded to the outbox
#[derive(Debug, Clone)]
pub struct EmailStub {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Filesystem outbox standing in for a real mail provider
///
/// Each message becomes a timestamped `.txt` file with a `To:`/`Subject:`
/// header block so delivery can be inspected during development.
pub struct EmailOutbox {
    dir: PathBuf,
}

impl EmailOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a stub to the outbox directory, creating it if needed.
    ///
    /// Returns the path of the written file.
    pub async fn write_stub(&self, stub: &EmailStub) -> Result<PathBuf, EmailError> {
        fs::create_dir_all(&self.dir).await?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3fZ");
        let subject = sanitize_subject(&stub.subject);
        let path = self.dir.join(format!("{}-{}.txt", timestamp, subject));

        let content = format!("To: {}\nSubject: {}\n\n{}", stub.to, stub.subject, stub.body);
        fs::write(&path, content).await?;

        Ok(path)
    }
}

/// Reduce a subject line to a filename-safe slug.
fn sanitize_subject(subject: &str) -> String {
    let mut slug = String::new();
    let mut last_was_separator = false;

    for ch in subject.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            slug.push(ch);
            last_was_separator = false;
        } else if !last_was_separator {
            slug.push('_');
            last_was_separator = true;
        }
        if slug.len() >= MAX_SUBJECT_CHARS {
            break;
        }
    }

    let trimmed = slug.trim_matches('_');
    if trimmed.is_empty() {
        "message".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_subject() {
        assert_eq!(sanitize_subject("Offer: Evening Usher"), "Offer_Evening_Usher");
        assert_eq!(sanitize_subject("!!!"), "message");
        assert_eq!(sanitize_subject(""), "message");
    }

    #[test]
    fn test_sanitize_subject_truncates() {
        let long = "a".repeat(200);
        assert_eq!(sanitize_subject(&long).len(), MAX_SUBJECT_CHARS);
    }

    #[test]
    fn test_write_stub_creates_file() {
        tokio_test::block_on(async {
            let dir = std::env::temp_dir().join("gigs-match-outbox-test");
            let outbox = EmailOutbox::new(&dir);

            let stub = EmailStub {
                to: "worker@gigs.test".to_string(),
                subject: "Offer: Evening shift".to_string(),
                body: "Hi there,\n\nYou're invited.".to_string(),
            };

            let path = outbox.write_stub(&stub).await.expect("stub written");
            let content = tokio::fs::read_to_string(&path).await.expect("stub readable");

            assert!(content.starts_with("To: worker@gigs.test\n"));
            assert!(content.contains("Subject: Offer: Evening shift"));
            assert!(content.ends_with("You're invited."));

            tokio::fs::remove_file(&path).await.ok();
        });
    }
}
