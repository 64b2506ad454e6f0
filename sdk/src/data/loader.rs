use crate::error::DataError;
use crate::models::user::User;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads user records from a CSV file with the `id,name,email` layout.
///
/// Rows with fewer than three fields or with a non-numeric id (e.g. the header)
/// are skipped.
#[derive(Debug, Clone)]
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_users(&self, limit: Option<usize>) -> Result<Vec<User>, DataError> {
        let content = fs::read_to_string(&self.path)?;
        let users = parse_users(&content, limit);
        info!(
            "Loaded {} users from: {}",
            users.len(),
            self.path.display()
        );
        Ok(users)
    }
}

pub fn parse_users(content: &str, limit: Option<usize>) -> Vec<User> {
    let mut users = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if limit.is_some_and(|limit| users.len() >= limit) {
            break;
        }

        let line = line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_record(line);
        if fields.len() < 3 {
            debug!("Skipping line {}: expected 3 fields", index + 1);
            continue;
        }

        let Ok(id) = fields[0].trim().parse::<u64>() else {
            debug!("Skipping line {}: invalid user ID", index + 1);
            continue;
        };

        users.push(User::new(id, fields[1].trim(), fields[2].trim()));
    }
    users
}

fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn should_skip_header_and_malformed_rows() {
        let content = "id,name,email\n1,Nguyễn Văn An,an@gmail.com\nbroken\nx,Bad,bad@x.com\n2,Trần Thị Bình,binh@yahoo.com\n";
        let users = parse_users(content, None);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], User::new(1, "Nguyễn Văn An", "an@gmail.com"));
        assert_eq!(users[1].id, 2);
    }

    #[test]
    fn should_respect_limit() {
        let content = "1,A,a@x.com\n2,B,b@x.com\n3,C,c@x.com\n";
        let users = parse_users(content, Some(2));
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "B");
    }

    #[test]
    fn should_handle_quoted_fields() {
        let users = parse_users("7,\"Lê, Văn \"\"Cường\"\"\",cuong@x.com", None);
        assert_eq!(users[0].name, "Lê, Văn \"Cường\"");
    }

    #[test]
    fn should_fail_for_missing_file() {
        let result = DataLoader::new("definitely/missing/users.csv");
        assert!(matches!(result, Err(DataError::FileNotFound(_))));
    }

    #[test]
    fn should_load_users_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,name,email").unwrap();
        writeln!(file, "10,Ann,ann@x.com").unwrap();
        let loader = DataLoader::new(file.path()).unwrap();
        let users = loader.load_users(None).unwrap();
        assert_eq!(users, vec![User::new(10, "Ann", "ann@x.com")]);
    }
}
