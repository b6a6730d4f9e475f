/// One line of the auth file: an opaque init-data credential.
#[derive(Debug, Clone, Default)]
pub struct Account {
    pub init_data: String,
}

impl Account {
    /// Last characters of the credential, for log lines. Credentials are
    /// secrets and never logged in full.
    pub fn preview(&self) -> String {
        tail_preview(&self.init_data)
    }
}

pub(crate) fn tail_preview(value: &str) -> String {
    let tail: String = value
        .chars()
        .rev()
        .take(20)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("...{tail}")
}

/// Read credentials from a newline-delimited file, skipping blank lines.
/// A missing file is logged and yields an empty list.
pub fn load_accounts(path: &str) -> Vec<Account> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Account {
                init_data: line.to_string(),
            })
            .collect(),
        Err(e) => {
            log::error!("Failed to read account file {path}: {e}");
            Vec::new()
        }
    }
}
