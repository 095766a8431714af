use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use std::fs;
use std::path::Path;

pub fn run(data_dir: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if data_dir.is_dir() {
        result.add_message(CmdMessage::warning(format!(
            "fluxtodo store already exists at {}",
            data_dir.display()
        )));
        return Ok(result);
    }

    fs::create_dir_all(data_dir)?;
    result.add_message(CmdMessage::success(format!(
        "Initialized fluxtodo store at {}",
        data_dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("a").join("b");

        let result = run(&data_dir).unwrap();

        assert!(data_dir.is_dir());
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn existing_dir_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path()).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(!result.has_errors());
    }
}
