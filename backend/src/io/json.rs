//! JSON instance writer.

use std::path::Path;

use super::write_file;
use crate::error::GeneratorResult;
use crate::models::Instance;

/// Write `instance` to `path` as pretty-printed JSON.
///
/// # Errors
/// Returns an output error if the directory or file cannot be written.
pub fn write_instance_json(instance: &Instance, path: &Path) -> GeneratorResult<()> {
    write_file(path, render_instance_json(instance)?.as_bytes(), "write_instance_json")?;
    log::info!("Instance written to {}", path.display());
    Ok(())
}

pub fn render_instance_json(instance: &Instance) -> GeneratorResult<String> {
    Ok(serde_json::to_string_pretty(instance)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, ChannelId, Genre, Program, TimePreference};
    use std::fs;

    fn tiny_instance() -> Instance {
        Instance {
            opening_time: 420,
            closing_time: 480,
            min_duration: 30,
            max_consecutive_genre: 2,
            channels_count: 1,
            switch_penalty: 3,
            termination_penalty: 15,
            priority_blocks: vec![],
            time_preferences: vec![TimePreference {
                start: 420,
                end: 480,
                preferred_genre: Genre::News,
                bonus: 50,
            }],
            channels: vec![Channel {
                channel_id: ChannelId::new(0),
                channel_name: "Channel 1".to_string(),
                programs: vec![Program {
                    program_id: "CH0_P0".to_string(),
                    start: 420,
                    end: 480,
                    genre: Genre::News,
                    score: 77,
                    link: None,
                }],
            }],
        }
    }

    #[test]
    fn test_write_creates_directory_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("instance.json");

        write_instance_json(&tiny_instance(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"channels_count\": 1"));
        assert!(!content.contains("\"link\""));

        let parsed: Instance = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, tiny_instance());
    }
}
