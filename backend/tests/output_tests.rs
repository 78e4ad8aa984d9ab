mod support;

use std::fs;

use instance_gen::config::OutputSettings;
use instance_gen::io::{instance_checksum, write_debug_csv, write_instance_json, write_outputs};
use instance_gen::models::Instance;
use instance_gen::services::{AllocationStrategy, InstanceAssembler};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use support::live_pool;

fn sample_instance(seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    InstanceAssembler::default()
        .assemble(
            &mut rng,
            &live_pool(10),
            4,
            AllocationStrategy::RoundRobin { min_per_channel: 5 },
        )
        .unwrap()
}

#[test]
fn json_output_uses_solver_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Output").join("instance.json");
    let instance = sample_instance(3);

    write_instance_json(&instance, &path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    for key in [
        "opening_time",
        "closing_time",
        "min_duration",
        "max_consecutive_genre",
        "channels_count",
        "switch_penalty",
        "termination_penalty",
        "priority_blocks",
        "time_preferences",
        "channels",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
    let program = &value["channels"][0]["programs"][0];
    assert_eq!(program["program_id"], "CH0_P0");
    assert!(program["link"].as_str().unwrap().contains("watch?v="));
    assert!(value["priority_blocks"][0]["allowed_channels"].is_array());
    assert!(value["time_preferences"][0]["preferred_genre"].is_string());
}

#[test]
fn csv_has_one_row_per_program() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("livestream_urls.csv");
    let instance = sample_instance(4);

    write_debug_csv(&instance, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), instance.program_count() + 1);
    assert_eq!(
        lines[0],
        "channel_id,channel_name,program_id,start,end,genre,score,url"
    );
    assert!(lines[1].starts_with("0,\"Channel 1\",CH0_P0,420,"));
}

#[test]
fn write_outputs_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputSettings {
        directory: dir.path().join("Output"),
        ..OutputSettings::default()
    };
    let instance = sample_instance(5);

    write_outputs(&instance, &output).unwrap();
    let parsed: Instance =
        serde_json::from_str(&fs::read_to_string(output.instance_path()).unwrap()).unwrap();
    assert_eq!(parsed, instance);
    let dump = fs::read_to_string(output.debug_path()).unwrap();
    assert_eq!(dump.lines().count(), instance.program_count() + 1);
}

#[test]
fn failed_instance_write_leaves_no_debug_dump() {
    let dir = tempfile::tempdir().unwrap();
    let output = OutputSettings {
        directory: dir.path().to_path_buf(),
        instance_file: "taken".to_string(),
        ..OutputSettings::default()
    };
    // A directory where the instance file should go makes the write fail.
    fs::create_dir(output.instance_path()).unwrap();

    let err = write_outputs(&sample_instance(6), &output).unwrap_err();
    assert!(err.to_string().contains("taken"));
    assert!(!output.debug_path().exists());
}

#[test]
fn checksum_is_stable_for_a_seed() {
    let a = instance_checksum(&sample_instance(21)).unwrap();
    let b = instance_checksum(&sample_instance(21)).unwrap();
    let c = instance_checksum(&sample_instance(22)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.len(), 64);
}
