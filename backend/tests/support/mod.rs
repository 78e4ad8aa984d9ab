#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use instance_gen::models::Candidate;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable the generator reads, for tests that need a clean slate.
pub const GENERATOR_ENV_KEYS: [&str; 8] = [
    "YOUTUBE_API_KEY",
    "GENERATOR_MODE",
    "GENERATOR_MAX_CHANNELS",
    "GENERATOR_INCLUDE_LINKS",
    "GENERATOR_SEED",
    "GENERATOR_DAYS_FROM",
    "GENERATOR_DAYS_TO",
    "GENERATOR_OUTPUT_DIR",
];

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Like [`with_scoped_env`], but first unsets every generator variable not
/// named in `changes`.
pub fn with_generator_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let named: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
    let mut all: Vec<(&str, Option<&str>)> = GENERATOR_ENV_KEYS
        .iter()
        .filter(|k| !named.contains(*k))
        .map(|k| (*k, None))
        .collect();
    all.extend_from_slice(changes);
    with_scoped_env(&all, f)
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Live-style pool cycling through a few recognizable titles and categories.
pub fn live_pool(size: usize) -> Vec<Candidate> {
    const TITLES: [(&str, Option<&str>); 6] = [
        ("Breaking News Live", Some("25")),
        ("Live Football Match Tonight", None),
        ("24/7 lofi music radio", Some("10")),
        ("Late night talk show", None),
        ("Speedrun gaming marathon", Some("20")),
        ("Untitled stream", None),
    ];

    (0..size)
        .map(|i| {
            let (title, category) = TITLES[i % TITLES.len()];
            let candidate = Candidate::new(format!("vid{:03}", i), title, format!("Uploader {}", i));
            match category {
                Some(code) => candidate.with_category(code),
                None => candidate,
            }
        })
        .collect()
}

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 12, hour, minute, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Upcoming-style candidate scheduled at `hour:minute` UTC.
pub fn scheduled(id: &str, title: &str, hour: u32, minute: u32) -> Candidate {
    Candidate::new(id, title, format!("{} channel", title)).with_schedule(
        Some(at(hour, minute)),
        None,
        None,
    )
}
