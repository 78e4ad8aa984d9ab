//! Priority window sampling.

use rand::seq::index;
use rand::Rng;

use crate::models::{hours, ChannelId, DayWindow, Minute, PriorityBlock};

/// Maximum jitter, in minutes, applied to each window edge.
pub const WINDOW_JITTER: Minute = 20;

/// Smallest channel subset a window selects.
const MIN_PRIORITIZED: usize = 2;

/// Canonical prioritized window before jitter.
#[derive(Debug, Clone, Copy)]
pub struct PriorityWindow {
    pub name: &'static str,
    pub anchor_start: Minute,
    pub anchor_end: Minute,
    /// Share of channels prioritized in this window, in percent
    pub channel_pct: usize,
}

/// Morning news, afternoon family and prime-time windows.
pub const PRIORITY_WINDOWS: [PriorityWindow; 3] = [
    PriorityWindow {
        name: "morning",
        anchor_start: hours(7),
        anchor_end: hours(9),
        channel_pct: 35,
    },
    PriorityWindow {
        name: "afternoon",
        anchor_start: hours(15),
        anchor_end: hours(17),
        channel_pct: 45,
    },
    PriorityWindow {
        name: "prime",
        anchor_start: hours(19),
        anchor_end: hours(22),
        channel_pct: 60,
    },
];

/// Number of channels a window selects out of `channel_count`.
///
/// `max(2, floor(count * pct / 100))`, never more than the channels available.
pub fn prioritized_count(channel_count: usize, pct: usize) -> usize {
    (channel_count * pct / 100)
        .max(MIN_PRIORITIZED)
        .min(channel_count)
}

/// Sample the three priority blocks, ordered by ascending start.
///
/// Each edge is jittered independently and clipped to the day. Blocks may
/// overlap each other; overlaps are left as they are.
pub fn sample_priority_blocks<R: Rng + ?Sized>(
    rng: &mut R,
    day: DayWindow,
    channel_count: usize,
) -> Vec<PriorityBlock> {
    let mut blocks: Vec<PriorityBlock> = PRIORITY_WINDOWS
        .iter()
        .map(|window| {
            let start = day.clamp(window.anchor_start + jitter(rng));
            let end = day.clamp(window.anchor_end + jitter(rng)).max(start);

            let amount = prioritized_count(channel_count, window.channel_pct);
            let allowed_channels = if amount == 0 {
                Vec::new()
            } else {
                index::sample(rng, channel_count, amount)
                    .into_iter()
                    .map(|i| ChannelId::new(i as u32))
                    .collect()
            };

            log::debug!(
                "Priority window '{}' [{}, {}) selects {} of {} channels",
                window.name,
                start,
                end,
                amount,
                channel_count
            );

            PriorityBlock {
                start,
                end,
                allowed_channels,
            }
        })
        .collect();

    blocks.sort_by_key(|b| b.start);
    blocks
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Minute {
    rng.gen_range(-WINDOW_JITTER..=WINDOW_JITTER)
}
