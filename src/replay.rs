//! Frame trace replay
//!
//! A trace is JSON lines, one host frame per line:
//!
//! ```text
//! {"t_ms": 0, "x": 960, "y": 220, "menu": true, "keys": ["T"], "scale": 1.0}
//! ```
//!
//! `menu` defaults to true, `keys` to none and `scale` to the configured
//! UI scale. Lines that are blank, not UTF-8 or not a frame are logged and
//! skipped; only a failing reader stops the replay.

use crate::announcer::ManualClock;
use crate::hover::Region;
use crate::state::{Frame, State};
use crate::Result;
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::BufRead;
use std::time::{Duration, Instant};

/// One line of a frame trace
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceFrame {
    pub t_ms: u64,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_menu")]
    pub menu: bool,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub scale: Option<f64>,
}

fn default_menu() -> bool {
    true
}

impl TraceFrame {
    pub fn to_frame(&self) -> Frame {
        let mut frame = Frame::at(self.x, self.y).with_keys(self.keys.iter().cloned());
        frame.menu_active = self.menu;
        frame.ui_scale = self.scale;
        frame
    }
}

/// How trace timestamps reach the announcer clock
pub enum Pacing {
    /// Timestamps are set on this clock, which the state must be reading
    Trace(ManualClock),

    /// Sleep until each timestamp; the state reads a monotonic clock
    Realtime(Instant),
}

/// One announcement made during a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub t_ms: u64,
    pub text: String,
}

/// Totals for a finished replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub skipped: usize,
    pub announcements: Vec<Announcement>,
}

/// Feed every frame of `reader` through `state`
///
/// `on_announce` sees each announcement as it happens, so a realtime
/// replay can print while it runs.
pub fn replay<R: BufRead>(
    reader: R,
    state: &mut State,
    regions: &[Region],
    pacing: &Pacing,
    mut on_announce: impl FnMut(&Announcement),
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (line_no, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!("Skipping trace line {}: {}", line_no + 1, e);
                summary.skipped += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let record: TraceFrame = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping trace line {}: {}", line_no + 1, e);
                summary.skipped += 1;
                continue;
            }
        };

        let at = Duration::from_millis(record.t_ms);
        match pacing {
            Pacing::Trace(clock) => clock.set(at),
            Pacing::Realtime(started) => {
                if let Some(wait) = at.checked_sub(started.elapsed()) {
                    std::thread::sleep(wait);
                }
            }
        }

        let outcome = state.frame(&record.to_frame(), regions);
        summary.frames += 1;
        if let Some(text) = outcome.announced {
            let announcement = Announcement {
                t_ms: record.t_ms,
                text,
            };
            on_announce(&announcement);
            summary.announcements.push(announcement);
        }
        debug!("Frame {} at {:?}: hovered {:?}", summary.frames, at, outcome.hovered);
    }

    info!(
        "Trace finished: {} frames, {} skipped, {} announcements",
        summary.frames,
        summary.skipped,
        summary.announcements.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hover::{Catalog, Rect};
    use crate::speech::RecordingSynth;
    use crate::state::config::Config;
    use std::io::{self, Cursor, Read};
    use std::path::PathBuf;

    fn state() -> (State, RecordingSynth, ManualClock) {
        let synth = RecordingSynth::new();
        let clock = ManualClock::new();
        let state = State::new(
            Config::in_memory(PathBuf::from("unused.cfg")),
            Box::new(synth.clone()),
            Box::new(Catalog::empty()),
            Box::new(clock.clone()),
        );
        (state, synth, clock)
    }

    fn layout() -> Vec<Region> {
        vec![
            Region::indexed(Rect::new(0.0, 0.0, 100.0, 40.0), 1, "Single Player"),
            Region::indexed(Rect::new(0.0, 45.0, 100.0, 85.0), 2, "Multiplayer"),
        ]
    }

    fn run(trace: &[u8]) -> (ReplaySummary, RecordingSynth) {
        let (mut state, synth, clock) = state();
        let summary = replay(
            Cursor::new(trace.to_vec()),
            &mut state,
            &layout(),
            &Pacing::Trace(clock),
            |_| {},
        )
        .unwrap();
        (summary, synth)
    }

    #[test]
    fn test_trace_frame_defaults() {
        let record: TraceFrame = serde_json::from_str(r#"{"t_ms": 5, "x": 1, "y": 2}"#).unwrap();
        assert!(record.menu);
        assert!(record.keys.is_empty());
        assert_eq!(record.scale, None);

        let frame = record.to_frame();
        assert!(frame.menu_active);
        assert!(frame.keys_down.is_empty());
        assert_eq!(frame.ui_scale, None);
    }

    #[test]
    fn test_debounce_follows_timestamps() {
        let (summary, synth) = run(b"{\"t_ms\": 0, \"x\": 50, \"y\": 20}\n\
              {\"t_ms\": 299, \"x\": 50, \"y\": 20}\n\
              {\"t_ms\": 300, \"x\": 50, \"y\": 20}\n");

        assert_eq!(summary.frames, 3);
        assert_eq!(
            summary.announcements,
            vec![Announcement {
                t_ms: 300,
                text: "Single Player".to_string(),
            }]
        );
        assert_eq!(synth.texts(), vec!["Single Player".to_string()]);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let (summary, synth) = run(b"{\"t_ms\": 0, \"x\": 50, \"y\": 60}\n\
              \xff\xfe\n\
              not json\n\
              \n\
              {\"t_ms\": 300, \"x\": 50, \"y\": 60}\n");

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(synth.texts(), vec!["Multiplayer".to_string()]);
    }

    #[test]
    fn test_menu_closed_drops_pending() {
        let (summary, synth) = run(b"{\"t_ms\": 0, \"x\": 50, \"y\": 20}\n\
              {\"t_ms\": 100, \"x\": 50, \"y\": 20, \"menu\": false}\n\
              {\"t_ms\": 500, \"x\": 50, \"y\": 20, \"menu\": false}\n");

        assert_eq!(summary.frames, 3);
        assert!(summary.announcements.is_empty());
        assert!(synth.texts().is_empty());
    }

    #[test]
    fn test_keys_and_scale_fields() {
        // (150, 60) only lands on Single Player at scale 2.0
        let (summary, synth) = run(b"{\"t_ms\": 0, \"x\": 150, \"y\": 60, \"scale\": 2.0, \"keys\": [\"T\"]}\n\
              {\"t_ms\": 300, \"x\": 150, \"y\": 60, \"scale\": 2.0}\n");

        assert_eq!(summary.announcements.len(), 1);
        assert_eq!(summary.announcements[0].text, "Single Player");
        assert_eq!(
            synth.texts(),
            vec!["Testing speech output".to_string(), "Single Player".to_string()]
        );
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "trace source closed"))
        }
    }

    #[test]
    fn test_reader_failure_stops_replay() {
        let (mut state, _synth, clock) = state();
        let result = replay(
            io::BufReader::new(FailingReader),
            &mut state,
            &layout(),
            &Pacing::Trace(clock),
            |_| {},
        );
        assert!(matches!(result, Err(crate::HoverspeakError::Io(_))));
    }
}
