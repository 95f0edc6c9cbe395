//! Replay recorded beam-sensor traces through the lap timer.
//!
//! Usage: `lap-replay <trace.toml>`
//!
//! Trace format:
//!
//! ```toml
//! [band]
//! low = 100
//! high = 200
//!
//! [timing]
//! start = "flying"     # or "standing" (default)
//! min_lap_ms = 1000    # optional
//!
//! [[lanes]]
//! name = "P1"
//! channel = 0
//! samples = [[0, 900], [5200, 150], [5220, 900]]   # [t_ms, reading]
//! ```

use lap_beam::{
    DefaultConfig, LapError, LapOutcome, LapTime, LapTimer, ManualClock, Sensor, SensorChannel,
    SensorReading, StartMode, TimerConfig, TriggerBand,
};
use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::process::ExitCode;

/// Channels a trace may reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, SensorChannel)]
enum TraceChannel {
    Lane0 = 0,
    Lane1 = 1,
    Lane2 = 2,
    Lane3 = 3,
}

#[derive(Debug, Deserialize)]
struct Trace {
    #[serde(default)]
    band: TraceBand,
    #[serde(default)]
    timing: TraceTiming,
    lanes: Vec<TraceLane>,
}

#[derive(Debug, Deserialize)]
struct TraceBand {
    low: u16,
    high: u16,
}

impl Default for TraceBand {
    fn default() -> Self {
        Self {
            low: DefaultConfig::TRIGGER_LOW,
            high: DefaultConfig::TRIGGER_HIGH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TraceTiming {
    #[serde(default)]
    start: TraceStart,
    #[serde(default)]
    min_lap_ms: u32,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TraceStart {
    #[default]
    Standing,
    Flying,
}

impl From<TraceStart> for StartMode {
    fn from(start: TraceStart) -> Self {
        match start {
            TraceStart::Standing => StartMode::Standing,
            TraceStart::Flying => StartMode::Flying,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TraceLane {
    name: String,
    channel: u8,
    samples: Vec<(u32, SensorReading)>,
}

/// Sensor fed from the trace one sample at a time.
#[derive(Debug, Default)]
struct TraceSensor {
    value: SensorReading,
}

impl Sensor for TraceSensor {
    type Channel = TraceChannel;
    type Error = Infallible;

    fn read(&mut self, _channel: TraceChannel) -> Result<SensorReading, Self::Error> {
        Ok(self.value)
    }
}

#[derive(Debug)]
enum ReplayError {
    Read(std::io::Error),
    Parse(toml::de::Error),
    Band(LapError),
    Lap { lane: String, error: LapError },
    Unordered { lane: String, t_ms: u32 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Read(err) => write!(f, "cannot read trace: {}", err),
            ReplayError::Parse(err) => write!(f, "invalid trace: {}", err),
            ReplayError::Band(err) => write!(f, "invalid [band]: {}", err),
            ReplayError::Lap { lane, error } => write!(f, "{}: {}", lane, error),
            ReplayError::Unordered { lane, t_ms } => {
                write!(f, "{}: sample at {} ms is out of order", lane, t_ms)
            }
        }
    }
}

/// Per-lane replay result.
#[derive(Debug)]
struct LaneSummary {
    name: String,
    laps: u16,
    best: Option<u32>,
    average: Option<u32>,
}

fn replay_lane(
    lane: &TraceLane,
    band: TriggerBand,
    timing: &TraceTiming,
) -> Result<LaneSummary, ReplayError> {
    let lap_error = |error: LapError| ReplayError::Lap {
        lane: lane.name.clone(),
        error,
    };

    let start_ms = lane.samples.first().map_or(0, |&(t, _)| t);
    let clock = ManualClock::new(start_ms);
    let mut timer: LapTimer<_, _> = LapTimer::with_band(TraceSensor::default(), &clock, band)
        .start_mode(timing.start.into())
        .min_lap(timing.min_lap_ms);
    timer.start();

    let mut last_t = start_ms;
    for &(t_ms, reading) in &lane.samples {
        if t_ms < last_t {
            return Err(ReplayError::Unordered {
                lane: lane.name.clone(),
                t_ms,
            });
        }
        last_t = t_ms;

        clock.set(t_ms);
        timer.evaluator_mut().sensor_mut().value = reading;
        let update = timer.poll(lane.channel).map_err(lap_error)?;
        // On a trigger the update still carries the finished lap
        let completed = update.times.current_lap;

        match update.outcome {
            LapOutcome::Idle => {}
            LapOutcome::LapCompleted => {
                println!("{:>6} lap {:>3}  {}", lane.name, timer.lap_count(), LapTime(completed));
            }
            LapOutcome::NewBest => {
                println!(
                    "{:>6} lap {:>3}  {}  best",
                    lane.name,
                    timer.lap_count(),
                    LapTime(completed)
                );
            }
        }
    }

    Ok(LaneSummary {
        name: lane.name.clone(),
        laps: timer.lap_count(),
        best: timer.best_lap(),
        average: timer.history().average(),
    })
}

/// Parse a trace and replay every lane in order.
fn replay_trace(text: &str) -> Result<Vec<LaneSummary>, ReplayError> {
    let trace: Trace = toml::from_str(text).map_err(ReplayError::Parse)?;
    let band = TriggerBand::new(trace.band.low, trace.band.high).map_err(ReplayError::Band)?;

    trace
        .lanes
        .iter()
        .map(|lane| replay_lane(lane, band, &trace.timing))
        .collect()
}

fn run(path: &str) -> Result<(), ReplayError> {
    let text = std::fs::read_to_string(path).map_err(ReplayError::Read)?;

    for summary in replay_trace(&text)? {
        let best = summary.best.map(LapTime);
        let average = summary.average.map(LapTime);
        println!(
            "{:>6} laps {:>3}  best {}  avg {}",
            summary.name,
            summary.laps,
            best.map_or_else(|| lap_beam::display::NO_LAP.to_string(), |t| t.to_string()),
            average.map_or_else(|| lap_beam::display::NO_LAP.to_string(), |t| t.to_string()),
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: lap-replay <trace.toml>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lap-replay: {}", err);
            ExitCode::FAILURE
        }
    }
}
