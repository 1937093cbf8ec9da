use crate::models::ExerciseSet;

/// Default tempo when a set has none recorded: 2s eccentric, no pause,
/// explosive concentric, no pause.
pub const DEFAULT_TEMPO: &str = "2010";

/// Per-phase seconds parsed from a 4-character tempo code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoPhases {
    pub eccentric: u32,
    pub pause_bottom: u32,
    pub concentric: u32,
    pub pause_top: u32,
}

impl TempoPhases {
    /// Parse a tempo code into per-phase seconds
    ///
    /// `X`/`x` (explosive) counts as 0 seconds, codes shorter than 4
    /// characters are right-padded with 0, extra characters are ignored,
    /// and any non-digit degrades to 0 rather than failing.
    pub fn parse(tempo: &str) -> Self {
        let mut seconds = [0u32; 4];
        for (i, c) in tempo.chars().take(4).enumerate() {
            seconds[i] = match c {
                'x' | 'X' => 0,
                _ => c.to_digit(10).unwrap_or(0),
            };
        }
        TempoPhases {
            eccentric: seconds[0],
            pause_bottom: seconds[1],
            concentric: seconds[2],
            pause_top: seconds[3],
        }
    }

    /// Total seconds for one repetition
    pub fn seconds_per_rep(&self) -> u32 {
        self.eccentric + self.pause_bottom + self.concentric + self.pause_top
    }
}

/// Time under tension in seconds for `reps` repetitions at `tempo`
pub fn time_under_tension(reps: u32, tempo: &str) -> u32 {
    if reps == 0 {
        return 0;
    }
    reps * TempoPhases::parse(tempo).seconds_per_rep()
}

/// Working time for a single set in seconds
///
/// Non-rep sets (timed carries, conditioning pieces) use their recorded
/// duration; rep-based sets derive time under tension from reps and tempo.
pub fn set_working_seconds(set: &ExerciseSet) -> u32 {
    if let Some(duration) = set.duration_seconds {
        return duration;
    }
    let reps = set.reps.unwrap_or(0);
    let tempo = set.tempo.as_deref().unwrap_or(DEFAULT_TEMPO);
    time_under_tension(reps, tempo)
}

/// Estimated session duration in seconds for a sequence of sets
///
/// Sums working time plus rest for every set, including rest after the
/// final set.
pub fn session_duration(sets: &[ExerciseSet]) -> u32 {
    sets.iter()
        .map(|set| set_working_seconds(set) + set.rest_seconds)
        .sum()
}
