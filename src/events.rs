// MorseWatch — Events & Data Types

// ---------------------------------------------------------------------------
// Motion sample (ICM-42670 reading, physical units)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionSample {
    /// Acceleration in g.
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    /// Angular rate in °/s.
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
    /// Die temperature in °C.
    pub temp: f32,
}

impl MotionSample {
    /// A sample with only the accelerometer populated.
    pub const fn accel(ax: f32, ay: f32, az: f32) -> Self {
        Self { ax, ay, az, gx: 0.0, gy: 0.0, gz: 0.0, temp: 0.0 }
    }
}

// ---------------------------------------------------------------------------
// Morse events — produced by the input task, consumed by the encoder task
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Short symbol, `.` on the wire.
    Dot,
    /// Long symbol, `-` on the wire.
    Dash,
    /// Pause between letters, one space.
    GapLetter,
    /// Pause between words, two spaces.
    GapWord,
    /// Close the message with `"  \n"` and send it.
    EndMessage,
}

impl Event {
    /// `true` for the events that carry a Morse symbol.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Dot | Self::Dash)
    }

    /// Short name used in event log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dot        => "dot",
            Self::Dash       => "dash",
            Self::GapLetter  => "letter-gap",
            Self::GapWord    => "word-gap",
            Self::EndMessage => "end",
        }
    }
}
