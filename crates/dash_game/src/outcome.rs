/// Result of the single round the process plays.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    #[default]
    Playing,
    /// The player touched an obstacle.
    Lost,
    /// The finish line reached the player without a collision.
    Won,
}

impl Outcome {
    /// Apply this tick's facts. Only `Playing` can change; a collision takes
    /// precedence over reaching the finish line on the same tick.
    pub fn resolve(self, collided: bool, player_x: f32, finish_line: f32) -> Self {
        match self {
            Self::Playing if collided => Self::Lost,
            Self::Playing if player_x >= finish_line => Self::Won,
            other => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Lost => "Lost",
            Self::Won => "Won",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
