use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Sports the platform can organise matches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Football5,
    Football7,
    Football11,
    Basketball,
    Volleyball,
    Tennis,
    Padel,
}

impl Sport {
    pub const ALL: [Sport; 7] = [
        Sport::Football5,
        Sport::Football7,
        Sport::Football11,
        Sport::Basketball,
        Sport::Volleyball,
        Sport::Tennis,
        Sport::Padel,
    ];
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sport::Football5 => write!(f, "football5"),
            Sport::Football7 => write!(f, "football7"),
            Sport::Football11 => write!(f, "football11"),
            Sport::Basketball => write!(f, "basketball"),
            Sport::Volleyball => write!(f, "volleyball"),
            Sport::Tennis => write!(f, "tennis"),
            Sport::Padel => write!(f, "padel"),
        }
    }
}

impl std::str::FromStr for Sport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "football5" => Ok(Sport::Football5),
            "football7" => Ok(Sport::Football7),
            "football11" => Ok(Sport::Football11),
            "basketball" => Ok(Sport::Basketball),
            "volleyball" => Ok(Sport::Volleyball),
            "tennis" => Ok(Sport::Tennis),
            "padel" => Ok(Sport::Padel),
            _ => Err(anyhow::anyhow!("Invalid sport: {}", s)),
        }
    }
}
