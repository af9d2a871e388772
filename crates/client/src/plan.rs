//! Action plans: the script the driver plays against a session.
//!
//! A plan is a `;`-separated list of steps:
//!
//! ```text
//! general/Training@600; skill/Blade's Intuition=2; team/ops/Sting Operation=4;
//! city/New Tokyo; ops/Sting Operation; idle@60
//! ```
//!
//! - `<type>/<name>[@seconds]` starts an action and lets it run. Without a
//!   duration it runs until the end of the simulation.
//! - `idle[@seconds]` stops the current action.
//! - `skill/<name>[=levels]` buys skill levels (one by default).
//! - `team/<type>/<name>=<size>` assigns a team.
//! - `city/<name>` relocates the operative.
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, bail};

/// One plan step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Run {
        kind: String,
        name: String,
        seconds: Option<u64>,
    },
    Idle {
        seconds: Option<u64>,
    },
    Upgrade {
        skill: String,
        levels: u32,
    },
    Team {
        kind: String,
        name: String,
        size: i64,
    },
    City {
        name: String,
    },
}

impl Step {
    /// Simulated seconds the step occupies; `None` means the rest of the run.
    /// Instant steps take zero.
    pub fn duration(&self) -> Option<u64> {
        match self {
            Self::Run { seconds, .. } | Self::Idle { seconds } => *seconds,
            _ => Some(0),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run { kind, name, seconds } => {
                write!(f, "{kind}/{name}")?;
                seconds.map_or(Ok(()), |s| write!(f, "@{s}"))
            }
            Self::Idle { seconds } => {
                write!(f, "idle")?;
                seconds.map_or(Ok(()), |s| write!(f, "@{s}"))
            }
            Self::Upgrade { skill, levels } => write!(f, "skill/{skill}={levels}"),
            Self::Team { kind, name, size } => write!(f, "team/{kind}/{name}={size}"),
            Self::City { name } => write!(f, "city/{name}"),
        }
    }
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let (head, rest) = match input.split_once('/') {
            Some((head, rest)) => (head.trim(), rest.trim()),
            None => (input, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "skill" => {
                let (skill, levels) = split_value(rest);
                let levels = match levels {
                    Some(levels) => parse_number(levels, input)?,
                    None => 1,
                };
                Ok(Self::Upgrade {
                    skill: non_empty(skill, input)?.to_string(),
                    levels,
                })
            }
            "team" => {
                let (target, size) = split_value(rest);
                let Some(size) = size else {
                    bail!("team step '{input}' needs '=<size>'");
                };
                let Some((kind, name)) = target.split_once('/') else {
                    bail!("team step '{input}' needs '<type>/<name>'");
                };
                Ok(Self::Team {
                    kind: non_empty(kind, input)?.to_string(),
                    name: non_empty(name, input)?.to_string(),
                    size: parse_number(size, input)?,
                })
            }
            "city" => Ok(Self::City {
                name: non_empty(rest, input)?.to_string(),
            }),
            _ if rest.is_empty() => {
                let (word, seconds) = split_duration(input);
                if !word.eq_ignore_ascii_case("idle") {
                    bail!("step '{input}' is not '<type>/<name>'");
                }
                Ok(Self::Idle {
                    seconds: seconds.map(|s| parse_number(s, input)).transpose()?,
                })
            }
            _ => {
                let (name, seconds) = split_duration(rest);
                Ok(Self::Run {
                    kind: non_empty(head, input)?.to_string(),
                    name: non_empty(name, input)?.to_string(),
                    seconds: seconds.map(|s| parse_number(s, input)).transpose()?,
                })
            }
        }
    }
}

/// Ordered steps of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Plan used when none is given.
    pub fn training() -> Self {
        Self::new(vec![Step::Run {
            kind: "general".to_string(),
            name: "Training".to_string(),
            seconds: None,
        }])
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for Plan {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> anyhow::Result<Self> {
        input
            .split(';')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .enumerate()
            .map(|(index, step)| {
                step.parse()
                    .with_context(|| format!("invalid plan step #{}", index + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map(Self::new)
    }
}

fn split_value(input: &str) -> (&str, Option<&str>) {
    match input.rsplit_once('=') {
        Some((target, value)) => (target.trim(), Some(value.trim())),
        None => (input.trim(), None),
    }
}

fn split_duration(input: &str) -> (&str, Option<&str>) {
    match input.rsplit_once('@') {
        Some((name, seconds)) => (name.trim(), Some(seconds.trim())),
        None => (input.trim(), None),
    }
}

fn non_empty<'a>(value: &'a str, step: &str) -> anyhow::Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        bail!("step '{step}' has an empty field");
    }
    Ok(value)
}

fn parse_number<T: FromStr>(value: &str, step: &str) -> anyhow::Result<T> {
    value
        .trim()
        .parse()
        .ok()
        .with_context(|| format!("'{value}' in step '{step}' is not a valid number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let plan: Plan = "general/Training@600; skill/Blade's Intuition=2;\
                          team/ops/Sting Operation=4; city/New Tokyo; ops/Sting Operation; idle@60"
            .parse()
            .unwrap();
        assert_eq!(
            plan.steps(),
            &[
                Step::Run {
                    kind: "general".into(),
                    name: "Training".into(),
                    seconds: Some(600),
                },
                Step::Upgrade {
                    skill: "Blade's Intuition".into(),
                    levels: 2,
                },
                Step::Team {
                    kind: "ops".into(),
                    name: "Sting Operation".into(),
                    size: 4,
                },
                Step::City {
                    name: "New Tokyo".into(),
                },
                Step::Run {
                    kind: "ops".into(),
                    name: "Sting Operation".into(),
                    seconds: None,
                },
                Step::Idle { seconds: Some(60) },
            ]
        );
    }

    #[test]
    fn black_op_names_keep_their_spaces() {
        let step: Step = " black ops / Operation Typhoon @ 30 ".parse().unwrap();
        assert_eq!(
            step,
            Step::Run {
                kind: "black ops".into(),
                name: "Operation Typhoon".into(),
                seconds: Some(30),
            }
        );
        assert_eq!(step.to_string(), "black ops/Operation Typhoon@30");
    }

    #[test]
    fn skill_levels_default_to_one() {
        let step: Step = "skill/Cloak".parse().unwrap();
        assert_eq!(
            step,
            Step::Upgrade {
                skill: "Cloak".into(),
                levels: 1,
            }
        );
        assert_eq!(step.duration(), Some(0));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let plan: Plan = ";; idle ;".parse().unwrap();
        assert_eq!(plan.steps(), &[Step::Idle { seconds: None }]);
        assert!("".parse::<Plan>().unwrap().is_empty());
    }

    #[test]
    fn malformed_steps_name_their_position() {
        let err = "idle; team/ops/Raid".parse::<Plan>().unwrap_err();
        assert!(format!("{err:#}").contains("#2"), "{err:#}");

        assert!("Training".parse::<Step>().is_err());
        assert!("contracts/Tracking@soon".parse::<Step>().is_err());
        assert!("skill/Cloak=-1".parse::<Step>().is_err());
        assert!("city/".parse::<Step>().is_err());
        assert!("team/Raid=2".parse::<Step>().is_err());
    }
}
