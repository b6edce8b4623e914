//! Placement Readiness Score: a weighted composite over a user's activity
//! records. Pure arithmetic; the repo layer gathers the inputs.

use serde::Serialize;

pub const W_ACCURACY: f64 = 0.30;
pub const W_DIFFICULTY: f64 = 0.25;
pub const W_CONSISTENCY: f64 = 0.20;
pub const W_TIME_EFFICIENCY: f64 = 0.15;
pub const W_CORE_COVERAGE: f64 = 0.10;

/// Stand-in until per-problem timing data feeds this sub-score.
pub const TIME_EFFICIENCY_PLACEHOLDER: f64 = 0.8;

/// Consistency target: 2 completed rounds per day over a 30-day window.
pub const ROUNDS_TARGET_30D: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProblemFacts {
    pub difficulty: Difficulty,
    pub solved: bool,
    /// Length of the retry-attempts list, not counting the first try.
    pub attempts: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreInputs {
    pub problems: Vec<ProblemFacts>,
    pub rounds_completed_30d: u32,
    pub mastered_topics: u32,
    pub core_topics: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub accuracy: u8,
    pub difficulty: u8,
    pub consistency: u8,
    pub core_coverage: u8,
    pub time_efficiency: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessScore {
    pub prs: u8,
    pub breakdown: Breakdown,
}

fn pct(x: f64) -> u8 {
    (x * 100.0).round() as u8
}

pub fn compute(inputs: &ScoreInputs) -> ReadinessScore {
    let total = inputs.problems.len();

    let (accuracy, difficulty) = if total == 0 {
        (0.0, 0.0)
    } else {
        let solved = inputs.problems.iter().filter(|p| p.solved).count();
        let attempt_slots: usize = inputs
            .problems
            .iter()
            .map(|p| p.attempts.max(1))
            .sum();
        let accuracy = solved as f64 / attempt_slots as f64;

        // Unsolved problems add nothing to the numerator but still widen
        // the denominator, so unsolved hard problems depress the score.
        let solved_weight: u32 = inputs
            .problems
            .iter()
            .filter(|p| p.solved)
            .map(|p| p.difficulty.weight())
            .sum();
        let difficulty = solved_weight as f64 / (3.0 * total as f64);
        (accuracy, difficulty)
    };

    let consistency =
        (inputs.rounds_completed_30d as f64 / ROUNDS_TARGET_30D as f64).min(1.0);

    // Counts every mastered topic, not only those in the Core Subjects
    // category. Known approximation carried over deliberately.
    let core_coverage = if inputs.core_topics == 0 {
        0.0
    } else {
        (inputs.mastered_topics as f64 / inputs.core_topics as f64).min(1.0)
    };

    let time_efficiency = TIME_EFFICIENCY_PLACEHOLDER;

    let weighted = W_ACCURACY * accuracy
        + W_DIFFICULTY * difficulty
        + W_CONSISTENCY * consistency
        + W_TIME_EFFICIENCY * time_efficiency
        + W_CORE_COVERAGE * core_coverage;

    ReadinessScore {
        prs: (weighted * 100.0).round() as u8,
        breakdown: Breakdown {
            accuracy: pct(accuracy),
            difficulty: pct(difficulty),
            consistency: pct(consistency),
            core_coverage: pct(core_coverage),
            time_efficiency: pct(time_efficiency),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(difficulty: Difficulty, solved: bool, attempts: usize) -> ProblemFacts {
        ProblemFacts {
            difficulty,
            solved,
            attempts,
        }
    }

    #[test]
    fn no_problems_means_zero_accuracy_and_difficulty() {
        let score = compute(&ScoreInputs::default());
        assert_eq!(score.breakdown.accuracy, 0);
        assert_eq!(score.breakdown.difficulty, 0);
        // Only the placeholder contributes: 0.15 * 0.8
        assert_eq!(score.prs, 12);
    }

    #[test]
    fn mixed_difficulty_example() {
        // Easy/Solved, Medium/Solved, Hard/Pending, no extra attempts
        let inputs = ScoreInputs {
            problems: vec![
                problem(Difficulty::Easy, true, 0),
                problem(Difficulty::Medium, true, 0),
                problem(Difficulty::Hard, false, 0),
            ],
            ..Default::default()
        };
        let score = compute(&inputs);
        // accuracy = 2/3, difficulty = (1+2+0)/(3*3) = 1/3
        assert_eq!(score.breakdown.accuracy, 67);
        assert_eq!(score.breakdown.difficulty, 33);
    }

    #[test]
    fn extra_attempts_widen_the_accuracy_denominator() {
        let inputs = ScoreInputs {
            problems: vec![
                problem(Difficulty::Easy, true, 3),
                problem(Difficulty::Easy, true, 0),
            ],
            ..Default::default()
        };
        // 2 solved over max(1,3) + max(1,0) = 4 slots
        assert_eq!(compute(&inputs).breakdown.accuracy, 50);
    }

    #[test]
    fn consistency_caps_at_100() {
        let at_target = compute(&ScoreInputs {
            rounds_completed_30d: 60,
            ..Default::default()
        });
        assert_eq!(at_target.breakdown.consistency, 100);

        let over_target = compute(&ScoreInputs {
            rounds_completed_30d: 240,
            ..Default::default()
        });
        assert_eq!(over_target.breakdown.consistency, 100);

        let half = compute(&ScoreInputs {
            rounds_completed_30d: 30,
            ..Default::default()
        });
        assert_eq!(half.breakdown.consistency, 50);
    }

    #[test]
    fn core_coverage_guards_and_caps() {
        let none = compute(&ScoreInputs {
            mastered_topics: 5,
            core_topics: 0,
            ..Default::default()
        });
        assert_eq!(none.breakdown.core_coverage, 0);

        let over = compute(&ScoreInputs {
            mastered_topics: 12,
            core_topics: 8,
            ..Default::default()
        });
        assert_eq!(over.breakdown.core_coverage, 100);
    }

    #[test]
    fn breakdown_reweights_back_to_prs_within_rounding() {
        let inputs = ScoreInputs {
            problems: vec![
                problem(Difficulty::Easy, true, 0),
                problem(Difficulty::Medium, true, 1),
                problem(Difficulty::Hard, false, 2),
                problem(Difficulty::Hard, true, 0),
            ],
            rounds_completed_30d: 23,
            mastered_topics: 3,
            core_topics: 7,
        };
        let score = compute(&inputs);
        let b = &score.breakdown;
        let reweighted = W_ACCURACY * b.accuracy as f64
            + W_DIFFICULTY * b.difficulty as f64
            + W_CONSISTENCY * b.consistency as f64
            + W_TIME_EFFICIENCY * b.time_efficiency as f64
            + W_CORE_COVERAGE * b.core_coverage as f64;
        assert!((reweighted - score.prs as f64).abs() <= 1.0);
    }

    #[test]
    fn ten_easy_solved_problems() {
        let inputs = ScoreInputs {
            problems: (0..10)
                .map(|_| problem(Difficulty::Easy, true, 0))
                .collect(),
            ..Default::default()
        };
        let score = compute(&inputs);
        assert_eq!(score.breakdown.accuracy, 100);
        // 10 / 30
        assert_eq!(score.breakdown.difficulty, 33);
    }

    #[test]
    fn prs_stays_in_range() {
        let maxed = ScoreInputs {
            problems: (0..50)
                .map(|_| problem(Difficulty::Hard, true, 0))
                .collect(),
            rounds_completed_30d: 600,
            mastered_topics: 50,
            core_topics: 10,
        };
        let score = compute(&maxed);
        assert!(score.prs <= 100);
    }
}
