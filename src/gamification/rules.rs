//! XP amounts and badge thresholds. Fixed policy, evaluated in order.

pub const XP_PROBLEM_CREATED: i64 = 10;
pub const XP_TOPIC_MASTERED: i64 = 50;
pub const XP_TOPIC_PROGRESS: i64 = 5;
pub const XP_BADGE_BONUS: i64 = 50;

/// XP per level.
pub const XP_PER_LEVEL: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const FIRST_STEP: BadgeRule = BadgeRule {
    name: "First Step",
    icon: "footprints",
    description: "Logged your first problem",
};

pub const PROBLEM_SOLVER: BadgeRule = BadgeRule {
    name: "Problem Solver",
    icon: "puzzle",
    description: "Logged 10 problems",
};

pub const RISING_STAR: BadgeRule = BadgeRule {
    name: "Rising Star",
    icon: "star",
    description: "Reached 500 XP",
};

/// Badges the current aggregate state qualifies for, in award order. The
/// caller filters out badges already held; this stays a pure threshold
/// check so it can be tested without storage.
pub fn qualifying_badges(problem_count: i64, xp: i64) -> Vec<BadgeRule> {
    let mut earned = Vec::new();
    if problem_count >= 1 {
        earned.push(FIRST_STEP);
    }
    if problem_count >= 10 {
        earned.push(PROBLEM_SOLVER);
    }
    if xp >= 500 {
        earned.push(RISING_STAR);
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_activity_earns_nothing() {
        assert!(qualifying_badges(0, 0).is_empty());
    }

    #[test]
    fn first_problem_earns_first_step() {
        let earned = qualifying_badges(1, 10);
        assert_eq!(earned, vec![FIRST_STEP]);
    }

    #[test]
    fn ten_problems_earn_both_problem_badges() {
        let earned = qualifying_badges(10, 100);
        assert_eq!(earned, vec![FIRST_STEP, PROBLEM_SOLVER]);
    }

    #[test]
    fn rising_star_at_500_xp() {
        let earned = qualifying_badges(0, 500);
        assert_eq!(earned, vec![RISING_STAR]);
        assert!(qualifying_badges(0, 499).is_empty());
    }
}
