//! Type composition of a requested batch.

use qw_core::QuestionType;

/// How many items of each generated type a batch of a given size aims for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotaPlan {
    pub application: usize,
    pub critical_thinking: usize,
}

impl QuotaPlan {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.application + self.critical_thinking
    }

    /// Take one slot of type `ty`, returning whether one was still open.
    pub const fn take(&mut self, ty: QuestionType) -> bool {
        let slot = match ty {
            QuestionType::Application => &mut self.application,
            QuestionType::CriticalThinking => &mut self.critical_thinking,
            QuestionType::Recall => return false,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

/// Composition for a batch of `n` questions.
///
/// ```text
/// n >= 7     → 2 critical thinking
/// otherwise  → max(1 if n >= 3 else 0, round(n × 0.3)) critical thinking
/// ```
///
/// The rest are application questions; recall is never planned.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn plan_for(n: usize) -> QuotaPlan {
    let critical_thinking = if n >= 7 {
        2
    } else {
        let floor = usize::from(n >= 3);
        let scaled = (n as f64 * 0.3).round() as usize;
        floor.max(scaled)
    };
    QuotaPlan {
        application: n - critical_thinking,
        critical_thinking,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 1, 0)]
    #[case(2, 1, 1)]
    #[case(3, 2, 1)]
    #[case(4, 3, 1)]
    #[case(5, 3, 2)]
    #[case(6, 4, 2)]
    #[case(7, 5, 2)]
    #[case(8, 6, 2)]
    #[case(20, 18, 2)]
    fn plan_matches_formula(
        #[case] n: usize,
        #[case] application: usize,
        #[case] critical_thinking: usize,
    ) {
        assert_eq!(
            plan_for(n),
            QuotaPlan {
                application,
                critical_thinking
            }
        );
    }

    #[test]
    fn take_stops_at_zero() {
        let mut plan = plan_for(3);
        assert!(plan.take(QuestionType::CriticalThinking));
        assert!(!plan.take(QuestionType::CriticalThinking));
        assert!(!plan.take(QuestionType::Recall));
        assert!(plan.take(QuestionType::Application));
        assert_eq!(plan.total(), 1);
    }
}
