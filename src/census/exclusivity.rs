//! Turning inclusive counts into exclusive ones.
//!
//! A hand counts exclusively toward a category when it makes the category
//! and no category that dominates it. With `D` the dominators of `X`,
//!
//! `exclusive(X) = sum over T subset of D of (-1)^|T| joint(X and every T)`
//!
//! which is exact whatever the overlaps between the dominators are.

use num_bigint::BigInt;
use num_traits::Zero;
use tracing::trace_span;

use crate::combinatorics::into_count;
use crate::core::{CONTAINMENT, Count, HandCategory};

/// Something that can count hands making several categories at once.
pub trait JointCounter {
    /// Hands making `category`, whatever else they make.
    fn count_inclusive(&self, category: HandCategory) -> Count;

    /// Hands making every one of `categories`. The slice holds at least two
    /// categories and none of them dominates another.
    fn count_joint(&self, categories: &[HandCategory]) -> Count;
}

/// Drop every category some other member already implies.
///
/// ```
/// use deck_census::census::reduce_conjunction;
/// use deck_census::core::HandCategory;
///
/// assert_eq!(
///     vec![HandCategory::FullHouse],
///     reduce_conjunction(&[HandCategory::Pair, HandCategory::FullHouse, HandCategory::TwoPair])
/// );
/// ```
pub fn reduce_conjunction(categories: &[HandCategory]) -> Vec<HandCategory> {
    let mut reduced: Vec<HandCategory> = categories
        .iter()
        .copied()
        .filter(|worse| {
            !categories
                .iter()
                .any(|better| CONTAINMENT.dominates(*better, *worse))
        })
        .collect();
    reduced.sort();
    reduced.dedup();
    reduced
}

/// Hands making every one of `categories`.
///
/// # Panics
///
/// If `categories` is empty.
pub fn count_conjunction<J>(counter: &J, categories: &[HandCategory]) -> Count
where
    J: JointCounter + ?Sized,
{
    let reduced = reduce_conjunction(categories);
    match reduced.as_slice() {
        [] => panic!("empty conjunction"),
        [single] => counter.count_inclusive(*single),
        many => counter.count_joint(many),
    }
}

/// Hands making `category` and nothing that dominates it.
///
/// # Panics
///
/// If the signed sum comes out negative, which means one of the counts
/// feeding it is wrong.
pub fn resolve_exclusive<J>(counter: &J, category: HandCategory) -> Count
where
    J: JointCounter + ?Sized,
{
    let dominators = CONTAINMENT.dominators(category);
    if dominators.is_empty() {
        return counter.count_inclusive(category);
    }

    let _span =
        trace_span!("resolve_exclusive", %category, dominators = dominators.len()).entered();
    let mut total = BigInt::zero();
    let mut members = Vec::with_capacity(dominators.len() + 1);
    for subset in 0_u32..(1 << dominators.len()) {
        members.clear();
        members.push(category);
        members.extend(
            dominators
                .iter()
                .enumerate()
                .filter(|(i, _)| subset & (1 << i) != 0)
                .map(|(_, d)| *d),
        );

        let term = BigInt::from(count_conjunction(counter, &members));
        if subset.count_ones() % 2 == 0 {
            total += term;
        } else {
            total -= term;
        }
    }
    into_count(total, format_args!("exclusive {}", category))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::CATEGORIES;

    /// Counts hands drawn from a fixed list of category sets.
    struct FakeHands {
        hands: Vec<Vec<HandCategory>>,
        joint_calls: RefCell<Vec<Vec<HandCategory>>>,
    }

    impl FakeHands {
        fn new(hands: Vec<Vec<HandCategory>>) -> Self {
            Self {
                hands,
                joint_calls: RefCell::new(vec![]),
            }
        }

        fn matching(&self, categories: &[HandCategory]) -> Count {
            Count::from(
                self.hands
                    .iter()
                    .filter(|hand| categories.iter().all(|c| hand.contains(c)))
                    .count(),
            )
        }
    }

    impl JointCounter for FakeHands {
        fn count_inclusive(&self, category: HandCategory) -> Count {
            self.matching(&[category])
        }

        fn count_joint(&self, categories: &[HandCategory]) -> Count {
            self.joint_calls.borrow_mut().push(categories.to_vec());
            self.matching(categories)
        }
    }

    /// Every category a hand makes once its best ones are known.
    fn closed(best: &[HandCategory]) -> Vec<HandCategory> {
        CATEGORIES
            .iter()
            .copied()
            .filter(|c| best.iter().any(|b| b == c || CONTAINMENT.dominates(*b, *c)))
            .collect()
    }

    #[test]
    fn test_reduce() {
        assert_eq!(
            vec![HandCategory::FourOfKind, HandCategory::FullHouse],
            reduce_conjunction(&[
                HandCategory::FullHouse,
                HandCategory::ThreeOfKind,
                HandCategory::FourOfKind
            ])
        );
        assert_eq!(
            vec![HandCategory::Straight, HandCategory::Flush],
            reduce_conjunction(&[HandCategory::Flush, HandCategory::Straight])
        );
        assert_eq!(
            vec![HandCategory::Pair],
            reduce_conjunction(&[HandCategory::Pair, HandCategory::Pair])
        );
    }

    #[test_log::test]
    fn test_exclusive_counts_best_only() {
        use HandCategory::*;
        let hands = FakeHands::new(vec![
            closed(&[Pair]),
            closed(&[Pair]),
            closed(&[TwoPair]),
            closed(&[ThreeOfKind]),
            closed(&[FullHouse]),
            closed(&[FourOfKind, FullHouse]),
            closed(&[FourOfKind]),
            closed(&[FiveOfKind]),
            closed(&[StraightFlush]),
            closed(&[Straight, Pair]),
            closed(&[Flush]),
            vec![],
        ]);

        let exclusive = |category| resolve_exclusive(&hands, category);
        // Only hands whose best shape is exactly a pair, including the
        // straight that also holds one.
        assert_eq!(Count::from(3_u32), exclusive(Pair));
        assert_eq!(Count::from(1_u32), exclusive(TwoPair));
        assert_eq!(Count::from(1_u32), exclusive(ThreeOfKind));
        // Full house is a leaf, the quads-and-boat hand stays in.
        assert_eq!(Count::from(2_u32), exclusive(FullHouse));
        assert_eq!(Count::from(2_u32), exclusive(FourOfKind));
        assert_eq!(Count::from(1_u32), exclusive(FiveOfKind));
        assert_eq!(Count::from(1_u32), exclusive(Straight));
        assert_eq!(Count::from(1_u32), exclusive(Flush));
        assert_eq!(Count::from(1_u32), exclusive(StraightFlush));
    }

    #[test]
    fn test_joint_only_sees_reduced_sets() {
        let hands = FakeHands::new(vec![closed(&[HandCategory::FullHouse])]);
        resolve_exclusive(&hands, HandCategory::Pair);
        for call in hands.joint_calls.borrow().iter() {
            assert!(call.len() >= 2, "{call:?}");
            assert_eq!(&reduce_conjunction(call), call);
        }
    }

    #[test]
    fn test_leaf_is_inclusive() {
        let hands = FakeHands::new(vec![closed(&[HandCategory::FiveOfKind])]);
        assert_eq!(
            Count::from(1_u32),
            resolve_exclusive(&hands, HandCategory::FiveOfKind)
        );
        assert!(hands.joint_calls.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "negative count")]
    fn test_inconsistent_counts_panic() {
        // A dominator that shows up without the category it implies.
        let hands = FakeHands::new(vec![vec![HandCategory::FiveOfKind]]);
        resolve_exclusive(&hands, HandCategory::FourOfKind);
    }
}
