use sortviz_core::{AlgorithmKind, RunOutcome, StepKind};
use utilities::{multiset, random_sequences, record, record_until};

mod completion {
    use super::*;

    #[tokio::test]
    async fn final_snapshot_is_sorted() {
        for sequence in random_sequences(7, 40) {
            for kind in AlgorithmKind::ALL {
                let run = record(&sequence, kind).await;
                assert_eq!(run.outcome, RunOutcome::Completed);

                let last = run.last();
                assert!(
                    last.sequence().windows(2).all(|w| w[0] <= w[1]),
                    "{kind} left {:?} unsorted",
                    last.sequence()
                );
                assert_eq!(
                    last.sorted().iter().copied().collect::<Vec<_>>(),
                    (0..sequence.len()).collect::<Vec<_>>(),
                    "{kind}"
                );
            }
        }
    }

    #[tokio::test]
    async fn values_are_preserved() {
        for sequence in random_sequences(13, 40) {
            for kind in AlgorithmKind::ALL {
                let run = record(&sequence, kind).await;
                assert_eq!(
                    multiset(run.last().sequence()),
                    multiset(&sequence),
                    "{kind}"
                );
            }
        }
    }

    #[tokio::test]
    async fn length_never_changes() {
        for sequence in random_sequences(17, 20) {
            for kind in AlgorithmKind::ALL {
                let run = record(&sequence, kind).await;
                assert!(run.steps.iter().all(|s| s.sequence().len() == sequence.len()));
            }
        }
    }
}

mod roles {
    use super::*;

    #[tokio::test]
    async fn sorted_only_grows() {
        for sequence in random_sequences(23, 30) {
            for kind in AlgorithmKind::ALL {
                let run = record(&sequence, kind).await;
                for pair in run.steps.windows(2) {
                    assert!(
                        pair[0].sorted().is_subset(pair[1].sorted()),
                        "{kind}: sorted shrank"
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn at_most_one_active_pair() {
        for sequence in random_sequences(29, 20) {
            for kind in AlgorithmKind::ALL {
                let run = record(&sequence, kind).await;
                for step in &run.steps {
                    assert!(step.comparing().is_empty() || step.swapping().is_empty());
                    assert!(step.comparing().len() <= 2 && step.swapping().len() <= 2);
                    assert!(step
                        .active_indices()
                        .iter()
                        .all(|&index| index < sequence.len()));
                }
            }
        }
    }

    #[tokio::test]
    async fn merge_and_quick_mark_sorted_only_at_the_end() {
        for sequence in random_sequences(31, 10) {
            for kind in [AlgorithmKind::Merge, AlgorithmKind::Quick] {
                let run = record(&sequence, kind).await;
                let (last, rest) = run.steps.split_last().unwrap();
                assert!(rest.iter().all(|s| s.sorted().is_empty()), "{kind}");
                assert_eq!(last.kind(), StepKind::Settle);
            }
        }
    }
}

mod cancellation {
    use super::*;

    #[tokio::test]
    async fn immediately_cancelled_run_delivers_nothing() {
        let input = vec![9, 8, 7, 6];
        for kind in AlgorithmKind::ALL {
            let run = record_until(&input, kind, 0).await;
            assert_eq!(run.outcome, RunOutcome::Cancelled);
            assert!(run.steps.is_empty());
            assert_eq!(input, vec![9, 8, 7, 6]);
        }
    }

    #[tokio::test]
    async fn cancelled_mid_run_stops_exactly() {
        let input = (1..=20).rev().collect::<Vec<u32>>();
        for kind in AlgorithmKind::ALL {
            for limit in [1, 5, 17] {
                let run = record_until(&input, kind, limit).await;
                assert_eq!(run.outcome, RunOutcome::Cancelled, "{kind}");
                assert_eq!(run.steps.len(), limit, "{kind}");
            }
        }
    }

    #[tokio::test]
    async fn snapshots_survive_the_driver() {
        let input = vec![3, 1, 2];
        let full = record(&input, AlgorithmKind::Bubble).await;
        let cut = record_until(&input, AlgorithmKind::Bubble, 2).await;

        // a delivered snapshot is not affected by what the driver did afterwards
        assert_eq!(cut.steps[..], full.steps[..2]);
    }
}
