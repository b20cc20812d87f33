use std::future::Future;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use sortviz_core::{Command, Controller, RoleSet, RunEvent, RunOutcome};
use tracing::info;

use crate::{paint, RunArgs};

pub(crate) async fn run(args: RunArgs) -> anyhow::Result<()> {
    let dataset = args.dataset.config()?;
    let mut controller = Controller::new(dataset, args.dataset.rng())
        .with_algorithm(args.playback.algorithm)
        .with_speed(args.playback.speed());

    let algorithm = controller.algorithm();
    println!(
        "{} {} at speed {}",
        "Running".bold().underline().blue(),
        algorithm.name().bold(),
        controller.speed()
    );
    println!(
        "{} {}",
        "Input  ->".bold(),
        paint(controller.model().sequence(), controller.model().roles())
    );

    let pb = ProgressBar::new(controller.model().sequence().len() as u64);
    pb.set_style(ProgressStyle::with_template(
        "{prefix} -> {spinner:.green} [{elapsed_precise}] [{bar:50.cyan/blue}] Sorted: ({pos}/{len}) {msg}",
    )?);
    pb.set_prefix(algorithm.name());
    pb.enable_steady_tick(Duration::from_millis(100));

    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    let outcome = follow(&mut controller, interrupt, |roles| {
        pb.set_position(roles.sorted.len() as u64);
        if let Some(step) = step_message(roles) {
            pb.set_message(step);
        }
    })
    .await;

    match outcome {
        RunOutcome::Completed => pb.finish_with_message("done".green().to_string()),
        RunOutcome::Cancelled => pb.abandon_with_message("stopped".red().to_string()),
    }

    println!(
        "{} {}",
        "Output ->".bold(),
        paint(controller.model().sequence(), controller.model().roles())
    );

    controller.shutdown().await;
    Ok(())
}

/// Starts a run and applies its events until it finishes or `interrupt` resolves, calling
/// `on_update` with the role sets after every applied step.
async fn follow<R, I, U>(
    controller: &mut Controller<R>,
    interrupt: I,
    mut on_update: U,
) -> RunOutcome
where
    R: Rng,
    I: Future<Output = ()>,
    U: FnMut(&RoleSet),
{
    controller.handle(Command::Toggle).await;
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            event = controller.recv() => {
                let Some(event) = event else {
                    return RunOutcome::Cancelled;
                };

                let finished = match &event {
                    RunEvent::Finished { outcome, .. } => Some(*outcome),
                    RunEvent::Step { .. } => None,
                };

                if controller.on_event(event) {
                    on_update(controller.model().roles());
                }

                if let Some(outcome) = finished {
                    return outcome;
                }
            }
            _ = &mut interrupt => {
                info!("interrupted, stopping the run");
                controller.stop().await;
                on_update(controller.model().roles());
                return RunOutcome::Cancelled;
            }
        }
    }
}

fn step_message(roles: &RoleSet) -> Option<String> {
    if let [a, b] = roles.swapping[..] {
        Some(format!("swap {a} {b}"))
    } else if let [a, b] = roles.comparing[..] {
        Some(format!("compare {a} {b}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use sortviz_core::{AlgorithmKind, DatasetConfig, Speed};

    fn controller(kind: AlgorithmKind, speed: u8) -> Controller<StdRng> {
        let dataset = DatasetConfig::new(6, 10, 99).unwrap();
        Controller::new(dataset, StdRng::seed_from_u64(3))
            .with_algorithm(kind)
            .with_speed(Speed::new(speed))
    }

    #[tokio::test(start_paused = true)]
    async fn follows_a_run_to_the_end() {
        let mut controller = controller(AlgorithmKind::Merge, 100);
        let mut positions = Vec::new();

        let outcome = follow(&mut controller, std::future::pending(), |roles| {
            positions.push(roles.sorted.len())
        })
        .await;

        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(positions.last(), Some(&6));
        assert!(!controller.is_playing());
        assert!(controller.model().sequence().windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_keeps_the_last_delivered_step() {
        let mut controller = controller(AlgorithmKind::Bubble, 1);
        controller.load(vec![2, 1, 3]);

        // compare at 0 ms, swap at 100 ms, interrupted while waiting for the next one
        let interrupt = tokio::time::sleep(Duration::from_millis(150));
        let mut last = None;
        let outcome = follow(&mut controller, interrupt, |roles| last = Some(roles.clone())).await;

        assert_eq!(outcome, RunOutcome::Cancelled);
        assert!(!controller.is_playing());
        assert_eq!(controller.model().sequence(), &[1, 2, 3]);
        assert_eq!(last.map(|roles| roles.swapping), Some(vec![0, 1]));
    }

    #[test]
    fn messages_name_the_active_pair() {
        let mut roles = RoleSet {
            comparing: vec![2, 3],
            ..RoleSet::default()
        };
        assert_eq!(step_message(&roles).as_deref(), Some("compare 2 3"));

        roles.comparing.clear();
        roles.swapping = vec![0, 4];
        assert_eq!(step_message(&roles).as_deref(), Some("swap 0 4"));

        roles.swapping.clear();
        assert_eq!(step_message(&roles), None);
    }
}
