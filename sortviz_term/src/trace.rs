use std::time::Duration;

use colored::{Color, Colorize};
use prettytable::{row, Table};
use sortviz_core::model::generate_sequence;
use sortviz_core::{driver, BarColor, RoleSet, StepKind, VisualizationStep};

use crate::TraceArgs;

/// Renders `values` as a line of numbers colored by their role.
pub fn paint(values: &[u32], roles: &RoleSet) -> String {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .to_string()
                .color(terminal_color(roles.color_of(index)))
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn terminal_color(color: BarColor) -> Color {
    match color {
        BarColor::Green => Color::Green,
        BarColor::Red => Color::Red,
        BarColor::Yellow => Color::Yellow,
        BarColor::Blue => Color::Blue,
    }
}

/// One row per step: its number, kind, active pair, sorted indices and the painted sequence.
pub fn step_table(steps: &[VisualizationStep]) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "#".bold(),
        "Kind".bold(),
        "Indices".bold(),
        "Sorted".bold(),
        "Sequence".bold()
    ]);

    for (number, step) in steps.iter().enumerate() {
        table.add_row(row![
            number + 1,
            step.kind(),
            format!("{:?}", step.active_indices()),
            format!("{}/{}", step.sorted().len(), step.sequence().len()),
            paint(step.sequence(), step.roles())
        ]);
    }

    table
}

pub(crate) async fn trace(args: TraceArgs) -> anyhow::Result<()> {
    let sequence = match args.values {
        Some(values) => values,
        None => {
            let config = args.dataset.config()?;
            generate_sequence(&config, &mut args.dataset.rng())
        }
    };

    let mut steps = Vec::new();
    driver::run(
        &sequence,
        args.algorithm,
        Duration::ZERO,
        |step| steps.push(step),
        || false,
    )
    .await;

    println!(
        "{} {}",
        "Tracing -> ".bold().underline().blue(),
        args.algorithm.name().bold()
    );

    step_table(&steps).printstd();

    let count = |kind: StepKind| steps.iter().filter(|s| s.kind() == kind).count();
    println!(
        "{} steps, {} comparisons, {} swaps",
        steps.len().to_string().bold(),
        count(StepKind::Compare).to_string().bold(),
        count(StepKind::Swap).to_string().bold()
    );

    Ok(())
}
