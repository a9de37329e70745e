//! Plain-text rendering of run progress and the two bar charts.

use dashboard_core::{CategorySeries, DashboardViewModel, GroupedSeries, RunPhase};

const BAR_WIDTH: usize = 40;

/// Draw the current view. Called whenever the state marks itself dirty.
pub fn draw(view: &DashboardViewModel) {
    match view.phase {
        RunPhase::Queued => println!("Queuing… {}%", view.progress_percent),
        RunPhase::Running => println!("Running… {}%", view.progress_percent),
        RunPhase::Idle => {}
        RunPhase::Succeeded | RunPhase::Failed => {}
    }

    if let Some(error) = &view.error {
        println!("Error: {error}");
        return;
    }

    if view.phase == RunPhase::Succeeded {
        if let Some(chart) = &view.chart1 {
            draw_chart1(chart);
        }
        if let Some(chart) = &view.chart2 {
            draw_chart2(chart);
        }
    }
}

fn draw_chart1(chart: &CategorySeries) {
    println!("\nObject Instances (All Data)");
    let label_width = column_width(&chart.categories);
    let peak = chart.values.iter().copied().max().unwrap_or(0).max(1);
    for (label, value) in chart.categories.iter().zip(&chart.values) {
        let bar = "#".repeat((value * BAR_WIDTH as u64 / peak) as usize);
        println!("  {label:<label_width$}  {value:>8}  {bar}");
    }
}

fn draw_chart2(chart: &GroupedSeries) {
    println!("\nObjects per Label (by Split)");
    let label_width = column_width(&chart.categories);
    for (index, label) in chart.categories.iter().enumerate() {
        let cells: Vec<String> = chart
            .traces
            .iter()
            .map(|trace| {
                format!(
                    "{}: {} ({})",
                    trace.name, trace.values[index], trace.percent_labels[index]
                )
            })
            .collect();
        println!("  {label:<label_width$}  {}", cells.join("  "));
    }
}

fn column_width(labels: &[String]) -> usize {
    labels.iter().map(String::len).max().unwrap_or(0)
}
