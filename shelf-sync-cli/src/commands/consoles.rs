use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_sync_core::Mapping;
use shelf_sync_core::console_map;

/// Width of the label column, from the longest PriceCharting label.
fn label_width() -> usize {
    console_map::table()
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0)
}

pub(crate) fn run_consoles(unmapped_only: bool) {
    let width = label_width();

    log::info!(
        "{}",
        "PriceCharting console -> Backloggery console (region)"
            .if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    let mut shown = 0usize;
    for (label, mapping) in console_map::table() {
        match mapping {
            Mapping::To { console, region } => {
                if unmapped_only {
                    continue;
                }
                log::info!(
                    "  {:<width$}  {} {}",
                    label,
                    console.if_supports_color(Stdout, |t| t.cyan()),
                    format!("({})", region).if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            Mapping::Unmapped => {
                log::info!(
                    "  {:<width$}  {}",
                    label,
                    "not on Backloggery, skipped".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
        shown += 1;
    }

    log::info!("");
    if unmapped_only {
        log::info!("{} unmapped labels", shown);
    } else {
        log::info!(
            "{} labels, {} Backloggery consoles",
            shown,
            console_map::destination_consoles().len(),
        );
    }
}
