use skyfade_core::{
    Summary, TileId, TileSource, ViewState,
    heuristic::arrow_rotation,
    present::{CloudSummary, sun_position_label},
};

const BAR_WIDTH: usize = 20;

/// Print the outcome of a lookup to stdout (failures to stderr).
pub fn print_state(
    state: &ViewState,
    tiles: &TileSource,
    zoom: u8,
    json: bool,
) -> anyhow::Result<()> {
    match state {
        ViewState::Idle => {}
        ViewState::Loading { coordinate, .. } => {
            println!("Fetching sunset data for {coordinate}...");
        }
        ViewState::Loaded(report) => {
            let summary = Summary::from_report(report);
            let tile = TileId::containing(&report.coordinate, zoom);
            let tile_url = tiles.tile_url(tile);

            if json {
                let doc = serde_json::json!({
                    "summary": summary,
                    "map_tile": tile_url,
                    "attribution": tiles.attribution,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", summary_text(&summary));
                println!();
                println!("Map tile: {tile_url}");
                println!("{}", tiles.attribution);
            }
        }
        ViewState::Failed {
            coordinate,
            message,
        } => {
            if json {
                let doc = serde_json::json!({
                    "location": coordinate.to_string(),
                    "error": message,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                eprintln!("{message}");
            }
        }
    }

    Ok(())
}

pub fn summary_text(summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("Sunset Information\n");
    out.push_str(&format!("  Location      {}\n", summary.location));
    out.push_str(&format!("  Sunset Time   {}\n", summary.sunset));
    out.push_str(&format!("  Sunrise Time  {}\n", summary.sunrise));
    out.push_str(&format!("  Day Length    {}\n", summary.day_length));
    out.push_str(&format!(
        "  Sun Position  {}  {}\n",
        summary.sun_position,
        arrow_glyph(summary.arrow_rotation)
    ));

    if let Some(cloud) = &summary.cloud {
        out.push('\n');
        out.push_str(&cloud_text(cloud));
    }

    out
}

fn cloud_text(cloud: &CloudSummary) -> String {
    let filled = (usize::from(cloud.coverage_pct) * BAR_WIDTH + 50) / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

    let mut out = String::from("Weather Forecast at Sunset\n");
    out.push_str(&format!(
        "  Cloud Coverage          {:>3}% [{bar}]\n",
        cloud.coverage_pct
    ));
    out.push_str(&format!("  Visibility Probability  {:>3}%\n", cloud.visibility_pct));
    out.push_str(&format!("  {}\n", cloud.message));
    out
}

pub fn direction_text(azimuth: f64) -> String {
    format!(
        "Sunset direction: {}  {}",
        sun_position_label(azimuth),
        arrow_glyph(arrow_rotation(azimuth))
    )
}

/// Eight-way arrow for a rotation in degrees, 0 pointing up (north).
fn arrow_glyph(rotation: f64) -> char {
    const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
    let sector = (rotation.rem_euclid(360.0) / 45.0).round() as usize % ARROWS.len();
    ARROWS[sector]
}
