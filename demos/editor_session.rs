//! Headless editing session.
//!
//! Opens the example pattern, makes the edits a user would make in the
//! editor, plays the result on a simulated device and prints the exports.
//!
//! Run with `RUST_LOG=debug` to see the library's tracing output.

use anyhow::Result;
use haptic_playground::export::to_json;
use haptic_playground::{
    Config, EventKind, Exporter, HapticPattern, ParameterId, Renderer, Session, SimulatedDevice,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut pattern = HapticPattern::example();

    // A new tap near the end, nudged by slider input.
    let index = pattern.add_event();
    let tap = pattern.events()[index].id();
    if let Some(event) = pattern.event_mut(tap) {
        event.set_relative_time(config.editor.clamp_time(0.7));
        event.set_intensity(config.editor.clamp_unit(0.9));
    }

    // Turn the first event into a tap, then back: it gets the default duration.
    let first = pattern.events()[0].id();
    if let Some(event) = pattern.event_mut(first) {
        event.set_kind(EventKind::Transient);
        event.set_kind(EventKind::Continuous);
    }

    // A release-time curve with an extra point dragged into place.
    let curve_index = pattern.add_curve();
    let curve_id = pattern.curves()[curve_index].id();
    if let Some(curve) = pattern.curve_mut(curve_id) {
        curve.set_parameter(ParameterId::ReleaseTime);
        let point = curve.insert_control_point();
        curve.set_control_point(point, 0.5, 0.3)?;
    }

    let mut session =
        Session::new(SimulatedDevice::new()).with_renderer(Renderer::with_options(config.render));
    session.play(&pattern)?;

    for timeline in session.device().started_timelines() {
        println!(
            "played {} events and {} curves over {:.2}s",
            timeline.event_count(),
            timeline.curve_command_count(),
            timeline.duration()
        );
    }

    println!("{}", Exporter::with_options(config.export).export(&pattern));
    println!("{}", to_json(&pattern)?);
    Ok(())
}
