#![forbid(unsafe_code)]

//! The facade and prelude are enough to embed and drive a preview.

use sizes::prelude::*;
use sizes::{HeadlessHost, RecordingScreen, SimulationState, SizingMode};

fn run() -> Result<PreviewContainer<HeadlessHost, RecordingScreen>> {
    let config = SimulatorConfig::from_json_str(r#"{"reveal":{"delay_ms":0}}"#)?;
    let mut container = PreviewContainer::new(HeadlessHost::new(Size::new(1024, 768)), config)?;
    container.attach(RecordingScreen::default())?;
    container.handle_selection(SelectionEvent::new(
        Device::Phone5_8Inch,
        Orientation::Portrait,
        ContentSizeCategory::AccessibilityMedium,
    ))?;
    Ok(container)
}

#[test]
fn prelude_drives_a_preview() {
    let container = run().unwrap();
    let snapshot = container.snapshot();
    assert_eq!(snapshot.mode, Some(SizingMode::Fixed(Size::new(375, 812))));
    assert!(matches!(snapshot.state, SimulationState::Simulated { .. }));

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"accessibility-medium\""));
}

#[test]
fn config_errors_convert() {
    let err: sizes::Error = SimulatorConfig::from_toml_str("[reveal]\ndamping_ratio = 2.0\n")
        .unwrap_err()
        .into();
    assert!(matches!(err, sizes::Error::Config(_)));
    assert!(err.to_string().contains("reveal.damping_ratio"));
}

#[test]
fn missing_config_file_surfaces_io_error() {
    let result = sizes::container_from_toml_file::<HeadlessHost, RecordingScreen>(
        HeadlessHost::new(Size::new(1, 1)),
        "/nonexistent/sizes.toml",
    );
    assert!(matches!(result, Err(sizes::Error::Config(sizes::ConfigError::Io(_)))));
}

#[test]
fn layout_errors_convert() {
    let err = sizes::Error::from(sizes::LayoutError::Detached);
    assert!(matches!(err, sizes::Error::Simulation(_)));
}

#[test]
fn attach_errors_convert() {
    let config = SimulatorConfig::from_toml_str("[initial]\ndevice = \"pad\"\n").unwrap();
    let mut container =
        PreviewContainer::<HeadlessHost, RecordingScreen>::new(HeadlessHost::new(Size::new(1024, 768)), config)
            .unwrap();
    container.attach(RecordingScreen::default()).unwrap();
    container
        .controller_mut()
        .host_mut()
        .pin_external(sizes::SizingConstraint::Fixed {
            dimension: sizes::Dimension::Height,
            points: 10,
        });

    let attached: Result<_> = container.attach(RecordingScreen::default()).map_err(Error::from);
    assert!(matches!(attached, Err(sizes::Error::Simulation(_))));
}
