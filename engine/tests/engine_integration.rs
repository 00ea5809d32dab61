use claims::*;
use engine::{
    DEFAULT_THEME_NAME, EngineError, EngineEvent, EngineStatus, FieldType, HostEvent, Options,
    Theme, ThemeEngine, ThemeObject, ThemePath,
};
use serde_json::{Value, json};
use std::sync::{Arc, mpsc};
use std::time::Duration;
use tokio::time::sleep;

// Helper module for engine integration testing
mod engine_helpers {
    use super::*;

    pub fn theme(value: Value) -> Theme {
        match value {
            Value::Object(map) => map,
            other => panic!("test theme must be an object, got {other}"),
        }
    }

    pub fn options(value: Value) -> Options {
        serde_json::from_value(value).expect("valid options payload")
    }

    pub fn light_and_dark() -> Options {
        options(json!({
            "theme": [
                {"name": "light", "theme": {"colors": {"primary": "#ff4785", "background": "#ffffff"}, "radius": 4}},
                {"name": "dark", "theme": {"colors": {"primary": "#1ea7fd", "background": "#222222"}, "radius": 4}}
            ]
        }))
    }

    pub fn engine() -> (ThemeEngine, mpsc::Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel();
        let engine = ThemeEngine::new(Arc::new(tx)).expect("test runs inside a runtime");
        (engine, rx)
    }

    /// Engine that has ingested `options`, with the first emission drained
    pub fn ready_engine(options: Options) -> (ThemeEngine, mpsc::Receiver<EngineEvent>) {
        let (mut engine, rx) = engine();
        engine.ingest(options).expect("valid payload");
        assert_eq!(drain(&rx).len(), 1);
        (engine, rx)
    }

    pub fn drain(rx: &mpsc::Receiver<EngineEvent>) -> Vec<Theme> {
        rx.try_iter()
            .map(|event| match event {
                EngineEvent::UpdateTheme(theme) => theme,
            })
            .collect()
    }

    pub fn primary(theme: &Theme) -> Option<&Value> {
        engine::path::get_at_path(theme, &ThemePath::parse("colors.primary"))
    }
}

use engine_helpers::*;

mod ingestion {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_multiple_themes_activate_first() {
        let (mut engine, rx) = engine();

        let report = assert_ok!(engine.ingest(light_and_dark()));

        assert_eq!(report.theme_count, 2);
        assert_eq!(report.active, "light");
        assert!(report.warnings.is_empty());
        assert_eq!(engine.status(), EngineStatus::Ready);
        assert_eq!(engine.themes().len(), 2);
        assert_eq!(engine.component_registries().len(), 2);

        // First ingestion is emitted right away even with debounce on
        assert!(engine.config().debounce());
        let emitted = drain(&rx);
        assert_eq!(emitted.len(), 1);
        assert_eq!(primary(&emitted[0]), Some(&json!("#ff4785")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_theme_uses_default_name() {
        let (mut engine, _rx) = engine();

        assert_ok!(engine.ingest(options(json!({"theme": {"bg": "#000", "bold": true}}))));

        assert!(engine.themes().is_empty());
        assert_eq!(engine.active_theme().name, DEFAULT_THEME_NAME);
        let components = assert_some!(engine.active_components());
        assert_eq!(components[&ThemePath::parse("bg")].field_type, FieldType::Color);
        assert_eq!(components[&ThemePath::parse("bold")].field_type, FieldType::Boolean);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrides_win_over_inference() {
        let (mut engine, _rx) = engine();

        assert_ok!(engine.ingest(options(json!({
            "theme": {"font": {"size": "14px"}, "accent": "#ff0000"},
            "overrides": {"font.size": "range", "accent": "text"}
        }))));

        let components = assert_some!(engine.active_components());
        assert_eq!(
            components[&ThemePath::parse("font.size")].field_type,
            FieldType::Other("range".to_string())
        );
        assert_eq!(components[&ThemePath::parse("accent")].field_type, FieldType::Text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_label_format_keeps_previous() {
        let (mut engine, _rx) = engine();

        let report = assert_ok!(engine.ingest(options(json!({
            "theme": {"colors": {"primaryDark": "#000"}},
            "config": {"labelFormat": "kebab"}
        }))));

        assert_eq!(report.warnings.len(), 1);
        let fields = engine.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, "Colors Primary Dark");
    }

    #[tokio::test(start_paused = true)]
    async fn test_numeric_label_format_keeps_prior_value() {
        let (mut engine, _rx) = engine();
        assert_ok!(engine.ingest(options(json!({
            "theme": {"colors": {"primaryDark": "#000"}},
            "config": {"labelFormat": "path"}
        }))));

        let report = assert_ok!(engine.ingest(options(json!({
            "theme": {"colors": {"primaryDark": "#111"}},
            "config": {"labelFormat": 5}
        }))));

        assert_matches!(report.warnings[0].clone(), engine::ConfigWarning::InvalidLabelFormat(ref raw) if raw == "5");
        assert_matches!(engine.config().label_format(), engine::LabelFormat::Path);
        assert_eq!(engine.fields()[0].label, "colors.primaryDark");
    }

    #[tokio::test(start_paused = true)]
    async fn test_path_label_format() {
        let (mut engine, _rx) = engine();

        assert_ok!(engine.ingest(options(json!({
            "theme": {"colors": {"primaryDark": "#000"}},
            "config": {"labelFormat": "path"}
        }))));

        assert_eq!(engine.fields()[0].label, "colors.primaryDark");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_payload_leaves_state() {
        let (mut engine, rx) = ready_engine(light_and_dark());

        let empty = assert_err!(engine.ingest(options(json!({"theme": []}))));
        assert_eq!(empty, EngineError::EmptyThemeList);

        let duplicate = assert_err!(engine.ingest(options(json!({
            "theme": [{"name": "a", "theme": {}}, {"name": "a", "theme": {}}]
        }))));
        assert_matches!(duplicate, EngineError::DuplicateThemeName(ref name) if name == "a");

        assert_eq!(engine.active_theme().name, "light");
        assert_eq!(engine.themes().len(), 2);
        sleep(Duration::from_secs(1)).await;
        assert!(drain(&rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reingest_replaces_everything() {
        let (mut engine, rx) = ready_engine(light_and_dark());
        assert_ok!(engine.edit_field(&ThemePath::parse("colors.primary"), json!("#000000")));

        assert_ok!(engine.ingest(options(json!({
            "theme": {"spacing": 8},
            "config": {"debounce": false}
        }))));

        assert!(engine.themes().is_empty());
        assert_eq!(engine.active_theme().name, DEFAULT_THEME_NAME);
        assert_eq!(engine.component_registries().len(), 1);
        assert_none!(engine.component_registries().get("light"));

        // The pending edit was superseded by the new payload
        sleep(Duration::from_secs(1)).await;
        let emitted = drain(&rx);
        assert_eq!(emitted, vec![theme(json!({"spacing": 8}))]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_config_carries_over_between_payloads() {
        let (mut engine, _rx) = engine();

        assert_ok!(engine.ingest(options(json!({
            "theme": {"a": 1},
            "config": {"debounce": false, "debounceRate": 250}
        }))));
        assert_ok!(engine.ingest(options(json!({"theme": {"b": 2}}))));

        assert!(!engine.config().debounce());
        assert_eq!(engine.config().debounce_rate_ms(), 250);
    }

    #[tokio::test(start_paused = true)]
    async fn test_host_events_dispatch() {
        let (mut engine, _rx) = engine();

        assert_ok!(engine.handle_event(HostEvent::ReceiveOptions(Box::new(light_and_dark()))));
        assert_ok!(engine.handle_event(HostEvent::SetThemes(vec![ThemeObject::new(
            "sepia",
            theme(json!({"bg": "#f4ecd8"}))
        )])));

        assert_eq!(engine.themes().len(), 1);
        assert_eq!(engine.active_theme().name, "light");
    }
}

mod editing {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_edit_replaces_tree_without_touching_previous() {
        let (mut engine, _rx) = ready_engine(light_and_dark());
        let before = engine.active_theme().theme.clone();

        assert_ok!(engine.edit_field(&ThemePath::parse("colors.primary"), json!("#00ff00")));

        assert_eq!(primary(&before), Some(&json!("#ff4785")));
        assert_eq!(primary(&engine.active_theme().theme), Some(&json!("#00ff00")));
        let primary_field = engine
            .fields()
            .into_iter()
            .find(|f| f.path == ThemePath::parse("colors.primary"));
        assert_eq!(assert_some!(primary_field).value, json!("#00ff00"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_field_is_rejected_without_emission() {
        let (mut engine, rx) = ready_engine(light_and_dark());

        let error = assert_err!(engine.edit_field(&ThemePath::parse("colors.unknown"), json!(1)));

        assert_matches!(error, EngineError::UnknownField { .. });
        assert!(!engine.is_pending());
        sleep(Duration::from_secs(1)).await;
        assert!(drain(&rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_container_value_keeps_fields_editable() {
        let (mut engine, rx) = ready_engine(options(json!({"theme": {"colors": {"primary": "#fff"}}})));
        let path = ThemePath::parse("colors.primary");

        let error = assert_err!(engine.edit_field(&path, json!({"light": "#eee", "dark": "#111"})));

        assert_matches!(error, EngineError::NonScalarValue { .. });
        let fields = engine.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path, path);
        assert_eq!(primary(&engine.active_theme().theme), Some(&json!("#fff")));
        assert_ok!(engine.edit_field(&path, json!("#eee")));

        sleep(Duration::from_secs(1)).await;
        assert_eq!(drain(&rx).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_editor_actions_before_ingest_are_ignored() {
        let (mut engine, rx) = engine();

        assert!(!engine.replace_active_theme(ThemeObject::new("x", theme(json!({"bg": "#000"})))));
        engine.set_themes(vec![ThemeObject::new("y", theme(json!({"bg": "#fff"})))]);
        assert!(!engine.select_theme("y"));
        assert!(!engine.reset_themes());
        assert_err!(engine.edit_field(&ThemePath::parse("bg"), json!("#111")));

        assert_eq!(engine.status(), EngineStatus::Uninitialized);
        assert!(!engine.is_pending());
        assert!(engine.fields().is_empty());
        sleep(Duration::from_secs(1)).await;
        assert!(drain(&rx).is_empty());

        // The first payload still goes out immediately
        assert_ok!(engine.ingest(light_and_dark()));
        assert_eq!(drain(&rx).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_theme_and_unknown_name() {
        let (mut engine, _rx) = ready_engine(light_and_dark());

        assert!(engine.select_theme("dark"));
        assert_eq!(primary(&engine.active_theme().theme), Some(&json!("#1ea7fd")));

        assert!(!engine.select_theme("sepia"));
        assert_eq!(engine.active_theme().name, "dark");
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_active_theme() {
        let (mut engine, _rx) = ready_engine(light_and_dark());

        assert!(engine.replace_active_theme(ThemeObject::new(
            "custom",
            theme(json!({"ink": "rgb(1, 2, 3)"}))
        )));

        assert_eq!(engine.active_theme().name, "custom");
        let components = assert_some!(engine.active_components());
        assert_eq!(components[&ThemePath::parse("ink")].field_type, FieldType::Color);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_ingested_themes() {
        let (mut engine, _rx) = ready_engine(light_and_dark());
        assert_ok!(engine.edit_field(&ThemePath::parse("colors.primary"), json!("#000")));
        assert!(engine.select_theme("dark"));

        assert!(engine.reset_themes());

        assert_eq!(engine.active_theme().name, "light");
        assert_eq!(primary(&engine.active_theme().theme), Some(&json!("#ff4785")));
    }
}

mod sync {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_emit_once_with_last_value() {
        let (mut engine, rx) = ready_engine(light_and_dark());
        let path = ThemePath::parse("colors.primary");

        assert_ok!(engine.edit_field(&path, json!("#111111")));
        sleep(Duration::from_millis(40)).await;
        assert_ok!(engine.edit_field(&path, json!("#222222")));
        sleep(Duration::from_millis(40)).await;
        assert_ok!(engine.edit_field(&path, json!("#333333")));

        assert!(engine.is_pending());
        sleep(Duration::from_millis(450)).await;
        assert!(engine.is_pending());
        assert!(drain(&rx).is_empty());

        sleep(Duration::from_millis(100)).await;
        assert!(!engine.is_pending());
        let emitted = drain(&rx);
        assert_eq!(emitted.len(), 1);
        assert_eq!(primary(&emitted[0]), Some(&json!("#333333")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_disabled_emits_every_change() {
        let mut payload = light_and_dark();
        payload.config = Some(engine::ConfigPatch {
            debounce: Some(false),
            ..Default::default()
        });
        let (mut engine, rx) = ready_engine(payload);
        let path = ThemePath::parse("colors.primary");

        assert_ok!(engine.edit_field(&path, json!("#111111")));
        assert_ok!(engine.edit_field(&path, json!("#222222")));

        assert!(!engine.is_pending());
        let emitted = drain(&rx);
        assert_eq!(emitted.len(), 2);
        assert_eq!(primary(&emitted[1]), Some(&json!("#222222")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_emission() {
        let (mut engine, rx) = ready_engine(light_and_dark());
        assert_ok!(engine.edit_field(&ThemePath::parse("radius"), json!(8)));
        assert!(engine.is_pending());

        engine.teardown();
        sleep(Duration::from_secs(2)).await;

        assert!(drain(&rx).is_empty());
        assert_eq!(engine.status(), EngineStatus::Uninitialized);
        assert!(engine.fields().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_engine_cancels_pending_emission() {
        let (mut engine, rx) = ready_engine(light_and_dark());
        assert_ok!(engine.edit_field(&ThemePath::parse("radius"), json!(8)));

        drop(engine);
        sleep(Duration::from_secs(2)).await;

        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_engine_requires_runtime() {
        let (tx, _rx) = mpsc::channel();
        assert!(matches!(
            ThemeEngine::new(Arc::new(tx)),
            Err(EngineError::RuntimeUnavailable)
        ));
    }
}
