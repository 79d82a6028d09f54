use super::*;

// =============================================================
// Fakes
// =============================================================

struct FixedSignal(bool);

impl ColorSchemeSignal for FixedSignal {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

struct SharedSignal(std::rc::Rc<std::cell::Cell<bool>>);

impl ColorSchemeSignal for SharedSignal {
    fn prefers_dark(&self) -> bool {
        self.0.get()
    }
}

#[derive(Default)]
struct RecordingSurface {
    themes: Vec<EffectiveTheme>,
    synced: Vec<ThemePreference>,
}

impl ThemeSurface for RecordingSurface {
    fn set_theme(&mut self, theme: EffectiveTheme) {
        self.themes.push(theme);
    }

    fn sync_controls(&mut self, selected: ThemePreference) {
        self.synced.push(selected);
    }
}

/// A store that still holds an old value but refuses every write.
struct FullStore(Option<&'static str>);

impl PreferenceStore for FullStore {
    fn load(&self) -> Option<String> {
        self.0.map(str::to_owned)
    }

    fn save(&mut self, _value: &str) -> Result<(), Error> {
        Err(Error::Storage("quota exceeded".into()))
    }
}

fn controller(
    store: MemoryStore,
    prefers_dark: bool,
) -> ThemeController<MemoryStore, FixedSignal, RecordingSurface> {
    ThemeController::new(store, FixedSignal(prefers_dark), RecordingSurface::default())
}

// =============================================================
// ThemePreference
// =============================================================

#[test]
fn preference_default_is_system() {
    assert_eq!(ThemePreference::default(), ThemePreference::System);
}

#[test]
fn preference_parses_persisted_strings() {
    for p in ThemePreference::ALL {
        assert_eq!(p.as_str().parse::<ThemePreference>().unwrap(), p);
    }
}

#[test]
fn preference_rejects_unknown_and_wrong_case() {
    assert!(matches!("sepia".parse::<ThemePreference>(), Err(Error::UnknownPreference(_))));
    assert!("Dark".parse::<ThemePreference>().is_err());
    assert!("".parse::<ThemePreference>().is_err());
}

#[test]
fn preference_maps_control_labels() {
    assert_eq!(ThemePreference::from_control_label("System theme"), Some(ThemePreference::System));
    assert_eq!(ThemePreference::from_control_label("Light theme"), Some(ThemePreference::Light));
    assert_eq!(ThemePreference::from_control_label("Dark theme"), Some(ThemePreference::Dark));
    assert_eq!(ThemePreference::from_control_label("Toggle theme"), None);
}

#[test]
fn preference_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ThemePreference::Dark).unwrap(), "\"dark\"");
}

// =============================================================
// resolve_effective
// =============================================================

#[test]
fn explicit_preferences_pass_through() {
    for dark in [false, true] {
        assert_eq!(resolve_effective(ThemePreference::Light, dark), EffectiveTheme::Light);
        assert_eq!(resolve_effective(ThemePreference::Dark, dark), EffectiveTheme::Dark);
    }
}

#[test]
fn system_follows_platform_signal() {
    assert_eq!(resolve_effective(ThemePreference::System, true), EffectiveTheme::Dark);
    assert_eq!(resolve_effective(ThemePreference::System, false), EffectiveTheme::Light);
}

// =============================================================
// Control affordances
// =============================================================

#[test]
fn selected_control_swaps_secondary_text_for_primary() {
    let classes = control_classes(true);
    assert_eq!(classes.add, &["text-theme-text"]);
    assert!(classes.remove.contains(&"text-theme-text-sec"));
    assert!(classes.remove.contains(&"hover:text-theme-text"));
}

#[test]
fn unselected_control_is_the_inverse() {
    let selected = control_classes(true);
    let unselected = control_classes(false);
    assert_eq!(selected.add, unselected.remove);
    assert_eq!(selected.remove, unselected.add);
}

#[test]
fn pill_placement_formats_px() {
    let pill = PillPlacement { left: 36.0, width: 32.5 };
    assert_eq!(pill.left_css(), "36px");
    assert_eq!(pill.width_css(), "32.5px");
}

// =============================================================
// ThemeController
// =============================================================

#[test]
fn missing_stored_value_is_system() {
    assert_eq!(controller(MemoryStore::new(), false).stored_preference(), ThemePreference::System);
}

#[test]
fn invalid_stored_value_is_system() {
    let c = controller(MemoryStore::with_value("purple"), false);
    assert_eq!(c.stored_preference(), ThemePreference::System);
}

#[test]
fn set_then_get_round_trips() {
    let mut c = controller(MemoryStore::new(), false);
    for p in ThemePreference::ALL {
        c.set_preference(p);
        assert_eq!(c.stored_preference(), p);
    }
}

#[test]
fn set_preference_applies_and_syncs_controls() {
    let mut c = controller(MemoryStore::new(), false);
    c.set_preference(ThemePreference::Dark);
    assert_eq!(c.surface().themes, vec![EffectiveTheme::Dark]);
    assert_eq!(c.surface().synced, vec![ThemePreference::Dark]);
}

#[test]
fn set_preference_without_storage_still_applies() {
    let mut c = ThemeController::new(FullStore(None), FixedSignal(false), RecordingSurface::default());
    c.set_preference(ThemePreference::Dark);
    assert_eq!(c.applied(), Some(EffectiveTheme::Dark));
    assert_eq!(c.stored_preference(), ThemePreference::System);
}

#[test]
fn apply_twice_writes_once() {
    let mut c = controller(MemoryStore::new(), true);
    c.apply(ThemePreference::Dark);
    c.apply(ThemePreference::Dark);
    assert_eq!(c.surface().themes, vec![EffectiveTheme::Dark]);
}

#[test]
fn apply_system_and_dark_share_one_write_when_platform_is_dark() {
    let mut c = controller(MemoryStore::new(), true);
    c.apply(ThemePreference::System);
    c.apply(ThemePreference::Dark);
    assert_eq!(c.surface().themes.len(), 1);
}

#[test]
fn init_applies_stored_preference_without_syncing_controls() {
    let mut c = controller(MemoryStore::with_value("light"), true);
    assert_eq!(c.init(), ThemePreference::Light);
    assert_eq!(c.surface().themes, vec![EffectiveTheme::Light]);
    assert!(c.surface().synced.is_empty());
}

#[test]
fn sync_controls_uses_preference_loaded_at_init() {
    let mut c = controller(MemoryStore::with_value("dark"), false);
    c.init();
    assert_eq!(c.sync_controls(), ThemePreference::Dark);
    assert_eq!(c.surface().synced, vec![ThemePreference::Dark]);
}

#[test]
fn platform_change_followed_under_system() {
    let dark = std::rc::Rc::new(std::cell::Cell::new(false));
    let mut c = ThemeController::new(MemoryStore::new(), SharedSignal(dark.clone()), RecordingSurface::default());
    c.init();
    dark.set(true);
    c.on_color_scheme_change();
    assert_eq!(c.surface().themes, vec![EffectiveTheme::Light, EffectiveTheme::Dark]);
}

#[test]
fn platform_change_ignored_under_explicit_choice() {
    let dark = std::rc::Rc::new(std::cell::Cell::new(false));
    let mut c = ThemeController::new(
        MemoryStore::with_value("light"),
        SharedSignal(dark.clone()),
        RecordingSurface::default(),
    );
    c.init();
    dark.set(true);
    c.on_color_scheme_change();
    assert_eq!(c.surface().themes, vec![EffectiveTheme::Light]);
}

#[test]
fn failed_save_still_changes_current_preference() {
    let mut c = ThemeController::new(FullStore(Some("dark")), FixedSignal(false), RecordingSurface::default());
    assert_eq!(c.init(), ThemePreference::Dark);
    c.set_preference(ThemePreference::System);
    assert_eq!(c.current(), ThemePreference::System);
    assert_eq!(c.stored_preference(), ThemePreference::Dark);
    assert_eq!(c.sync_controls(), ThemePreference::System);
}

#[test]
fn platform_change_follows_unpersisted_system_choice() {
    let dark = std::rc::Rc::new(std::cell::Cell::new(true));
    let mut c = ThemeController::new(
        FullStore(Some("dark")),
        SharedSignal(dark.clone()),
        RecordingSurface::default(),
    );
    c.init();
    c.set_preference(ThemePreference::System);
    dark.set(false);
    c.on_color_scheme_change();
    assert_eq!(c.applied(), Some(EffectiveTheme::Light));
}
