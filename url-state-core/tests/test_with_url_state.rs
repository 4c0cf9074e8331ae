//! Scenario tests for a component connected to the query string.
//!
//! Each test starts from a location whose query is `color=Blue` and mounts
//! a small animal/color control panel over it.

use url_state_core::{
    connect, Component, ConnectedComponent, Connector, Location, MemoryLocation, OpaqueCodec,
    QueryCodec, QueryStringCodec, SyncConfig, UrlState, UrlStateProps, UrlStateSetter,
};

/// Initialize tracing for tests
fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// What the control panel renders: two labels and two buttons.
struct ControlsView {
    current_animal: String,
    current_color: String,
    set_url_state: UrlStateSetter,
}

impl ControlsView {
    fn click(&self, color: &str) {
        self.set_url_state
            .set(UrlState::from([("color", color)]))
            .expect("setter should write the location");
    }

    fn click_green(&self) {
        self.click("Green");
    }

    fn click_red(&self) {
        self.click("Red");
    }
}

struct UrlBasedControls;

impl Component for UrlBasedControls {
    type Props = ();
    type Output = ControlsView;

    fn render(&self, props: UrlStateProps<'_, ()>) -> ControlsView {
        ControlsView {
            current_animal: props.url_state.get("animal").unwrap_or_default().to_string(),
            current_color: props.url_state.get("color").unwrap_or_default().to_string(),
            set_url_state: props.set_url_state,
        }
    }
}

fn parse_query_string(qs: &str) -> UrlState {
    QueryStringCodec.parse(qs)
}

fn stringify_state(state: &UrlState) -> String {
    QueryStringCodec.stringify(state)
}

fn blue_location() -> MemoryLocation {
    MemoryLocation::new(&stringify_state(&UrlState::from([("color", "Blue")])))
}

fn ant_and_blue() -> UrlState {
    UrlState::from([("animal", "Ant"), ("color", "Blue")])
}

fn mount<W, L, C, I>(connected: ConnectedComponent<W, L, C, I>) -> ConnectedComponent<W, L, C, I>
where
    W: Component,
    L: Location + 'static,
    C: QueryCodec + 'static,
    I: Fn() -> UrlState,
{
    connected.on_mount().expect("mount should succeed");
    connected
}

#[test]
fn test_will_not_override_params_already_in_query_string() {
    tracing_init();
    let location = blue_location();
    let connected = connect(parse_query_string, stringify_state, || {
        UrlState::from([("color", "Red")])
    })
    .wrap(UrlBasedControls, location.clone());
    assert_eq!(parse_query_string(&location.search()), UrlState::from([("color", "Blue")]));

    let wrapper = mount(connected);

    assert_eq!(parse_query_string(&location.search()), UrlState::from([("color", "Blue")]));
    assert_eq!(wrapper.render(&()).current_color, "Blue");
    assert_eq!(location.write_count(), 0);
}

#[test]
fn test_will_append_params_missing_from_query_string() {
    tracing_init();
    let location = blue_location();
    let connected = connect(parse_query_string, stringify_state, ant_and_blue)
        .wrap(UrlBasedControls, location.clone());
    assert_eq!(parse_query_string(&location.search()), UrlState::from([("color", "Blue")]));

    let wrapper = mount(connected);

    assert_eq!(parse_query_string(&location.search()), ant_and_blue());
    assert_eq!(location.query(), stringify_state(&ant_and_blue()));
    let view = wrapper.render(&());
    assert_eq!(view.current_animal, "Ant");
    assert_eq!(view.current_color, "Blue");
}

#[test]
fn test_sets_the_url_with_the_initial_state() {
    tracing_init();
    let location = blue_location();
    let connected = connect(parse_query_string, stringify_state, ant_and_blue)
        .wrap(UrlBasedControls, location.clone());

    mount(connected);

    assert_eq!(parse_query_string(&location.search()), ant_and_blue());
    assert_eq!(location.write_count(), 1);
}

#[test]
fn test_provides_the_current_url_state_to_the_wrapped_component() {
    tracing_init();
    let location = blue_location();
    let wrapper = mount(
        connect(parse_query_string, stringify_state, ant_and_blue)
            .wrap(UrlBasedControls, location.clone()),
    );

    assert_eq!(wrapper.url_state(), ant_and_blue());
    let view = wrapper.render(&());
    assert_eq!(view.current_animal, "Ant");
    assert_eq!(view.current_color, "Blue");
}

#[test]
fn test_updates_the_url_when_the_wrapped_component_updates_the_state() {
    tracing_init();
    let location = blue_location();
    let wrapper = mount(
        connect(parse_query_string, stringify_state, ant_and_blue)
            .wrap(UrlBasedControls, location.clone()),
    );
    let view = wrapper.render(&());
    assert_eq!(view.current_animal, "Ant");
    assert_eq!(view.current_color, "Blue");
    assert_eq!(parse_query_string(&location.search()), ant_and_blue());

    view.click_green();
    assert!(wrapper.needs_render());

    let view = wrapper.render(&());
    assert_eq!(view.current_animal, "Ant");
    assert_eq!(view.current_color, "Green");
    assert_eq!(
        parse_query_string(&location.search()),
        UrlState::from([("animal", "Ant"), ("color", "Green")])
    );
}

#[test]
fn test_setter_calls_are_applied_in_order() {
    tracing_init();
    let location = blue_location();
    let wrapper = mount(
        connect(parse_query_string, stringify_state, ant_and_blue)
            .wrap(UrlBasedControls, location.clone()),
    );
    let view = wrapper.render(&());

    view.click_green();
    assert_eq!(location.query(), "animal=Ant&color=Green");
    view.click_red();
    assert_eq!(location.query(), "animal=Ant&color=Red");

    assert_eq!(wrapper.render(&()).current_color, "Red");
    assert_eq!(
        location.writes(),
        vec![
            "animal=Ant&color=Blue".to_string(),
            "animal=Ant&color=Green".to_string(),
            "animal=Ant&color=Red".to_string(),
        ]
    );
}

#[test]
fn test_setting_the_current_state_changes_nothing() {
    tracing_init();
    let location = blue_location();
    let wrapper = mount(
        connect(parse_query_string, stringify_state, ant_and_blue)
            .wrap(UrlBasedControls, location.clone()),
    );
    let before = wrapper.render(&());
    let query_before = location.query();

    before
        .set_url_state
        .set(wrapper.url_state())
        .expect("setter should write the location");

    assert!(!wrapper.needs_render());
    let after = wrapper.render(&());
    assert_eq!(after.current_animal, before.current_animal);
    assert_eq!(after.current_color, before.current_color);
    assert_eq!(location.query(), query_before);
}

#[test]
fn test_each_mount_calls_the_factory_once() {
    tracing_init();
    let calls = std::cell::Cell::new(0);
    let location = MemoryLocation::new("");
    let wrapper = mount(
        connect(parse_query_string, stringify_state, || {
            calls.set(calls.get() + 1);
            ant_and_blue()
        })
        .wrap(UrlBasedControls, location.clone()),
    );
    wrapper.on_mount().unwrap();
    wrapper.render(&());
    wrapper.render(&());

    assert_eq!(calls.get(), 1);
}

#[test]
fn test_opaque_codec_keeps_other_params_out_of_the_way() {
    tracing_init();
    let codec = OpaqueCodec::default();
    let location = MemoryLocation::new(&format!(
        "utm=mail&{}",
        codec.stringify(&UrlState::from([("color", "Blue")]))
    ));
    let wrapper = mount(
        Connector::with_codec(codec.clone(), ant_and_blue).wrap(UrlBasedControls, location.clone()),
    );

    assert!(location.query().starts_with("utm=mail&state="));
    assert_eq!(parse_query_string(&location.query()).get("utm"), Some("mail"));
    assert_eq!(codec.parse(&location.query()), ant_and_blue());

    wrapper.render(&()).click_green();
    assert_eq!(parse_query_string(&location.query()).get("utm"), Some("mail"));
    assert_eq!(
        codec.parse(&location.query()),
        UrlState::from([("animal", "Ant"), ("color", "Green")])
    );
}

#[test]
fn test_opaque_codec_with_no_defaults_leaves_foreign_query_alone() {
    tracing_init();
    let location = MemoryLocation::new("utm=mail");
    let wrapper = mount(
        Connector::with_codec(OpaqueCodec::default(), UrlState::new)
            .wrap(UrlBasedControls, location.clone()),
    );

    assert_eq!(location.query(), "utm=mail");
    assert!(location.writes().is_empty());
    assert!(wrapper.url_state().is_empty());
}

#[test]
fn test_codec_from_config() {
    tracing_init();
    let config = SyncConfig::from_yaml_str("codec: query\n").unwrap();
    let location = blue_location();
    let wrapper = mount(
        Connector::with_codec(config.codec(), ant_and_blue)
            .wrap(UrlBasedControls, location.clone()),
    );

    assert_eq!(location.query(), "animal=Ant&color=Blue");
    assert_eq!(wrapper.render(&()).current_animal, "Ant");
}
