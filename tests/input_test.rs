use sprite_ngin::{
    Config, KeyCode, PhysicalPosition, Vector2, Vector3,
    camera::Projection,
    input::{Action, KeyBindings, apply_key, screen_to_world},
};
use winit::dpi::PhysicalSize;

#[test]
fn default_bindings_are_wasd_and_escape() {
    let bindings = KeyBindings::default();
    assert_eq!(bindings.resolve(KeyCode::KeyW), Some(Action::MoveUp));
    assert_eq!(bindings.resolve(KeyCode::KeyA), Some(Action::MoveLeft));
    assert_eq!(bindings.resolve(KeyCode::KeyS), Some(Action::MoveDown));
    assert_eq!(bindings.resolve(KeyCode::KeyD), Some(Action::MoveRight));
    assert_eq!(bindings.resolve(KeyCode::Escape), Some(Action::Quit));
    assert_eq!(bindings.resolve(KeyCode::Space), None);
}

#[test]
fn rebinding_replaces_the_old_action() {
    let bindings = KeyBindings::default()
        .bind(KeyCode::ArrowUp, Action::MoveUp)
        .bind(KeyCode::KeyW, Action::Quit);
    assert_eq!(bindings.resolve(KeyCode::ArrowUp), Some(Action::MoveUp));
    assert_eq!(bindings.resolve(KeyCode::KeyW), Some(Action::Quit));
    assert_eq!(KeyBindings::new().resolve(KeyCode::Escape), None);
}

#[test]
fn opposite_keys_cancel_out() {
    let v = Vector3::new(0.0, 0.0, 0.0);
    let v = apply_key(v, Action::MoveLeft, true);
    let v = apply_key(v, Action::MoveRight, true);
    assert_eq!(v, Vector3::new(0.0, 0.0, 0.0));

    let v = apply_key(v, Action::MoveLeft, false);
    assert_eq!(v, Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(apply_key(v, Action::Quit, true), v);
}

#[test]
fn cursor_maps_to_bottom_left_world_origin() {
    let projection = Projection::new(800, 600);
    let window = PhysicalSize::new(1600, 1200);

    let top_left = screen_to_world(PhysicalPosition::new(0.0, 0.0), window, &projection);
    assert_eq!(top_left, Vector2::new(0.0, 600.0));

    let centre = screen_to_world(PhysicalPosition::new(800.0, 600.0), window, &projection);
    assert_eq!(centre, Vector2::new(400.0, 300.0));
}

#[test]
fn config_builders_override_defaults() {
    let config = Config::default();
    assert_eq!((config.width, config.height), (800, 600));
    assert_eq!(config.clear_colour, wgpu::Color::BLACK);

    let config = config
        .with_title("walker")
        .with_size(320, 240)
        .with_clear_colour(wgpu::Color::WHITE)
        .with_key_bindings(KeyBindings::new());
    assert_eq!(config.title, "walker");
    assert_eq!((config.width, config.height), (320, 240));
    assert_eq!(config.clear_colour, wgpu::Color::WHITE);
    assert_eq!(config.key_bindings.resolve(KeyCode::KeyW), None);
}
